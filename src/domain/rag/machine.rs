//! Loop states and the pure transition function

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::RagConfig;
use super::state::SessionState;

/// Position of a session in the retrieve/grade/rewrite/generate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    Retrieve,
    Grade,
    Rewrite,
    Generate,
    Done,
}

impl LoopState {
    /// Every session starts here
    pub const INITIAL: LoopState = LoopState::Retrieve;

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::Grade => "grade",
            Self::Rewrite => "rewrite",
            Self::Generate => "generate",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a graded session should go back through the rewriter.
///
/// The threshold comparison is strict: a score equal to the threshold is
/// good enough. Once the rewrite budget is spent the session generates
/// with whatever it has.
pub fn should_rewrite(session: &SessionState, config: &RagConfig) -> bool {
    session.relevance_score() < config.relevance_threshold
        && session.rewrite_count() < config.max_rewrites
}

/// Next state given the state just completed and the session it produced
pub fn next_state(current: LoopState, session: &SessionState, config: &RagConfig) -> LoopState {
    match current {
        LoopState::Retrieve => LoopState::Grade,
        LoopState::Grade if should_rewrite(session, config) => LoopState::Rewrite,
        LoopState::Grade => LoopState::Generate,
        LoopState::Rewrite => LoopState::Retrieve,
        LoopState::Generate | LoopState::Done => LoopState::Done,
    }
}
