//! Session failure types

use thiserror::Error;

use super::machine::LoopState;

/// Ways a session can end without an answer
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RagError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("Session cancelled at '{0}'")]
    Cancelled(LoopState),

    #[error("Session timed out after {timeout_secs}s")]
    TimedOut { timeout_secs: u64 },
}

impl RagError {
    pub fn invalid_question(message: impl Into<String>) -> Self {
        Self::InvalidQuestion(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn cancelled(at: LoopState) -> Self {
        Self::Cancelled(at)
    }

    pub fn timed_out(timeout_secs: u64) -> Self {
        Self::TimedOut { timeout_secs }
    }
}
