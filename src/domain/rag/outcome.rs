//! Caller-facing result of one session

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::machine::LoopState;
use crate::domain::retrieval::Passage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagOutcome {
    pub session_id: Uuid,
    pub question: String,
    pub answer: String,
    /// Passages the answer was grounded on (the last graded set)
    pub documents: Vec<Passage>,
    pub relevance_score: f32,
    pub rewrite_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_query: Option<String>,
    pub grade_rounds: u32,
    /// States visited, in order
    pub trace: Vec<LoopState>,
}

impl RagOutcome {
    /// Whether the answer was generated with no supporting passages
    pub fn is_ungrounded(&self) -> bool {
        self.documents.is_empty()
    }

    /// Passage contents, as consumed by offline evaluation
    pub fn contexts(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.content.as_str()).collect()
    }
}
