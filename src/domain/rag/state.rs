//! Per-session state threaded through the loop
//!
//! Every step consumes the state and returns a new one carrying its own
//! updated fields; nothing holds a mutable reference across steps.

use serde::Serialize;
use uuid::Uuid;

use super::machine::LoopState;
use super::outcome::RagOutcome;
use crate::domain::retrieval::{CollectionIds, Passage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    question: String,
    rewritten_query: String,
    documents: Vec<Passage>,
    answer: String,
    relevance_score: f32,
    rewrite_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection_ids: Option<CollectionIds>,
}

impl SessionState {
    /// Fresh state for one question
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            rewritten_query: String::new(),
            documents: Vec::new(),
            answer: String::new(),
            relevance_score: 0.0,
            rewrite_count: 0,
            collection_ids: None,
        }
    }

    /// Target these collections instead of the configured default
    pub fn with_collections(mut self, collection_ids: CollectionIds) -> Self {
        self.collection_ids = Some(collection_ids);
        self
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn rewritten_query(&self) -> &str {
        &self.rewritten_query
    }

    pub fn documents(&self) -> &[Passage] {
        &self.documents
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn relevance_score(&self) -> f32 {
        self.relevance_score
    }

    pub fn rewrite_count(&self) -> u32 {
        self.rewrite_count
    }

    pub fn collection_ids(&self) -> Option<&CollectionIds> {
        self.collection_ids.as_ref()
    }

    /// Query used for retrieval: the rewrite if there is one, else the question
    pub fn resolved_query(&self) -> &str {
        if self.rewritten_query.trim().is_empty() {
            &self.question
        } else {
            &self.rewritten_query
        }
    }

    /// Replace the candidate set with freshly retrieved passages
    pub fn with_documents(mut self, documents: Vec<Passage>) -> Self {
        self.documents = documents;
        self
    }

    /// Replace the candidate set with the graded subset and its aggregate score
    pub fn with_grade(mut self, filtered: Vec<Passage>, relevance_score: f32) -> Self {
        self.documents = filtered;
        self.relevance_score = relevance_score;
        self
    }

    /// Record one rewrite attempt
    pub fn with_rewrite(mut self, rewritten_query: impl Into<String>) -> Self {
        self.rewritten_query = rewritten_query.into();
        self.rewrite_count += 1;
        self
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }

    /// Close the session into its caller-facing outcome
    pub(crate) fn into_outcome(
        self,
        session_id: Uuid,
        grade_rounds: u32,
        trace: Vec<LoopState>,
    ) -> RagOutcome {
        RagOutcome {
            session_id,
            question: self.question,
            answer: self.answer,
            documents: self.documents,
            relevance_score: self.relevance_score,
            rewrite_count: self.rewrite_count,
            rewritten_query: if self.rewritten_query.is_empty() {
                None
            } else {
                Some(self.rewritten_query)
            },
            grade_rounds,
            trace,
        }
    }
}
