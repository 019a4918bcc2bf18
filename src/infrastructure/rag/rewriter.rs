//! Query rewriter

use tracing::{info, warn};

use super::prompts::{rewriter_user, REWRITER_SYSTEM};
use crate::infrastructure::llm::Oracle;

/// Restates a question for retrieval; the attempt counter belongs to the loop
#[derive(Debug, Clone)]
pub struct QueryRewriter {
    oracle: Oracle,
}

impl QueryRewriter {
    pub fn new(oracle: Oracle) -> Self {
        Self { oracle }
    }

    /// Returns `question` unchanged when the oracle fails or answers blank
    pub async fn rewrite(&self, question: &str) -> String {
        match self.oracle.complete(REWRITER_SYSTEM, &rewriter_user(question)).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(original = %question, rewritten = %text, "Rewrote query");
                text
            }
            Ok(_) => {
                warn!("Rewrite came back empty, keeping original question");
                question.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Rewrite failed, keeping original question");
                question.to_string()
            }
        }
    }
}
