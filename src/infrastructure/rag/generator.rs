//! Answer generator

use tracing::debug;

use super::prompts::{generator_system, CONTEXT_SEPARATOR, NO_CONTEXT_PLACEHOLDER};
use crate::domain::{DomainError, Passage};
use crate::infrastructure::llm::Oracle;

#[derive(Debug, Clone)]
pub struct AnswerGenerator {
    oracle: Oracle,
}

impl AnswerGenerator {
    pub fn new(oracle: Oracle) -> Self {
        Self { oracle }
    }

    /// Join passage contents; an empty set yields the placeholder
    pub fn build_context(documents: &[Passage]) -> String {
        let context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        if context.is_empty() {
            NO_CONTEXT_PLACEHOLDER.to_string()
        } else {
            context
        }
    }

    /// Oracle failures and blank replies propagate; there is no fallback answer
    pub async fn generate(&self, question: &str, documents: &[Passage]) -> Result<String, DomainError> {
        let context = Self::build_context(documents);

        debug!(passages = documents.len(), context_len = context.len(), "Generating answer");

        let answer = self.oracle.complete(&generator_system(&context), question).await?;

        if answer.is_empty() {
            return Err(DomainError::provider("oracle", "Model returned an empty answer"));
        }

        Ok(answer)
    }
}
