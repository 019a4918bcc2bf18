//! Single-turn text oracle over an `LlmProvider`
//!
//! Grader, rewriter and generator all talk to the model the same way:
//! one system instruction, one user message, one text reply.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{DomainError, LlmProvider, LlmRequest};

#[derive(Debug, Clone)]
pub struct Oracle {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
}

impl Oracle {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Ask once and return the trimmed reply text
    pub async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, DomainError> {
        let mut builder = LlmRequest::builder()
            .system(system_instruction)
            .user(user_content);

        if let Some(temperature) = self.temperature {
            builder = builder.temperature(temperature);
        }

        debug!(
            provider = self.provider.provider_name(),
            model = %self.model,
            "Calling oracle"
        );

        let response = self.provider.chat(&self.model, builder.build()).await?;

        if let Some(usage) = response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Oracle usage"
            );
        }

        Ok(response.content().trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[tokio::test]
    async fn test_complete_sends_system_and_user() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_reply("  answer \n"));
        let oracle = Oracle::new(provider.clone(), "qwen-plus").with_temperature(0.0);

        let text = oracle.complete("be brief", "hello").await.unwrap();

        assert_eq!(text, "answer");
        let calls = provider.calls();
        assert_eq!(calls[0].system_text(), Some("be brief"));
        assert_eq!(calls[0].user_text(), Some("hello"));
        assert_eq!(calls[0].temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_complete_propagates_provider_error() {
        let provider = Arc::new(MockLlmProvider::new("mock").with_error("down"));
        let oracle = Oracle::new(provider, "qwen-plus");

        assert!(oracle.complete("s", "u").await.is_err());
    }
}
