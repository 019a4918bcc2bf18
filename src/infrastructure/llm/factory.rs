use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::OpenAiCompatibleProvider;
use crate::domain::{DomainError, LlmProvider};

/// Factory for creating LLM providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create a provider for an OpenAI-compatible endpoint
    pub fn create_openai_compatible(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, DomainError> {
        if api_key.trim().is_empty() {
            return Err(DomainError::configuration("LLM API key is not configured"));
        }

        if base_url.trim().is_empty() {
            return Err(DomainError::configuration("LLM base URL is not configured"));
        }

        let http_client = HttpClient::with_timeout(timeout)?;
        let provider = OpenAiCompatibleProvider::with_base_url(http_client, api_key, base_url);

        Ok(Arc::new(provider))
    }
}
