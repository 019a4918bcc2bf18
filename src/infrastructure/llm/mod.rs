//! LLM provider implementations

mod factory;
mod http_client;
mod openai;
mod oracle;

pub use factory::LlmProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::{OpenAiCompatibleProvider, DEFAULT_OPENAI_COMPATIBLE_BASE_URL};
pub use oracle::Oracle;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
