//! LocalRAG
//!
//! Corrective retrieval-augmented generation over a RAGFlow passage store
//! and an OpenAI-compatible chat model:
//! retrieve → grade → (rewrite → retrieve → grade)* → generate.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use domain::RetrievalBackend;
use infrastructure::llm::{HttpClient, LlmProviderFactory, Oracle};
use infrastructure::rag::RagLoop;
use infrastructure::retrieval::RagflowClient;

/// RAGFlow client with separate retrieval and listing timeouts
pub fn create_retrieval_backend(config: &AppConfig) -> anyhow::Result<Arc<dyn RetrievalBackend>> {
    let retrieval = &config.retrieval;

    let client = RagflowClient::new(
        HttpClient::with_timeout(retrieval.timeout())?,
        &retrieval.base_url,
        &retrieval.api_key,
    )
    .with_listing_client(HttpClient::with_timeout(retrieval.list_timeout())?);

    info!(base_url = %client.base_url(), "Using RAGFlow retrieval backend");

    Ok(Arc::new(client))
}

/// Loop over the configured model and the given backend
pub fn create_rag_loop(
    config: &AppConfig,
    backend: Arc<dyn RetrievalBackend>,
) -> anyhow::Result<RagLoop> {
    let llm = &config.llm;
    let provider =
        LlmProviderFactory::create_openai_compatible(&llm.base_url, &llm.api_key, llm.timeout())?;

    info!(base_url = %llm.base_url, model = %llm.model, "Using OpenAI-compatible model");

    let rag = RagLoop::new(backend, Oracle::new(provider, &llm.model), config.rag.clone())?;

    if config.rag.default_collection_ids.is_empty() {
        info!("No default collections configured; sessions must name their own");
    }

    Ok(rag)
}

/// Wire the backend and loop for the HTTP server
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = create_retrieval_backend(config)?;
    let rag = create_rag_loop(config, backend.clone())?;

    Ok(AppState::new(Arc::new(rag), backend))
}
