//! RAGFlow HTTP API client
//!
//! Retrieval: `POST /api/v1/retrieval`, passages under `data.chunks[]`.
//! Listing: `GET /api/v1/datasets`, datasets under `data[]`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{CollectionInfo, DomainError, Passage, RetrievalBackend, RetrievalRequest};
use crate::infrastructure::llm::HttpClientTrait;

pub const DEFAULT_RAGFLOW_BASE_URL: &str = "http://localhost:9380";

const LIST_PAGE_SIZE: u32 = 100;

/// RAGFlow client
///
/// Listing may use its own HTTP client so it can carry a shorter timeout
/// than retrieval.
#[derive(Debug)]
pub struct RagflowClient<C: HttpClientTrait> {
    client: C,
    listing_client: Option<C>,
    base_url: String,
    auth_header: String,
}

impl<C: HttpClientTrait> RagflowClient<C> {
    pub fn new(client: C, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            listing_client: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_header: format!("Bearer {}", api_key.into()),
        }
    }

    pub fn with_listing_client(mut self, client: C) -> Self {
        self.listing_client = Some(client);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn retrieval_url(&self) -> String {
        format!("{}/api/v1/retrieval", self.base_url)
    }

    fn datasets_url(&self) -> String {
        format!("{}/api/v1/datasets", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_chunks(json: serde_json::Value) -> Result<Vec<Passage>, DomainError> {
        let response: RetrievalResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ragflow", format!("Failed to parse retrieval response: {}", e))
        })?;

        Ok(response
            .data
            .chunks
            .into_iter()
            .map(|chunk| Passage::new(chunk.content, chunk.document_name, chunk.similarity))
            .collect())
    }

    fn parse_datasets(json: serde_json::Value) -> Result<Vec<CollectionInfo>, DomainError> {
        let response: DatasetsResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ragflow", format!("Failed to parse datasets response: {}", e))
        })?;

        Ok(response.data)
    }
}

#[async_trait]
impl<C: HttpClientTrait> RetrievalBackend for RagflowClient<C> {
    async fn retrieve(&self, request: RetrievalRequest) -> Result<Vec<Passage>, DomainError> {
        let body = serde_json::json!({
            "question": request.query,
            "dataset_ids": request.collection_ids,
            "top_k": request.top_k,
        });

        debug!(
            datasets = request.collection_ids.len(),
            top_k = request.top_k,
            "Sending retrieval request to RAGFlow"
        );

        let json = self
            .client
            .post_json(&self.retrieval_url(), self.headers(), &body)
            .await?;

        Self::parse_chunks(json)
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>, DomainError> {
        let client = self.listing_client.as_ref().unwrap_or(&self.client);
        let query = [("page", "1".to_string()), ("page_size", LIST_PAGE_SIZE.to_string())];

        let json = client
            .get_json(&self.datasets_url(), self.headers(), &query)
            .await?;

        Self::parse_datasets(json)
    }

    fn backend_name(&self) -> &'static str {
        "ragflow"
    }
}

// RAGFlow API types

#[derive(Debug, Deserialize)]
struct RetrievalResponse {
    #[serde(default)]
    data: RetrievalData,
}

#[derive(Debug, Default, Deserialize)]
struct RetrievalData {
    #[serde(default)]
    chunks: Vec<RagflowChunk>,
}

#[derive(Debug, Deserialize)]
struct RagflowChunk {
    #[serde(default)]
    content: String,
    #[serde(default)]
    document_name: String,
    #[serde(default)]
    similarity: f32,
}

#[derive(Debug, Deserialize)]
struct DatasetsResponse {
    #[serde(default)]
    data: Vec<CollectionInfo>,
}
