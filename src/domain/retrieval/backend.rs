//! Retrieval backend trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

use super::collection::{CollectionIds, CollectionInfo};
use super::passage::Passage;
use crate::domain::DomainError;

/// Request sent to the retrieval backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    pub query: String,
    pub collection_ids: Vec<String>,
    pub top_k: u32,
}

impl RetrievalRequest {
    pub fn new(query: impl Into<String>, collection_ids: &CollectionIds, top_k: u32) -> Self {
        Self {
            query: query.into(),
            collection_ids: collection_ids.iter().cloned().collect(),
            top_k,
        }
    }
}

/// Black-box passage store returning ranked passages for a query
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RetrievalBackend: Send + Sync + Debug {
    /// Fetch up to `top_k` passages, ordered by backend similarity
    async fn retrieve(&self, request: RetrievalRequest) -> Result<Vec<Passage>, DomainError>;

    /// List the collections a caller may target
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>, DomainError>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}
