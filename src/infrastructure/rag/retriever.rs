//! Retriever: resolves the query and collections, never fails the loop

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::{CollectionIds, Passage, RetrievalBackend, RetrievalRequest};

#[derive(Debug, Clone)]
pub struct Retriever {
    backend: Arc<dyn RetrievalBackend>,
    default_collection_ids: CollectionIds,
    top_k: u32,
}

impl Retriever {
    pub fn new(
        backend: Arc<dyn RetrievalBackend>,
        default_collection_ids: CollectionIds,
        top_k: u32,
    ) -> Self {
        Self {
            backend,
            default_collection_ids,
            top_k,
        }
    }

    /// A session-level set wins over the default, even when it is empty
    pub fn resolve_collections<'a>(
        &'a self,
        session_ids: Option<&'a CollectionIds>,
    ) -> &'a CollectionIds {
        session_ids.unwrap_or(&self.default_collection_ids)
    }

    /// Fetch at most `top_k` passages in backend order
    ///
    /// An empty collection set returns nothing without calling the backend.
    /// Backend failures are logged and read as "nothing matched".
    pub async fn retrieve(&self, query: &str, collection_ids: &CollectionIds) -> Vec<Passage> {
        if collection_ids.is_empty() {
            warn!("No collections configured, skipping retrieval");
            return Vec::new();
        }

        let request = RetrievalRequest::new(query, collection_ids, self.top_k);

        match self.backend.retrieve(request).await {
            Ok(mut passages) => {
                passages.truncate(self.top_k as usize);
                info!(
                    backend = self.backend.backend_name(),
                    count = passages.len(),
                    "Retrieved passages"
                );
                passages
            }
            Err(e) => {
                error!(
                    backend = self.backend.backend_name(),
                    error = %e,
                    "Retrieval failed, continuing with no passages"
                );
                Vec::new()
            }
        }
    }
}
