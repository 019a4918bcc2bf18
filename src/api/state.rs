//! Shared state for HTTP handlers

use std::sync::Arc;

use crate::domain::RetrievalBackend;
use crate::infrastructure::rag::RagLoop;

#[derive(Debug, Clone)]
pub struct AppState {
    pub rag: Arc<RagLoop>,
    /// Used for collection listing only; the loop holds its own handle
    pub backend: Arc<dyn RetrievalBackend>,
}

impl AppState {
    pub fn new(rag: Arc<RagLoop>, backend: Arc<dyn RetrievalBackend>) -> Self {
        Self { rag, backend }
    }
}
