//! Retrieval backend implementations

mod ragflow;

pub use ragflow::{RagflowClient, DEFAULT_RAGFLOW_BASE_URL};
