//! Retrieval domain - passages, collections and the backend contract

mod backend;
mod collection;
mod passage;

pub use backend::{RetrievalBackend, RetrievalRequest};
pub use collection::{parse_collection_ids, CollectionIds, CollectionInfo};
pub use passage::Passage;

#[cfg(test)]
pub use backend::MockRetrievalBackend;
