//! Document collections (RAGFlow datasets)

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set of collection IDs targeted by one retrieval
pub type CollectionIds = BTreeSet<String>;

/// Parse a comma-separated list of collection IDs, dropping blanks
pub fn parse_collection_ids(raw: &str) -> CollectionIds {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Summary of a collection as reported by the backend listing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<u64>,
}

impl CollectionInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            document_count: None,
            chunk_count: None,
        }
    }
}
