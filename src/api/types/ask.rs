use serde::{Deserialize, Serialize};

use crate::domain::{CollectionIds, CollectionInfo};

/// `POST /v1/ask` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Overrides the configured default collections; `[]` means none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_ids: Option<Vec<String>>,
}

impl AskRequest {
    /// Session collections, blank IDs dropped
    pub fn collection_ids(&self) -> Option<CollectionIds> {
        self.collection_ids.as_ref().map(|ids| {
            ids.iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

/// `GET /v1/collections` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsResponse {
    pub object: String,
    pub data: Vec<CollectionInfo>,
}

impl CollectionsResponse {
    pub fn new(data: Vec<CollectionInfo>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_request_without_collections() {
        let request: AskRequest = serde_json::from_str(r#"{"question": "q"}"#).unwrap();

        assert_eq!(request.collection_ids(), None);
    }

    #[test]
    fn test_ask_request_explicit_empty_collections() {
        let request: AskRequest =
            serde_json::from_str(r#"{"question": "q", "collection_ids": ["", " "]}"#).unwrap();

        assert_eq!(request.collection_ids(), Some(CollectionIds::new()));
    }
}
