//! Loop configuration

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::domain::retrieval::{parse_collection_ids, CollectionIds};
use crate::domain::DomainError;

/// Read-only configuration shared by every session of one `RagLoop`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RagConfig {
    /// Minimum per-passage score to keep a passage, and minimum aggregate
    /// score to skip rewriting
    #[serde(default = "default_relevance_threshold")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub relevance_threshold: f32,
    /// Rewrite attempts allowed per session
    #[serde(default = "default_max_rewrites")]
    pub max_rewrites: u32,
    /// Passages requested per retrieval
    #[serde(default = "default_top_k")]
    #[validate(range(min = 1))]
    pub top_k: u32,
    /// Collections used when a session does not name its own
    #[serde(default, deserialize_with = "deserialize_collection_ids")]
    pub default_collection_ids: CollectionIds,
    /// Upper bound on one whole session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout_secs: Option<u64>,
    /// Passages graded concurrently; 1 grades strictly in order
    #[serde(default = "default_grading_concurrency")]
    #[validate(range(min = 1))]
    pub grading_concurrency: usize,
}

fn default_relevance_threshold() -> f32 {
    0.7
}

fn default_max_rewrites() -> u32 {
    3
}

fn default_top_k() -> u32 {
    5
}

fn default_grading_concurrency() -> usize {
    1
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
            max_rewrites: default_max_rewrites(),
            top_k: default_top_k(),
            default_collection_ids: CollectionIds::new(),
            session_timeout_secs: None,
            grading_concurrency: default_grading_concurrency(),
        }
    }
}

impl RagConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relevance_threshold(mut self, threshold: f32) -> Self {
        self.relevance_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_rewrites(mut self, max_rewrites: u32) -> Self {
        self.max_rewrites = max_rewrites;
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_default_collections<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_collection_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn with_grading_concurrency(mut self, concurrency: usize) -> Self {
        self.grading_concurrency = concurrency;
        self
    }

    pub fn session_timeout(&self) -> Option<Duration> {
        self.session_timeout_secs.map(Duration::from_secs)
    }

    /// Upper bound on grade rounds in one session
    pub fn max_grade_rounds(&self) -> u32 {
        self.max_rewrites + 1
    }

    /// Check ranges; called when a loop is built
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::configuration(format!("Invalid RAG configuration: {}", e)))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionIdsRepr {
    List(Vec<String>),
    Csv(String),
}

/// Accept either a list or a comma-separated string
fn deserialize_collection_ids<'de, D>(deserializer: D) -> Result<CollectionIds, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = match CollectionIdsRepr::deserialize(deserializer)? {
        CollectionIdsRepr::List(list) => list
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        CollectionIdsRepr::Csv(raw) => parse_collection_ids(&raw),
    };

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RagConfig::default();

        assert_eq!(config.relevance_threshold, 0.7);
        assert_eq!(config.max_rewrites, 3);
        assert_eq!(config.top_k, 5);
        assert!(config.default_collection_ids.is_empty());
        assert!(config.session_timeout().is_none());
        assert_eq!(config.grading_concurrency, 1);
        assert_eq!(config.max_grade_rounds(), 4);
        assert!(config.ensure_valid().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RagConfig::new()
            .with_relevance_threshold(0.5)
            .with_max_rewrites(1)
            .with_top_k(8)
            .with_default_collections(["kb-1", "kb-2"])
            .with_session_timeout(Duration::from_secs(30))
            .with_grading_concurrency(4);

        assert_eq!(config.relevance_threshold, 0.5);
        assert_eq!(config.max_rewrites, 1);
        assert_eq!(config.top_k, 8);
        assert_eq!(config.default_collection_ids.len(), 2);
        assert_eq!(config.session_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.grading_concurrency, 4);
    }

    #[test]
    fn test_threshold_clamping() {
        assert_eq!(RagConfig::new().with_relevance_threshold(1.5).relevance_threshold, 1.0);
        assert_eq!(RagConfig::new().with_relevance_threshold(-0.5).relevance_threshold, 0.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_top_k = RagConfig::new().with_top_k(0);
        assert!(zero_top_k.ensure_valid().is_err());

        let zero_concurrency = RagConfig::new().with_grading_concurrency(0);
        assert!(zero_concurrency.ensure_valid().is_err());

        let out_of_range = RagConfig {
            relevance_threshold: 1.2,
            ..RagConfig::default()
        };
        assert!(out_of_range.ensure_valid().is_err());
    }

    #[test]
    fn test_deserialize_collections_from_csv() {
        let config: RagConfig =
            serde_json::from_str(r#"{"default_collection_ids": "kb-1, kb-2,"}"#).unwrap();

        assert_eq!(config.default_collection_ids.len(), 2);
        assert_eq!(config.relevance_threshold, 0.7);
    }

    #[test]
    fn test_deserialize_collections_from_list() {
        let config: RagConfig =
            serde_json::from_str(r#"{"default_collection_ids": ["kb-1", " "], "max_rewrites": 2}"#)
                .unwrap();

        assert_eq!(config.default_collection_ids.len(), 1);
        assert_eq!(config.max_rewrites, 2);
    }
}
