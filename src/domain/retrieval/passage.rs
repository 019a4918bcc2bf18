//! Retrieved passages

use serde::{Deserialize, Serialize};

/// A passage returned by the retrieval backend
///
/// `similarity` is whatever the backend reports for ranking; it is not the
/// relevance score assigned by the grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    pub content: String,
    pub source_name: String,
    pub similarity: f32,
}

impl Passage {
    pub fn new(content: impl Into<String>, source_name: impl Into<String>, similarity: f32) -> Self {
        Self {
            content: content.into(),
            source_name: source_name.into(),
            similarity,
        }
    }
}
