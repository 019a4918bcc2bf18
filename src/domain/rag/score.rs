//! Relevance scores and their aggregation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::retrieval::Passage;

/// First `0`/`1` token, optionally with a fractional part
static SCORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[01](?:\.\d+)?").expect("valid score pattern"));

/// Score used when the oracle answers but no number can be read from it
pub const UNPARSEABLE_SCORE: f32 = 0.0;

/// Score used when the oracle call itself fails. Deliberately the opposite
/// of `UNPARSEABLE_SCORE`: a passage is kept rather than dropped on an outage.
pub const ORACLE_FAILURE_SCORE: f32 = 1.0;

/// How a passage score was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Parsed,
    Unparseable,
    OracleFailed,
}

/// Relevance of one passage to the question, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassageScore {
    pub value: f32,
    pub source: ScoreSource,
}

impl PassageScore {
    /// Read the score out of raw oracle output
    pub fn from_oracle_output(text: &str) -> Self {
        match parse_score(text) {
            Some(value) => Self {
                value,
                source: ScoreSource::Parsed,
            },
            None => Self {
                value: UNPARSEABLE_SCORE,
                source: ScoreSource::Unparseable,
            },
        }
    }

    /// Score for a passage whose oracle call failed
    pub fn oracle_failed() -> Self {
        Self {
            value: ORACLE_FAILURE_SCORE,
            source: ScoreSource::OracleFailed,
        }
    }

    pub fn passes(&self, threshold: f32) -> bool {
        self.value >= threshold
    }
}

/// Extract the first score-looking token, clamped to [0, 1]
pub fn parse_score(text: &str) -> Option<f32> {
    SCORE_PATTERN
        .find(text)
        .and_then(|m| m.as_str().parse::<f32>().ok())
        .map(|score| score.clamp(0.0, 1.0))
}

/// Arithmetic mean; 0.0 for no scores
pub fn aggregate_score(scores: &[PassageScore]) -> f32 {
    if scores.is_empty() {
        return 0.0;
    }

    scores.iter().map(|s| s.value).sum::<f32>() / scores.len() as f32
}

/// Result of grading one candidate set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeOutcome {
    /// Passages at or above the threshold, in their original order
    pub filtered: Vec<Passage>,
    /// Mean of every individual score, including dropped passages
    pub aggregate_score: f32,
    /// Individual scores, aligned with the input passages
    pub scores: Vec<PassageScore>,
}

impl GradeOutcome {
    /// Outcome for an empty candidate set; nothing is scored
    pub fn empty() -> Self {
        Self {
            filtered: Vec::new(),
            aggregate_score: 0.0,
            scores: Vec::new(),
        }
    }

    /// Pair passages with their scores and keep those passing `threshold`
    pub fn from_scores(documents: Vec<Passage>, scores: Vec<PassageScore>, threshold: f32) -> Self {
        debug_assert_eq!(documents.len(), scores.len());

        let aggregate_score = aggregate_score(&scores);
        let filtered = documents
            .into_iter()
            .zip(scores.iter())
            .filter(|(_, score)| score.passes(threshold))
            .map(|(doc, _)| doc)
            .collect();

        Self {
            filtered,
            aggregate_score,
            scores,
        }
    }
}
