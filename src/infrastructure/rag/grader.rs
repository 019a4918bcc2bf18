//! Relevance grader
//!
//! Scores each passage through the oracle and keeps those at or above the
//! threshold. Oracle failure scores 1.0, unparseable output scores 0.0.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::prompts::{grader_user, GRADER_SYSTEM};
use crate::domain::{GradeOutcome, Passage, PassageScore};
use crate::infrastructure::llm::Oracle;

#[derive(Debug, Clone)]
pub struct RelevanceGrader {
    oracle: Oracle,
    threshold: f32,
    concurrency: usize,
}

impl RelevanceGrader {
    pub fn new(oracle: Oracle, threshold: f32) -> Self {
        Self {
            oracle,
            threshold,
            concurrency: 1,
        }
    }

    /// Grade up to `concurrency` passages at once; results keep input order
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn grade(&self, question: &str, documents: Vec<Passage>) -> GradeOutcome {
        if documents.is_empty() {
            debug!("No passages to grade");
            return GradeOutcome::empty();
        }

        // Futures are built up front so the stream holds no closure over `&Passage`
        let pending: Vec<_> = documents
            .iter()
            .map(|doc| self.score_passage(question, doc))
            .collect();
        let scores: Vec<PassageScore> = stream::iter(pending)
            .buffered(self.concurrency)
            .collect()
            .await;

        let total = documents.len();
        let outcome = GradeOutcome::from_scores(documents, scores, self.threshold);

        info!(
            passed = outcome.filtered.len(),
            total,
            aggregate = outcome.aggregate_score,
            "Grading complete"
        );

        outcome
    }

    async fn score_passage(&self, question: &str, passage: &Passage) -> PassageScore {
        let user = grader_user(question, &passage.content);

        match self.oracle.complete(GRADER_SYSTEM, &user).await {
            Ok(text) => {
                let score = PassageScore::from_oracle_output(&text);
                debug!(
                    source = %passage.source_name,
                    score = score.value,
                    raw = %text,
                    "Scored passage"
                );
                score
            }
            Err(e) => {
                warn!(
                    source = %passage.source_name,
                    error = %e,
                    "Scoring failed, treating passage as relevant"
                );
                PassageScore::oracle_failed()
            }
        }
    }
}
