//! Control loop: retrieve → grade → (rewrite → retrieve → grade)* → generate

use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{AnswerGenerator, QueryRewriter, RelevanceGrader, Retriever};
use crate::domain::rag::next_state;
use crate::domain::{
    CancellationToken, CollectionIds, DomainError, LoopState, RagConfig, RagError, RagOutcome,
    RetrievalBackend, SessionState,
};
use crate::infrastructure::llm::Oracle;

/// Grading is a classification; keep it deterministic
const GRADER_TEMPERATURE: f32 = 0.0;

/// Orchestrates one session at a time per call; holds no per-session state
#[derive(Debug, Clone)]
pub struct RagLoop {
    config: RagConfig,
    retriever: Retriever,
    grader: RelevanceGrader,
    rewriter: QueryRewriter,
    generator: AnswerGenerator,
}

impl RagLoop {
    /// Build a loop over one backend and one oracle model
    ///
    /// Fails when `config` is out of range.
    pub fn new(
        backend: Arc<dyn RetrievalBackend>,
        oracle: Oracle,
        config: RagConfig,
    ) -> Result<Self, DomainError> {
        config.ensure_valid()?;

        let retriever = Retriever::new(backend, config.default_collection_ids.clone(), config.top_k);
        let grader = RelevanceGrader::new(
            oracle.clone().with_temperature(GRADER_TEMPERATURE),
            config.relevance_threshold,
        )
        .with_concurrency(config.grading_concurrency);

        Ok(Self {
            retriever,
            grader,
            rewriter: QueryRewriter::new(oracle.clone()),
            generator: AnswerGenerator::new(oracle),
            config,
        })
    }

    /// Answer one question
    ///
    /// `collection_ids` overrides the configured default when given.
    pub async fn run(
        &self,
        question: impl Into<String>,
        collection_ids: Option<CollectionIds>,
    ) -> Result<RagOutcome, RagError> {
        self.run_with_cancel(question, collection_ids, &CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), aborting the running step once `cancel` fires
    pub async fn run_with_cancel(
        &self,
        question: impl Into<String>,
        collection_ids: Option<CollectionIds>,
        cancel: &CancellationToken,
    ) -> Result<RagOutcome, RagError> {
        let question = question.into();

        if question.trim().is_empty() {
            return Err(RagError::invalid_question("question must not be empty"));
        }

        let mut session = SessionState::new(question);
        if let Some(ids) = collection_ids {
            session = session.with_collections(ids);
        }

        let session_id = Uuid::new_v4();

        match self.config.session_timeout() {
            Some(timeout) => tokio::time::timeout(timeout, self.drive(session_id, session, cancel))
                .await
                .map_err(|_| RagError::timed_out(timeout.as_secs()))?,
            None => self.drive(session_id, session, cancel).await,
        }
    }

    #[instrument(skip(self, session, cancel))]
    async fn drive(
        &self,
        session_id: Uuid,
        mut session: SessionState,
        cancel: &CancellationToken,
    ) -> Result<RagOutcome, RagError> {
        let mut state = LoopState::INITIAL;
        let mut trace = Vec::new();
        let mut grade_rounds = 0u32;

        while !state.is_terminal() {
            trace.push(state);

            // A step in flight is dropped on cancel; its partial state is discarded
            session = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(at = %state, "Session cancelled");
                    return Err(RagError::cancelled(state));
                }
                result = self.step(state, session, &mut grade_rounds) => result?,
            };

            let next = next_state(state, &session, &self.config);
            debug!(
                from = %state,
                to = %next,
                relevance_score = session.relevance_score(),
                rewrite_count = session.rewrite_count(),
                documents = session.documents().len(),
                "Loop transition"
            );
            state = next;
        }

        trace.push(state);

        info!(
            grade_rounds,
            rewrite_count = session.rewrite_count(),
            relevance_score = session.relevance_score(),
            "Session complete"
        );

        Ok(session.into_outcome(session_id, grade_rounds, trace))
    }

    async fn step(
        &self,
        state: LoopState,
        session: SessionState,
        grade_rounds: &mut u32,
    ) -> Result<SessionState, RagError> {
        let next = match state {
            LoopState::Retrieve => {
                let collections = self.retriever.resolve_collections(session.collection_ids());
                let documents = self
                    .retriever
                    .retrieve(session.resolved_query(), collections)
                    .await;
                session.with_documents(documents)
            }
            LoopState::Grade => {
                *grade_rounds += 1;
                let outcome = self
                    .grader
                    .grade(session.question(), session.documents().to_vec())
                    .await;
                session.with_grade(outcome.filtered, outcome.aggregate_score)
            }
            LoopState::Rewrite => {
                let rewritten = self.rewriter.rewrite(session.question()).await;
                session.with_rewrite(rewritten)
            }
            LoopState::Generate => {
                let answer = self
                    .generator
                    .generate(session.question(), session.documents())
                    .await
                    .map_err(|e| RagError::generation(e.to_string()))?;
                session.with_answer(answer)
            }
            LoopState::Done => session,
        };

        Ok(next)
    }
}
