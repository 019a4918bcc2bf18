//! Corrective RAG loop domain
//!
//! Types and pure policy for the retrieve → grade → (rewrite → retrieve →
//! grade)* → generate cycle. Components that call backends live in
//! `infrastructure::rag`.

mod cancellation;
mod config;
mod error;
mod machine;
mod outcome;
mod score;
mod state;

pub use cancellation::CancellationToken;
pub use config::RagConfig;
pub use error::RagError;
pub use machine::{next_state, should_rewrite, LoopState};
pub use outcome::RagOutcome;
pub use score::{
    aggregate_score, parse_score, GradeOutcome, PassageScore, ScoreSource, ORACLE_FAILURE_SCORE,
    UNPARSEABLE_SCORE,
};
pub use state::SessionState;
