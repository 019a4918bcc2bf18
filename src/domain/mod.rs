//! Domain layer - Core types, traits and loop policy

pub mod error;
pub mod llm;
pub mod rag;
pub mod retrieval;

pub use error::DomainError;
pub use llm::{
    LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole, Usage,
};
pub use rag::{
    CancellationToken, GradeOutcome, LoopState, PassageScore, RagConfig, RagError, RagOutcome,
    ScoreSource, SessionState,
};
pub use retrieval::{CollectionIds, CollectionInfo, Passage, RetrievalBackend, RetrievalRequest};
