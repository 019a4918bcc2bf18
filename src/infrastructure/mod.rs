//! Infrastructure layer - backend adapters and loop components

pub mod llm;
pub mod logging;
pub mod rag;
pub mod retrieval;
