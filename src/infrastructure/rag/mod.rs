//! Loop components and the orchestrator that drives them

mod control_loop;
mod generator;
mod grader;
pub(crate) mod prompts;
mod retriever;
mod rewriter;

pub use control_loop::RagLoop;
pub use generator::AnswerGenerator;
pub use grader::RelevanceGrader;
pub use retriever::Retriever;
pub use rewriter::QueryRewriter;
