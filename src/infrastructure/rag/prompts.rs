//! Fixed oracle instructions for the loop components

pub const GRADER_SYSTEM: &str = "You are a document relevance assessor. \
Reply with a single number between 0 and 1 describing how relevant the document is to the question. \
1 means fully relevant, 0 means unrelated. Output only the number and nothing else.";

pub const REWRITER_SYSTEM: &str = "You are a search query optimizer. \
Rewrite the user's question into a query better suited to vector retrieval. \
Keep the core meaning, use precise terminology and drop conversational filler. \
Output only the rewritten query and nothing else.";

/// Context block used when no passage survived grading
pub const NO_CONTEXT_PLACEHOLDER: &str = "(no relevant documents)";

/// Separator between passages in the generator context block
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

const GENERATOR_SYSTEM_TEMPLATE: &str = "You are a technical documentation assistant. \
Answer the user's question accurately using only the reference documents below. \
If the documents do not contain the information, say so plainly. Do not make anything up.

Reference documents:
{context}
";

pub fn grader_user(question: &str, document: &str) -> String {
    format!(
        "Question: {}\n\nDocument: {}\n\nRelevance score (0-1):",
        question, document
    )
}

pub fn rewriter_user(question: &str) -> String {
    format!("Original question: {}", question)
}

pub fn generator_system(context: &str) -> String {
    GENERATOR_SYSTEM_TEMPLATE.replace("{context}", context)
}
