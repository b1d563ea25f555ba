use std::fmt::Write;

use crate::models::ContextDoc;

/// Context section placeholder when no passages are supplied.
pub const NO_CONTEXT_PLACEHOLDER: &str = "No specific context provided.";

/// The fixed refusal sentence the model must emit when the context cannot
/// answer the question. Part of the grounding contract, not prose.
pub const REFUSAL_SENTENCE: &str =
    "I don't have sufficient information in my knowledge base to answer that question accurately.";

const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Render passages into numbered context blocks, preserving input order
/// (assumed already ranked best-first). Each block carries a relevance tag
/// when the passage has a positive score.
pub fn build_context(docs: &[ContextDoc]) -> String {
    if docs.is_empty() {
        return NO_CONTEXT_PLACEHOLDER.to_string();
    }

    let mut blocks = Vec::with_capacity(docs.len());
    for (i, doc) in docs.iter().enumerate() {
        let score = doc.effective_score();
        let mut block = String::new();
        if score > 0.0 {
            write!(block, "Context {} [Relevance: {:.2}]:\n{}", i + 1, score, doc.text)
                .expect("write to String");
        } else {
            write!(block, "Context {}:\n{}", i + 1, doc.text).expect("write to String");
        }
        blocks.push(block);
    }

    blocks.join(BLOCK_SEPARATOR)
}

/// Assemble the grounded prompt. The instruction list is the interface the
/// whole system depends on for factual safety: answer only from the supplied
/// context, refuse with a fixed sentence when it is insufficient, be
/// specific, add nothing from outside the context, and start directly with
/// the answer.
pub fn build_prompt(persona: &str, query: &str, docs: &[ContextDoc]) -> String {
    let context = build_context(docs);

    format!(
        "You are {persona}.\n\
         \n\
         CONTEXT INFORMATION (ordered by relevance):\n\
         {context}\n\
         \n\
         USER QUESTION: {query}\n\
         \n\
         CRITICAL INSTRUCTIONS:\n\
         1. Answer ONLY based on the context provided above\n\
         2. If the context doesn't contain enough information, respond: \"{REFUSAL_SENTENCE}\"\n\
         3. Be specific and precise - mention exact names, numbers, and identifiers when available\n\
         4. DO NOT make assumptions or add information not present in the context\n\
         \n\
         RESPONSE FORMAT:\n\
         - Start directly with the answer (no \"Based on the context...\" preambles)\n\
         - Be concise but complete\n\
         \n\
         YOUR ANSWER:"
    )
}
