use crate::application::ports::SearchResult;

/// Separator placed between retrieved passages in the prompt context.
pub const CONTEXT_DELIMITER: &str = " ";

pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.record.text())
        .collect::<Vec<_>>()
        .join(CONTEXT_DELIMITER)
}

pub fn build_prompt(context: &str, question: &str) -> String {
    format!("Context: {context}\n\nQuestion: {question}\n\nAnswer:")
}
