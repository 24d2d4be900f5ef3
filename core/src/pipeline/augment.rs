use crate::document::Document;

/// Instruction prepended to every prompt. It confines the model to the
/// retrieved contexts and fixes its answer when they don't cover the question.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful and concise RAG assistant.
Use ONLY the 'RETRIEVAL CONTEXTS' provided below to answer the 'QUESTION'.
If the answer CANNOT be found in the contexts provided, respond that 'The information is not available in the context provided.'
Be direct and cite the facts from the contexts.";

/// Lays out [`SYSTEM_INSTRUCTION`], the numbered contexts in retrieval order,
/// and the question:
///
/// ```text
/// <instruction>
///
/// RETRIEVAL CONTEXTS:
/// --- CONTEXT 1 ---
/// <content>
///
///
/// QUESTION: <query>
/// ```
#[must_use]
pub fn build_prompt(query: &str, docs: &[Document]) -> String {
    let contexts: String = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("--- CONTEXT {} ---\n{}\n", i + 1, doc.content()))
        .collect();
    format!("{SYSTEM_INSTRUCTION}\n\nRETRIEVAL CONTEXTS:\n{contexts}\n\nQUESTION: {query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let docs = vec![
            Document::new_with_id("doc-1", "Go was created at Google in 2009."),
            Document::new_with_id("doc-2", "Rust 1.0 shipped in 2015."),
        ];
        let prompt = build_prompt("When was Go created?", &docs);

        let expected = format!(
            "{SYSTEM_INSTRUCTION}\n\nRETRIEVAL CONTEXTS:\n\
             --- CONTEXT 1 ---\nGo was created at Google in 2009.\n\
             --- CONTEXT 2 ---\nRust 1.0 shipped in 2015.\n\
             \n\nQUESTION: When was Go created?"
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_prompt_preserves_order() {
        let docs: Vec<_> = ["third", "first", "second"]
            .iter()
            .map(|c| Document::new(*c))
            .collect();
        let prompt = build_prompt("order?", &docs);

        let third = prompt.find("--- CONTEXT 1 ---\nthird").unwrap();
        let first = prompt.find("--- CONTEXT 2 ---\nfirst").unwrap();
        let second = prompt.find("--- CONTEXT 3 ---\nsecond").unwrap();
        assert!(third < first && first < second);
    }

    #[test]
    fn test_prompt_markers_without_documents() {
        for query in ["", "What is Go?", "QUESTION: nested?"] {
            let prompt = build_prompt(query, &[]);
            assert!(prompt.contains("RETRIEVAL CONTEXTS"));
            assert!(prompt.contains("QUESTION:"));
            assert!(!prompt.contains("--- CONTEXT"));
            assert!(prompt.ends_with(&format!("QUESTION: {query}")));
        }
    }

    #[test]
    fn test_instruction_mentions_fallback_sentence() {
        assert!(SYSTEM_INSTRUCTION.contains("'The information is not available in the context provided.'"));
        let prompt = build_prompt("q", &[]);
        assert!(prompt.starts_with(&format!("{SYSTEM_INSTRUCTION}\n\nRETRIEVAL CONTEXTS:\n")));
    }
}
