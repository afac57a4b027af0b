//! Flat prompt templates sent to the completion endpoint.
//!
//! Inputs are interpolated verbatim: no truncation, escaping or chat history.

pub fn build_answer_prompt(document_text: &str, question: &str) -> String {
    format!(
        "You are a chatbot that answers questions based on the content of a document.\n\
         \n\
         Document: {document_text}\n\
         \n\
         Question: {question}\n\
         \n\
         Based *only* on the document provided, what is the answer to the question?"
    )
}

/// `question`, when present and non-blank, steers the summary towards it.
pub fn build_summary_prompt(document_text: &str, question: Option<&str>) -> String {
    let focus = question
        .filter(|q| !q.trim().is_empty())
        .map(|q| format!("Considering the question: {q}"))
        .unwrap_or_default();

    format!(
        "You are an expert summarizer, able to distill complex documents into concise and informative summaries.\n\
         \n\
         Document text: {document_text}\n\
         \n\
         {focus}\n\
         \n\
         Please provide a summary of the document, highlighting the key points and main arguments. \
         The summary should be no more than 3 paragraphs."
    )
}
