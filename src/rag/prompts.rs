//! Instruction templates for each LLM round trip in the pipeline.

pub const REFINER_SYSTEM: &str = "You are a query refiner.";
pub const UNIFIER_SYSTEM: &str = "You are a query formulator.";
pub const SUMMARIZER_SYSTEM: &str = "You are a summarizer.";
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";

pub fn refine_prompt(query: &str, additional_context: &str) -> String {
    format!(
        "Optimize the following query for better retrieval from Wikipedia, considering the additional context. \
         Output only the refined query without any additional text or prefixes like 'Optimized Query:'.\n\n\
         Query: {}\n\nAdditional Context: {}",
        query, additional_context
    )
}

pub fn unify_prompt(combined: &str) -> String {
    format!(
        "Create a single, comprehensive query for Wikipedia retrieval based on the following information. \
         Output only the query without any additional text or explanations.\n\n\
         Information: {}",
        combined
    )
}

pub fn summarize_prompt(query: &str, content: &str) -> String {
    format!(
        "Summarize the following document in relation to the query: {}\n\nDocument: {}",
        query, content
    )
}

pub fn answer_prompt(query: &str, additional_context: &str, combined_summaries: &str) -> String {
    format!(
        "Based on the following summaries and additional context, answer the query: {}\n\n\
         Additional Context: {}\n\nSummaries:\n{}",
        query, additional_context, combined_summaries
    )
}
