use std::sync::Arc;

use super::prompts;
use crate::core::config::LlmSettings;
use crate::core::errors::RagError;
use crate::llm::provider::LlmProvider;
use crate::llm::types::ChatRequest;
use crate::retriever::types::Document;

/// Summarizes each document against the query, then answers from the summaries.
///
/// Any failed call aborts generation and is returned to the caller; no partial
/// answer is produced.
#[derive(Clone)]
pub struct ResponseGenerator {
    llm: Arc<dyn LlmProvider>,
    settings: LlmSettings,
}

impl ResponseGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self { llm, settings }
    }

    pub async fn generate(
        &self,
        query: &str,
        documents: &[Document],
        additional_context: &str,
    ) -> Result<String, RagError> {
        let mut summaries = Vec::with_capacity(documents.len());
        for (index, doc) in documents.iter().enumerate() {
            tracing::debug!(
                "Summarizing document {}/{}: {}",
                index + 1,
                documents.len(),
                doc.title()
            );
            summaries.push(self.summarize(query, doc).await?);
        }

        let combined_summaries = summaries.join("\n\n");
        let request = ChatRequest::exchange(
            prompts::ASSISTANT_SYSTEM,
            prompts::answer_prompt(query, additional_context, &combined_summaries),
        )
        .with_settings(&self.settings);

        self.llm.chat(request).await
    }

    async fn summarize(&self, query: &str, doc: &Document) -> Result<String, RagError> {
        let request = ChatRequest::exchange(
            prompts::SUMMARIZER_SYSTEM,
            prompts::summarize_prompt(query, &doc.content),
        )
        .with_settings(&self.settings);

        self.llm.chat(request).await
    }
}
