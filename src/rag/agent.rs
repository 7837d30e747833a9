use std::sync::Arc;

use super::fetcher::DocumentFetcher;
use super::modality::{Modality, ModalityInputs};
use super::query::{QueryRefiner, QueryUnifier};
use super::responder::ResponseGenerator;
use crate::core::config::RagSettings;
use crate::core::errors::RagError;
use crate::llm::openai::OpenAiProvider;
use crate::llm::provider::LlmProvider;
use crate::retriever::provider::DocumentRetriever;
use crate::retriever::types::Document;
use crate::retriever::wikipedia::WikipediaRetriever;

pub const NO_INFORMATION_RESPONSE: &str =
    "Sorry, I couldn't find enough information to answer your query.";

/// Query used for summarization when no text modality was given.
pub const GENERAL_QUERY: &str = "General query";

/// Entry point for one multimodal request: fetch, deduplicate, summarize, answer.
#[derive(Clone)]
pub struct RagAgent {
    retriever: Arc<dyn DocumentRetriever>,
    fetcher: DocumentFetcher,
    responder: ResponseGenerator,
}

impl RagAgent {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        retriever: Arc<dyn DocumentRetriever>,
        settings: &RagSettings,
    ) -> Self {
        tracing::debug!(
            "RAG agent using llm={} retriever={}",
            llm.name(),
            retriever.name()
        );

        let refiner = QueryRefiner::new(llm.clone(), settings.llm.clone());
        let unifier = QueryUnifier::new(llm.clone(), settings.llm.clone());
        let fetcher = DocumentFetcher::new(retriever.clone(), refiner, unifier)
            .with_concurrent_modalities(settings.retrieval.concurrent_modalities);
        let responder = ResponseGenerator::new(llm, settings.llm.clone());

        Self {
            retriever,
            fetcher,
            responder,
        }
    }

    /// Production wiring: OpenAI-compatible chat plus Wikipedia.
    pub fn from_settings(settings: &RagSettings, api_key: String) -> Result<Self, RagError> {
        let llm = OpenAiProvider::new(&settings.llm, api_key)?;
        tracing::info!("Using model {}", llm.model());
        let retriever = WikipediaRetriever::new(&settings.retrieval)?;
        Ok(Self::new(Arc::new(llm), Arc::new(retriever), settings))
    }

    pub fn retriever(&self) -> &Arc<dyn DocumentRetriever> {
        &self.retriever
    }

    pub async fn retrieve_documents(&self, inputs: &ModalityInputs) -> Vec<Document> {
        self.fetcher.fetch(inputs).await
    }

    /// Errors only come from the generation stage; retrieval failures degrade
    /// to fewer documents or the fallback message.
    pub async fn process_query(&self, inputs: &ModalityInputs) -> Result<String, RagError> {
        let documents = self.retrieve_documents(inputs).await;
        if documents.is_empty() {
            tracing::info!("No documents found; returning fallback response");
            return Ok(NO_INFORMATION_RESPONSE.to_string());
        }

        let descriptions = inputs.combined_description();
        let query = inputs.get(Modality::Text).unwrap_or(GENERAL_QUERY);

        self.responder.generate(query, &documents, &descriptions).await
    }
}
