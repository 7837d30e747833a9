use std::sync::Arc;

use super::modality::ModalityInputs;
use super::prompts;
use crate::core::config::LlmSettings;
use crate::core::errors::RagError;
use crate::llm::provider::LlmProvider;
use crate::llm::types::ChatRequest;

/// Rewrites a single modality string into a retrieval-friendly query.
#[derive(Clone)]
pub struct QueryRefiner {
    llm: Arc<dyn LlmProvider>,
    settings: LlmSettings,
}

impl QueryRefiner {
    pub fn new(llm: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self { llm, settings }
    }

    /// Output is trimmed; models tend to pad the bare query with newlines.
    pub async fn refine(&self, query: &str, additional_context: &str) -> Result<String, RagError> {
        let request = ChatRequest::exchange(
            prompts::REFINER_SYSTEM,
            prompts::refine_prompt(query, additional_context),
        )
        .with_settings(&self.settings);

        let refined = self.llm.chat(request).await?;
        Ok(refined.trim().to_string())
    }
}

/// Merges all present modalities into one retrieval query.
#[derive(Clone)]
pub struct QueryUnifier {
    llm: Arc<dyn LlmProvider>,
    settings: LlmSettings,
}

impl QueryUnifier {
    pub fn new(llm: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self { llm, settings }
    }

    /// Returns the model output untrimmed.
    pub async fn unify(&self, inputs: &ModalityInputs) -> Result<String, RagError> {
        let combined = inputs.combined_description();
        let request = ChatRequest::exchange(prompts::UNIFIER_SYSTEM, prompts::unify_prompt(&combined))
            .with_settings(&self.settings);

        self.llm.chat(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::testing::ScriptedLlm;

    #[tokio::test]
    async fn refine_trims_and_sends_two_messages() {
        let llm = Arc::new(ScriptedLlm::new().reply("\n  Eiffel Tower history  \n"));
        let refiner = QueryRefiner::new(llm.clone(), LlmSettings::default());

        let refined = refiner
            .refine("Tell me about the Eiffel Tower.", "A tall iron tower in Paris.")
            .await
            .unwrap();

        assert_eq!(refined, "Eiffel Tower history");
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are a query refiner.");
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("Query: Tell me about the Eiffel Tower."));
        assert!(messages[1].content.contains("Additional Context: A tall iron tower in Paris."));
    }

    #[tokio::test]
    async fn refine_propagates_llm_errors() {
        let llm = Arc::new(ScriptedLlm::new().fail("quota exceeded"));
        let refiner = QueryRefiner::new(llm, LlmSettings::default());

        let err = refiner.refine("q", "").await.unwrap_err();
        assert!(matches!(err, RagError::Llm(ref msg) if msg == "quota exceeded"));
    }

    #[tokio::test]
    async fn unify_returns_raw_output_for_combined_inputs() {
        let llm = Arc::new(ScriptedLlm::new().reply(" Eiffel Tower Paris 1889\n"));
        let unifier = QueryUnifier::new(llm.clone(), LlmSettings::default());
        let inputs = ModalityInputs::new(Some("text"), None::<String>, Some("graph"));

        let unified = unifier.unify(&inputs).await.unwrap();

        assert_eq!(unified, " Eiffel Tower Paris 1889\n");
        let requests = llm.requests();
        assert_eq!(requests[0].messages[0].content, "You are a query formulator.");
        assert!(requests[0].messages[1].content.ends_with("Information: text graph"));
    }

    #[tokio::test]
    async fn configured_sampling_reaches_the_provider() {
        let llm = Arc::new(ScriptedLlm::always("q"));
        let settings = LlmSettings {
            temperature: Some(0.0),
            ..LlmSettings::default()
        };
        let refiner = QueryRefiner::new(llm.clone(), settings);

        refiner.refine("q", "").await.unwrap();

        assert_eq!(llm.requests()[0].temperature, Some(0.0));
    }
}
