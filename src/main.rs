use std::sync::Arc;

use anyhow::Context;

use multimodal_rag::core::config::{AppPaths, ConfigService, RagSettings};
use multimodal_rag::core::logging;
use multimodal_rag::{ModalityInputs, RagAgent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    let config_service = ConfigService::new(paths.clone());
    let config = config_service
        .load_config()
        .context("Failed to load configuration")?;
    let settings = RagSettings::from_config(&config);

    logging::init(&settings.logging, config_service.paths());
    tracing::debug!(
        "Effective config: {}",
        config_service.redact_sensitive_values(&config)
    );

    let api_key = settings
        .llm
        .resolve_api_key()
        .context("Cannot start without an LLM API key")?;
    let agent = RagAgent::from_settings(&settings, api_key).context("Failed to build RAG agent")?;

    let test_docs = agent
        .retriever()
        .retrieve("Eiffel Tower")
        .await
        .context("Smoke-test retrieval failed")?;
    println!(
        "Test retrieval for 'Eiffel Tower': {} documents retrieved",
        test_docs.len()
    );

    let inputs = ModalityInputs::new(
        Some("Tell me about the Eiffel Tower."),
        Some("A tall iron tower in Paris."),
        Some("Eiffel Tower - located in - Paris; Eiffel Tower - built in - 1889."),
    );

    let response = agent.process_query(&inputs).await?;
    println!("Response: {}", response);

    Ok(())
}
