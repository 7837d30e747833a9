use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;

use super::modality::{Modality, ModalityInputs};
use super::query::{QueryRefiner, QueryUnifier};
use crate::core::errors::RagError;
use crate::retriever::provider::DocumentRetriever;
use crate::retriever::types::Document;

/// Retrieves once per present modality plus once for the unified query, then
/// deduplicates by title. Retrieval failures are logged and skipped.
#[derive(Clone)]
pub struct DocumentFetcher {
    retriever: Arc<dyn DocumentRetriever>,
    refiner: QueryRefiner,
    unifier: QueryUnifier,
    concurrent_modalities: bool,
}

impl DocumentFetcher {
    pub fn new(
        retriever: Arc<dyn DocumentRetriever>,
        refiner: QueryRefiner,
        unifier: QueryUnifier,
    ) -> Self {
        Self {
            retriever,
            refiner,
            unifier,
            concurrent_modalities: false,
        }
    }

    /// Issue the per-modality pipelines together; results keep modality order.
    pub fn with_concurrent_modalities(mut self, enabled: bool) -> Self {
        self.concurrent_modalities = enabled;
        self
    }

    pub async fn fetch(&self, inputs: &ModalityInputs) -> Vec<Document> {
        let full_context = inputs.combined_description();
        let present = inputs.present();

        let per_modality: Vec<Vec<Document>> = if self.concurrent_modalities {
            join_all(
                present
                    .iter()
                    .map(|(modality, query)| self.fetch_modality(*modality, query, &full_context)),
            )
            .await
        } else {
            let mut results = Vec::with_capacity(present.len());
            for (modality, query) in &present {
                results.push(self.fetch_modality(*modality, query, &full_context).await);
            }
            results
        };

        let mut all_docs: Vec<Document> = per_modality.into_iter().flatten().collect();

        match self.fetch_unified(inputs).await {
            Ok(docs) => all_docs.extend(docs),
            Err(err) => {
                tracing::warn!("Error retrieving documents for unified query: {}", err);
            }
        }

        let total = all_docs.len();
        let unique = dedup_by_title(all_docs);
        tracing::info!(
            "Retrieved {} documents ({} after deduplication)",
            total,
            unique.len()
        );
        unique
    }

    async fn fetch_modality(
        &self,
        modality: Modality,
        query: &str,
        full_context: &str,
    ) -> Vec<Document> {
        match self.refine_and_retrieve(query, full_context).await {
            Ok((refined, docs)) => {
                if docs.is_empty() {
                    tracing::warn!(
                        "No documents retrieved for {} query: {}",
                        modality,
                        refined
                    );
                } else {
                    tracing::debug!(
                        "{} documents retrieved for {} query: {}",
                        docs.len(),
                        modality,
                        refined
                    );
                }
                docs
            }
            Err(err) => {
                tracing::warn!("Error retrieving documents for {} query: {}", modality, err);
                Vec::new()
            }
        }
    }

    async fn refine_and_retrieve(
        &self,
        query: &str,
        full_context: &str,
    ) -> Result<(String, Vec<Document>), RagError> {
        let refined = self.refiner.refine(query, full_context).await?;
        let docs = self.retriever.retrieve(&refined).await?;
        Ok((refined, docs))
    }

    async fn fetch_unified(&self, inputs: &ModalityInputs) -> Result<Vec<Document>, RagError> {
        let unified = self.unifier.unify(inputs).await?;
        let docs = self.retriever.retrieve(&unified).await?;
        if docs.is_empty() {
            tracing::warn!("No documents retrieved for unified query: {}", unified.trim());
        }
        Ok(docs)
    }
}

/// Keeps the first document seen for each title; missing and empty titles share one slot.
pub fn dedup_by_title(documents: Vec<Document>) -> Vec<Document> {
    let mut seen: HashSet<String> = HashSet::with_capacity(documents.len());
    let mut unique = Vec::with_capacity(documents.len());
    for doc in documents {
        if seen.insert(doc.title().to_string()) {
            unique.push(doc);
        }
    }
    unique
}
