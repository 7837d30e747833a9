//! DocumentRetriever trait — abstract interface over external knowledge sources.
//!
//! The production implementation is `WikipediaRetriever` in the `wikipedia` module.

use async_trait::async_trait;

use super::types::Document;
use crate::core::errors::RagError;

#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    /// Short name of the backing source, used in logs.
    fn name(&self) -> &str;

    /// Return documents for a free-text query, in the source's relevance order.
    ///
    /// An empty result is not an error.
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>, RagError>;
}
