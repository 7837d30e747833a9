//! Multimodal retrieval-augmented generation pipeline.
//!
//! A request flows through:
//! 1. `QueryRefiner` / `QueryUnifier` turn modality descriptions into search queries
//! 2. `DocumentFetcher` retrieves per modality and for the unified query, then dedups by title
//! 3. `ResponseGenerator` summarizes each document and synthesizes the answer
//!
//! `RagAgent` wires the stages together.

pub mod agent;
pub mod fetcher;
pub mod modality;
pub mod prompts;
pub mod query;
pub mod responder;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{RagAgent, GENERAL_QUERY, NO_INFORMATION_RESPONSE};
pub use fetcher::{dedup_by_title, DocumentFetcher};
pub use modality::{Modality, ModalityInputs};
pub use query::{QueryRefiner, QueryUnifier};
pub use responder::ResponseGenerator;
