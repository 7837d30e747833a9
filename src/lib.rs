pub mod core;
pub mod llm;
pub mod rag;
pub mod retriever;

pub use crate::core::errors::RagError;
pub use crate::rag::{ModalityInputs, RagAgent};
pub use crate::retriever::Document;

#[cfg(test)]
pub(crate) mod test_support;
