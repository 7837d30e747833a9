pub mod provider;
pub mod types;
pub mod wikipedia;

pub use provider::DocumentRetriever;
pub use types::Document;
pub use wikipedia::WikipediaRetriever;
