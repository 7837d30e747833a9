use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("llm error: {0}")]
    Llm(String),
    #[error("retrieval error: {0}")]
    Retrieval(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("API key not found. Set the {env_var} environment variable")]
    MissingApiKey { env_var: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl RagError {
    pub fn llm<E: std::fmt::Display>(err: E) -> Self {
        RagError::Llm(err.to_string())
    }

    pub fn retrieval<E: std::fmt::Display>(err: E) -> Self {
        RagError::Retrieval(err.to_string())
    }

    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        RagError::Internal(err.to_string())
    }
}
