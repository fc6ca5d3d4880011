use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model response error: {0}")]
    ModelResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Knowledge index error: {0}")]
    Index(#[from] knowledge_index::IndexError),
}

pub type TriageResult<T> = Result<T, TriageError>;
