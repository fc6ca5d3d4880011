use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response parse error: {0}")]
    Parse(String),
}

pub type TranslationResult<T> = Result<T, TranslationError>;
