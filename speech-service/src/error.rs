use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No speech recognized")]
    NoMatch,

    #[error("Recognition canceled: {0}")]
    Canceled(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SpeechResult<T> = Result<T, SpeechError>;
