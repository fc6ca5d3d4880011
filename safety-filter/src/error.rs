use thiserror::Error;

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SafetyResult<T> = Result<T, SafetyError>;
