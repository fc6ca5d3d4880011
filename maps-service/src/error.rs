use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapsError {
    #[error("Routing error: {0}")]
    Routing(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type MapsResult<T> = Result<T, MapsError>;
