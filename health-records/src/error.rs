use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RecordsResult<T> = Result<T, RecordsError>;
