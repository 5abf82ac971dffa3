//! Error types for the embedding capability.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbedError>;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for EmbedError {
    fn from(err: reqwest::Error) -> Self {
        EmbedError::Http(err.to_string())
    }
}
