//! Pipeline error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Document unreadable or not paginated. Fatal.
    #[error("Cannot access document: {0}")]
    DocumentAccess(String),

    /// Document has no navigational outline, so recipe boundaries cannot
    /// be determined. Fatal; the pipeline never guesses boundaries.
    #[error("Document has no outline")]
    EmptyOutline,

    /// Outline present but nothing at the configured recipe level. Fatal.
    #[error("No outline entries at level {level}")]
    NoBoundariesAtLevel { level: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Per-batch embedding failure; recoverable under the skip policy.
    #[error("Embedding failed: {0}")]
    Embedding(#[from] culinyx_embed::EmbedError),

    #[error("Store write failed: {0}")]
    StoreWrite(#[from] culinyx_db::StoreError),
}
