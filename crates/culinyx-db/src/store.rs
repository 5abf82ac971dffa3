//! The vector store trait the pipeline is written against.

use async_trait::async_trait;

use crate::error::Result;
use crate::schema::{FragmentRecord, SearchHit};

/// Bulk insert of embedded fragments plus nearest-neighbor search.
///
/// Implementations serialize concurrent writers internally, and each
/// `insert_batch` call lands as a unit: either every record of the batch is
/// visible afterwards or none is.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a batch of records. Returns the number inserted.
    async fn insert_batch(&self, records: Vec<FragmentRecord>) -> Result<usize>;

    /// Return the `k` nearest fragments to `query` by vector distance,
    /// closest first.
    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>>;

    /// Total number of stored fragments.
    async fn count(&self) -> Result<usize>;
}
