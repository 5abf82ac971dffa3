//! Brute-force in-memory vector store.
//!
//! Linear cosine-distance scan over a `Vec` behind an `RwLock`. Plenty for
//! tests and for corpora in the low thousands of fragments.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StoreError};
use crate::schema::{FragmentRecord, SearchHit};
use crate::store::VectorStore;

pub struct MemoryStore {
    dim: usize,
    records: RwLock<Vec<FragmentRecord>>,
}

impl MemoryStore {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            records: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn insert_batch(&self, records: Vec<FragmentRecord>) -> Result<usize> {
        // Validate the whole batch before touching the store, so a bad row
        // cannot leave a partial insert behind.
        for r in &records {
            if r.embedding.len() != self.dim {
                return Err(StoreError::DimensionMismatch {
                    expected: self.dim,
                    actual: r.embedding.len(),
                });
            }
        }

        let n = records.len();
        self.records.write().await.extend(records);
        Ok(n)
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dim {
            return Err(StoreError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }

        let records = self.records.read().await;
        let mut hits: Vec<SearchHit> = records
            .iter()
            .map(|r| SearchHit {
                content: r.content.clone(),
                recipe: r.recipe.clone(),
                distance: 1.0 - cosine_similarity(query, &r.embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        Ok(hits)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}

/// Cosine similarity with a zero-magnitude guard.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
