//! Index building: embed fragments and insert them into the vector store.
//!
//! The embedder and the store are injected capabilities held behind trait
//! objects. Each batch is embedded, L2-normalized, paired into
//! `FragmentRecord`s (vector and text travel together, so they can never be
//! mismatched) and inserted as a unit.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use culinyx_db::{FragmentRecord, VectorStore};
use culinyx_embed::{l2_normalize, EmbedError, Embedder};

use crate::error::{IngestError, Result};
use crate::models::Fragment;

/// What to do when an embedding batch fails.
///
/// A caller configuration, not a hardcoded policy. Store write failures
/// always propagate regardless.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Propagate the first embedding failure.
    Abort,
    /// Log, count the skipped fragments, and continue with the next batch.
    Skip,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexSummary {
    pub fragments_total: usize,
    pub fragments_indexed: usize,
    pub fragments_skipped: usize,
}

pub struct IndexBuilder {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    policy: FailurePolicy,
}

impl IndexBuilder {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            embedder,
            store,
            policy,
        }
    }

    /// Embed and insert all fragments, batch by batch.
    #[instrument(skip(self, fragments), fields(n = fragments.len(), policy = ?self.policy))]
    pub async fn build(&self, fragments: &[Fragment]) -> Result<IndexSummary> {
        let mut summary = IndexSummary {
            fragments_total: fragments.len(),
            ..Default::default()
        };

        let batch_size = self.embedder.batch_size().max(1);

        for batch in fragments.chunks(batch_size) {
            let texts: Vec<String> = batch.iter().map(|f| f.content.clone()).collect();

            let vectors = match self.embed_checked(&texts).await {
                Ok(v) => v,
                Err(e) => match self.policy {
                    FailurePolicy::Abort => return Err(IngestError::Embedding(e)),
                    FailurePolicy::Skip => {
                        warn!(error = %e, n = batch.len(), "embedding batch failed, skipping");
                        summary.fragments_skipped += batch.len();
                        continue;
                    }
                },
            };

            let records: Vec<FragmentRecord> = batch
                .iter()
                .zip(vectors)
                .map(|(fragment, vector)| {
                    FragmentRecord::new(
                        fragment.content.clone(),
                        fragment.recipe_title.clone(),
                        l2_normalize(&vector),
                    )
                })
                .collect();

            let inserted = self.store.insert_batch(records).await?;
            summary.fragments_indexed += inserted;
            debug!(inserted, "fragment batch stored");
        }

        Ok(summary)
    }

    /// Embed one batch and verify the response arity; a short or misshapen
    /// response is an embedding failure subject to the configured policy.
    async fn embed_checked(
        &self,
        texts: &[String],
    ) -> std::result::Result<Vec<Vec<f32>>, EmbedError> {
        let vectors = self.embedder.embed_batch(texts).await?;
        if vectors.len() != texts.len() {
            return Err(EmbedError::InvalidResponse(format!(
                "got {} vectors for {} fragments",
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}
