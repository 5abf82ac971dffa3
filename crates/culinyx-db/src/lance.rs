//! LanceDB-backed vector store.

use arrow_array::RecordBatchIterator;
use async_trait::async_trait;
use futures::StreamExt;
use lancedb::connection::Connection;
use lancedb::query::{ExecutableQuery, QueryBase};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::schema::{FragmentRecord, SearchHit, TABLE_FRAGMENTS};
use crate::schema_arrow::{fragment_schema, fragment_to_record, record_to_hit};
use crate::store::VectorStore;

/// Embedded LanceDB store for recipe fragments.
///
/// The embedding dimension is fixed per store at connect time; it shapes the
/// table schema and every insert is checked against it.
pub struct LanceStore {
    conn: Connection,
    dim: usize,
    // Concurrent writers to the same table must not interleave batches.
    write_lock: Mutex<()>,
}

impl LanceStore {
    /// Open or create a store at `path` with `dim`-wide embeddings.
    pub async fn connect(path: impl AsRef<Path>, dim: usize) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        if !path.as_ref().exists() {
            std::fs::create_dir_all(path.as_ref())?;
        }

        let conn = lancedb::connect(&path_str).execute().await?;

        let store = Self {
            conn,
            dim,
            write_lock: Mutex::new(()),
        };
        store.initialize().await?;
        Ok(store)
    }

    /// Create the fragments table if it does not exist.
    ///
    /// LanceDB requires a schema-bearing (possibly empty) batch iterator to
    /// create a table.
    async fn initialize(&self) -> Result<()> {
        if self.table_exists().await? {
            return Ok(());
        }

        let schema = fragment_schema(self.dim);
        let empty_iter = RecordBatchIterator::new(vec![], schema);
        self.conn
            .create_table(TABLE_FRAGMENTS, empty_iter)
            .execute()
            .await?;

        debug!(dim = self.dim, "fragments table created");
        Ok(())
    }

    async fn table_exists(&self) -> Result<bool> {
        let tables = self.conn.table_names().execute().await?;
        Ok(tables.contains(&TABLE_FRAGMENTS.to_string()))
    }
}

#[async_trait]
impl VectorStore for LanceStore {
    async fn insert_batch(&self, records: Vec<FragmentRecord>) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let batches: Vec<arrow_array::RecordBatch> = records
            .iter()
            .map(|r| fragment_to_record(r, self.dim))
            .collect::<Result<_>>()?;

        let _guard = self.write_lock.lock().await;

        let table = self
            .conn
            .open_table(TABLE_FRAGMENTS)
            .execute()
            .await?;

        let schema = batches[0].schema();
        let iter = RecordBatchIterator::new(batches.into_iter().map(Ok), schema);
        table.add(iter).execute().await?;

        Ok(records.len())
    }

    async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dim {
            return Err(StoreError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }

        let table = self
            .conn
            .open_table(TABLE_FRAGMENTS)
            .execute()
            .await?;

        let mut stream = table
            .vector_search(query.to_vec())?
            .limit(k)
            .execute()
            .await?;

        let mut hits = Vec::new();
        while let Some(batch) = stream.next().await {
            let batch = batch?;
            for i in 0..batch.num_rows() {
                hits.push(record_to_hit(&batch, i)?);
            }
        }

        Ok(hits)
    }

    async fn count(&self) -> Result<usize> {
        let table = self
            .conn
            .open_table(TABLE_FRAGMENTS)
            .execute()
            .await?;
        Ok(table.count_rows(None).await?)
    }
}
