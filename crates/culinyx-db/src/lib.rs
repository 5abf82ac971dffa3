//! culinyx-db — Vector store capability for indexed recipe fragments.
//!
//! This crate provides the [`VectorStore`] trait plus two implementations:
//!
//! - [`LanceStore`]: embedded LanceDB table (no external server required),
//!   columnar storage with native vector similarity search.
//! - [`MemoryStore`]: brute-force in-memory store for tests and small corpora.
//!
//! The store owns persistence; callers only hand it `(vector, text, metadata)`
//! rows and issue similarity queries.

pub mod error;
pub mod lance;
pub mod memory;
pub mod schema;
pub mod schema_arrow;
pub mod store;

pub use error::{Result, StoreError};
pub use lance::LanceStore;
pub use memory::MemoryStore;
pub use schema::{FragmentRecord, SearchHit};
pub use store::VectorStore;
