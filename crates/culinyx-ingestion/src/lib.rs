//! culinyx-ingestion — Cookbook segmentation and chunk-indexing pipeline.
//!
//! Turns one cookbook PDF into a searchable fragment index:
//! - Per-page text extraction
//! - Outline extraction and recipe-boundary resolution
//! - Nearest-preceding-boundary assignment of pages to recipes
//! - Recursive splitting of recipe text into overlapping fragments
//! - Embedding and insertion into a vector store
//!
//! The embedding model and the vector store are injected capabilities
//! (`culinyx-embed`, `culinyx-db`), never ambient singletons.

pub mod assign;
pub mod error;
pub mod indexer;
pub mod models;
pub mod outline;
pub mod pdf;
pub mod pipeline;
pub mod splitter;

pub use error::{IngestError, Result};
pub use indexer::{FailurePolicy, IndexBuilder, IndexSummary};
pub use models::{Fragment, OutlineEntry, Page, Recipe, RecipeBoundary, SegmentConfig};
pub use pipeline::{run_indexing, IndexingJob, IndexingResult};
pub use splitter::SplitterConfig;
