//! culinyx-embed — Embedding capability for the indexing pipeline.
//!
//! Exposes the [`Embedder`] trait plus an HTTP client implementation
//! covering OpenAI-compatible `/v1/embeddings` endpoints and Ollama.
//! The pipeline never talks to a concrete backend directly; it holds an
//! `Arc<dyn Embedder>` injected by the caller.

pub mod config;
pub mod embedder;
pub mod error;
pub mod normalize;

pub use config::{EmbedBackend, EmbeddingConfig};
pub use embedder::{Embedder, HttpEmbedder};
pub use error::{EmbedError, Result};
pub use normalize::l2_normalize;
