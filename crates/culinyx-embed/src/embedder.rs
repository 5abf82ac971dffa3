//! Embedding client — turns fragment text into fixed-length vectors.
//!
//! Supported backends:
//!   - OpenAI-compatible  (any /v1/embeddings endpoint)
//!   - Ollama             (nomic-embed-text or any ollama embedding model)
//!
//! The pipeline depends on the [`Embedder`] trait only, so tests can
//! substitute a deterministic fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::{EmbedBackend, EmbeddingConfig};
use crate::error::{EmbedError, Result};

/// Embedding capability: text in, fixed-length vector out.
///
/// Output order matches input order; `embed_batch` returns exactly one
/// vector of `dimension()` floats per input text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
    fn dimension(&self) -> usize;
    fn batch_size(&self) -> usize;
}

// ── HTTP client ───────────────────────────────────────────────────────────────

pub struct HttpEmbedder {
    cfg:    EmbeddingConfig,
    client: reqwest::Client,
}

impl HttpEmbedder {
    pub fn new(cfg: EmbeddingConfig) -> Self {
        Self { cfg, client: reqwest::Client::new() }
    }

    pub fn config(&self) -> &EmbeddingConfig {
        &self.cfg
    }

    // ── OpenAI-compatible ──────────────────────────────────────────────────

    async fn embed_compat(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let base = self.cfg.base_url.as_deref()
            .unwrap_or("https://api.openai.com").trim_end_matches('/');
        let url = format!("{}/v1/embeddings", base);

        let body = CompatRequest { model: &self.cfg.model, input: texts };
        let mut req = self.client.post(&url).json(&body);
        if let Some(ref k) = self.cfg.api_key {
            req = req.bearer_auth(k);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(EmbedError::Backend(format!(
                "{url} returned HTTP {}", resp.status()
            )));
        }

        let mut parsed: CompatResponse = resp.json().await?;
        parsed.data.sort_by_key(|e| e.index);
        Ok(parsed.data.into_iter().map(|e| e.embedding).collect())
    }

    // ── Ollama ─────────────────────────────────────────────────────────────

    async fn embed_ollama(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let base = self.cfg.base_url.as_deref()
            .unwrap_or("http://localhost:11434").trim_end_matches('/');
        let url = format!("{}/api/embeddings", base);

        // Ollama's embeddings endpoint takes one prompt per call.
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let body = OllamaRequest { model: &self.cfg.model, prompt: text };
            let resp = self.client.post(&url).json(&body).send().await?;
            if !resp.status().is_success() {
                return Err(EmbedError::Backend(format!(
                    "{url} returned HTTP {}", resp.status()
                )));
            }
            let parsed: OllamaResponse = resp.json().await?;
            out.push(parsed.embedding);
        }
        Ok(out)
    }

    /// N inputs must yield N vectors of the configured dimension.
    fn check_arity(&self, n_inputs: usize, vectors: &[Vec<f32>]) -> Result<()> {
        if vectors.len() != n_inputs {
            return Err(EmbedError::InvalidResponse(format!(
                "backend returned {} embeddings for {} inputs",
                vectors.len(), n_inputs
            )));
        }
        for v in vectors {
            if v.len() != self.cfg.dim {
                return Err(EmbedError::InvalidResponse(format!(
                    "expected {}-dim vectors, got {}", self.cfg.dim, v.len()
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    #[instrument(skip(self, texts), fields(n = texts.len(), backend = ?self.cfg.backend))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }
        let vectors = match self.cfg.backend {
            EmbedBackend::OpenAiCompatible => self.embed_compat(texts).await?,
            EmbedBackend::Ollama           => self.embed_ollama(texts).await?,
        };
        self.check_arity(texts.len(), &vectors)?;
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.cfg.dim
    }

    fn batch_size(&self) -> usize {
        self.cfg.batch_size
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompatRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct CompatResponse {
    data: Vec<CompatEmbedding>,
}

#[derive(Deserialize)]
struct CompatEmbedding {
    index:     usize,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model:  &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    embedding: Vec<f32>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
