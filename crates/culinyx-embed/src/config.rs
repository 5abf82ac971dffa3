//! Configuration for the HTTP embedding client.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub backend:    EmbedBackend,
    /// Model name passed to the backend.
    pub model:      String,
    /// Expected vector dimension; responses of any other arity are rejected.
    pub dim:        usize,
    /// Texts per request.
    pub batch_size: usize,
    pub base_url:   Option<String>,
    pub api_key:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedBackend {
    /// Any `/v1/embeddings` endpoint (OpenAI, Groq, Together, LM Studio, …).
    OpenAiCompatible,
    Ollama,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend:    EmbedBackend::Ollama,
            model:      "nomic-embed-text".to_string(),
            dim:        768,
            batch_size: 32,
            base_url:   None,
            api_key:    None,
        }
    }
}

impl EmbeddingConfig {
    /// Use a custom model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected vector dimension.
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    /// Set batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Point the client at a non-default endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}
