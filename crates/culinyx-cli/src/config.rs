//! Configuration loading for the culinyx binary.
//! Reads culinyx.toml from the current directory or the path in the
//! CULINYX_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

use culinyx_embed::EmbedBackend;
use culinyx_ingestion::FailurePolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub document: DocumentConfig,
    #[serde(default)]
    pub splitter: SplitterSection,
    #[serde(default)]
    pub embedding: EmbeddingSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub indexer: IndexerSection,
}

/// Where the cookbook lives and how its outline marks recipes. These are
/// per-document discoveries; there are no sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub path: String,
    pub recipe_level: u32,
    pub content_start_page: u32,
    pub content_end_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterSection {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

fn default_max_chars() -> usize { 1000 }
fn default_overlap()   -> usize { 100 }

impl Default for SplitterSection {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            overlap: default_overlap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSection {
    #[serde(default = "default_backend")]
    pub backend: EmbedBackend,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_dim")]
    pub dim: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

fn default_backend()    -> EmbedBackend { EmbedBackend::Ollama }
fn default_model()      -> String { "nomic-embed-text".to_string() }
fn default_dim()        -> usize { 768 }
fn default_batch_size() -> usize { 32 }

impl Default for EmbeddingSection {
    fn default() -> Self {
        Self {
            backend:    default_backend(),
            model:      default_model(),
            dim:        default_dim(),
            batch_size: default_batch_size(),
            base_url:   None,
            api_key:    None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String { "./data/culinyx.db".to_string() }

impl Default for StoreSection {
    fn default() -> Self {
        Self { path: default_store_path() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerSection {
    #[serde(default = "default_failure_policy")]
    pub on_embed_failure: FailurePolicy,
}

fn default_failure_policy() -> FailurePolicy { FailurePolicy::Abort }

impl Default for IndexerSection {
    fn default() -> Self {
        Self { on_embed_failure: default_failure_policy() }
    }
}

impl Config {
    /// Load configuration from culinyx.toml.
    /// Checks CULINYX_CONFIG env var first, then the current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CULINYX_CONFIG")
            .unwrap_or_else(|_| "culinyx.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Copy culinyx.example.toml to culinyx.toml and edit it.",
                path
            );
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[document]
path = "cookbook.pdf"
recipe_level = 2
content_start_page = 12
content_end_page = 240
"#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.document.recipe_level, 2);
        assert_eq!(config.splitter.max_chars, 1000);
        assert_eq!(config.splitter.overlap, 100);
        assert_eq!(config.embedding.backend, EmbedBackend::Ollama);
        assert_eq!(config.embedding.dim, 768);
        assert_eq!(config.store.path, "./data/culinyx.db");
        assert_eq!(config.indexer.on_embed_failure, FailurePolicy::Abort);
    }

    #[test]
    fn sections_override_defaults() {
        let toml_text = format!(
            "{MINIMAL}\n\
             [splitter]\nmax_chars = 500\noverlap = 50\n\n\
             [embedding]\nbackend = \"openaicompatible\"\nmodel = \"text-embedding-3-small\"\ndim = 1536\n\n\
             [indexer]\non_embed_failure = \"skip\"\n"
        );
        let config: Config = toml::from_str(&toml_text).unwrap();
        assert_eq!(config.splitter.max_chars, 500);
        assert_eq!(config.embedding.backend, EmbedBackend::OpenAiCompatible);
        assert_eq!(config.embedding.dim, 1536);
        assert_eq!(config.indexer.on_embed_failure, FailurePolicy::Skip);
    }

    #[test]
    fn missing_file_mentions_the_example() {
        let err = Config::load_from("/nonexistent/culinyx.toml").unwrap_err();
        assert!(err.to_string().contains("culinyx.example.toml"));
    }
}
