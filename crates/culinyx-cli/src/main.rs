//! culinyx — cookbook recipe indexing and similarity search.
//! Entry point for the CLI binary.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use culinyx_db::{LanceStore, VectorStore};
use culinyx_embed::{Embedder, EmbeddingConfig, HttpEmbedder};
use culinyx_ingestion::{run_indexing, IndexingJob, SegmentConfig, SplitterConfig};

use config::Config;

#[derive(Parser)]
#[command(name = "culinyx", about = "Segment a cookbook PDF into recipes and index them for similarity search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline against the configured document.
    Index,
    /// Find the fragments most similar to a query text.
    Search {
        query: String,
        /// Number of fragments to return.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("culinyx=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load()?;

    let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(EmbeddingConfig {
        backend:    cfg.embedding.backend.clone(),
        model:      cfg.embedding.model.clone(),
        dim:        cfg.embedding.dim,
        batch_size: cfg.embedding.batch_size,
        base_url:   cfg.embedding.base_url.clone(),
        api_key:    cfg.embedding.api_key.clone(),
    }));

    let store: Arc<dyn VectorStore> = Arc::new(
        LanceStore::connect(&cfg.store.path, cfg.embedding.dim)
            .await
            .with_context(|| format!("opening store at {}", cfg.store.path))?,
    );

    match cli.command {
        Commands::Index => {
            let job = IndexingJob {
                pdf_path: PathBuf::from(&cfg.document.path),
                segment: SegmentConfig::new(
                    cfg.document.recipe_level,
                    cfg.document.content_start_page,
                    cfg.document.content_end_page,
                )?,
                splitter: SplitterConfig::new(cfg.splitter.max_chars, cfg.splitter.overlap)?,
                failure_policy: cfg.indexer.on_embed_failure,
            };

            let result = run_indexing(job, embedder, store).await?;
            println!(
                "Indexed {} fragments from {} recipes in {} ms ({} skipped).",
                result.fragments_indexed,
                result.recipes,
                result.duration_ms,
                result.fragments_skipped,
            );
        }
        Commands::Search { query, limit } => {
            let vectors = embedder.embed_batch(&[query.clone()]).await?;
            let query_vec = vectors
                .into_iter()
                .next()
                .context("embedder returned no vector for the query")?;

            let hits = store.search(&query_vec, limit).await?;
            if hits.is_empty() {
                println!("No fragments indexed yet. Run `culinyx index` first.");
                return Ok(());
            }
            for (i, hit) in hits.iter().enumerate() {
                println!("{}. [{}] (distance {:.4})", i + 1, hit.recipe, hit.distance);
                println!("   {}", hit.content);
            }
        }
    }

    Ok(())
}
