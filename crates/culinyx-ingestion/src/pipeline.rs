//! End-to-end indexing pipeline.
//!
//! Orchestrates the full flow for one cookbook:
//!   1. Open the PDF
//!   2. Extract per-page text and the outline
//!   3. Resolve recipe boundaries at the configured level
//!   4. Assign pages to recipes (nearest preceding boundary)
//!   5. Split recipe descriptions into overlapping fragments
//!   6. Embed fragments and insert them into the vector store
//!
//! Stages 1-5 are pure, synchronous, in-memory transformations; only stage 6
//! touches the network or disk. Fatal errors (unreadable document, missing
//! outline, no boundaries at the configured level) abort before anything is
//! written to the store.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use culinyx_db::VectorStore;
use culinyx_embed::Embedder;

use crate::assign::assign_pages;
use crate::error::{IngestError, Result};
use crate::indexer::{FailurePolicy, IndexBuilder};
use crate::models::{Fragment, SegmentConfig};
use crate::outline::resolve_boundaries;
use crate::pdf::PdfDocument;
use crate::splitter::{split_recipe, SplitterConfig};

/// Parameters for one indexing run.
#[derive(Debug, Clone)]
pub struct IndexingJob {
    pub pdf_path: PathBuf,
    pub segment: SegmentConfig,
    pub splitter: SplitterConfig,
    pub failure_policy: FailurePolicy,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct IndexingResult {
    pub recipes: usize,
    pub fragments_total: usize,
    pub fragments_indexed: usize,
    pub fragments_skipped: usize,
    pub duration_ms: u64,
}

/// Run the full segmentation and indexing pipeline for one document.
#[instrument(skip(job, embedder, store), fields(pdf = %job.pdf_path.display()))]
pub async fn run_indexing(
    job: IndexingJob,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
) -> Result<IndexingResult> {
    let t0 = std::time::Instant::now();
    job.segment.validate()?;

    // ── 1-2. Pages and outline ────────────────────────────────────────────
    let document = PdfDocument::load(&job.pdf_path)?;
    let pages = document.extract_pages();
    let outline = document.extract_outline();
    info!(pages = pages.len(), outline_entries = outline.len(), "document extracted");

    if outline.is_empty() {
        return Err(IngestError::EmptyOutline);
    }

    // ── 3. Recipe boundaries ──────────────────────────────────────────────
    let boundaries = resolve_boundaries(&outline, &job.segment);
    if boundaries.is_empty() {
        return Err(IngestError::NoBoundariesAtLevel {
            level: job.segment.recipe_level,
        });
    }
    info!(boundaries = boundaries.len(), "recipe boundaries resolved");

    // ── 4. Pages → recipes ────────────────────────────────────────────────
    let recipes = assign_pages(&pages, &boundaries, &job.segment);
    info!(recipes = recipes.len(), "pages assigned to recipes");

    // ── 5. Recipes → fragments ────────────────────────────────────────────
    let mut fragments: Vec<Fragment> = Vec::new();
    for recipe in &recipes {
        fragments.extend(split_recipe(recipe, &job.splitter));
    }
    info!(fragments = fragments.len(), "recipe descriptions split");

    // ── 6. Embed and store ────────────────────────────────────────────────
    let builder = IndexBuilder::new(embedder, store, job.failure_policy);
    let summary = builder.build(&fragments).await?;

    let result = IndexingResult {
        recipes: recipes.len(),
        fragments_total: summary.fragments_total,
        fragments_indexed: summary.fragments_indexed,
        fragments_skipped: summary.fragments_skipped,
        duration_ms: t0.elapsed().as_millis() as u64,
    };

    info!(
        recipes = result.recipes,
        fragments = result.fragments_total,
        indexed = result.fragments_indexed,
        skipped = result.fragments_skipped,
        duration_ms = result.duration_ms,
        "indexing pipeline complete"
    );

    Ok(result)
}
