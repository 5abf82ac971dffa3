//! Recipe boundary resolution.
//!
//! Filters the document outline down to the entries that mark recipe starts
//! and restricts them to the configured content page range.

use crate::models::{OutlineEntry, RecipeBoundary, SegmentConfig};

/// Resolve the outline entries that mark recipe boundaries.
///
/// Keeps entries at `cfg.recipe_level` whose `start_page` falls inside the
/// content range, sorted ascending by `start_page`. The sort is stable, so
/// two boundaries sharing a page keep their outline order — assignment then
/// resolves that page to the later, more specific title.
///
/// An empty result is not an error here; the pipeline decides whether it
/// is fatal.
pub fn resolve_boundaries(outline: &[OutlineEntry], cfg: &SegmentConfig) -> Vec<RecipeBoundary> {
    let mut boundaries: Vec<RecipeBoundary> = outline
        .iter()
        .filter(|e| e.level == cfg.recipe_level && cfg.contains(e.start_page))
        .map(|e| RecipeBoundary {
            title: e.title.clone(),
            start_page: e.start_page,
        })
        .collect();

    // The source outline is not guaranteed to list entries in page order.
    boundaries.sort_by_key(|b| b.start_page);
    boundaries
}
