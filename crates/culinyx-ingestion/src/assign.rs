//! Page-to-recipe assignment.
//!
//! A sorted merge over two ordered sequences: pages ascending by number and
//! boundaries ascending by start page. Each page resolves to the boundary
//! with the greatest `start_page` at or before it (an "as-of" join); no
//! mutable current-recipe state is threaded through anything else.

use crate::models::{Page, Recipe, RecipeBoundary, SegmentConfig};

/// Assign every in-range page to exactly one recipe and aggregate page text
/// per recipe, in page order.
///
/// - Pages outside `[content_start_page, content_end_page]` are ignored.
/// - Pages before the first boundary are dropped deliberately; they cannot
///   belong to any recipe.
/// - When several boundaries share a start page, the last one in boundary
///   order wins for that page.
/// - Recipes are keyed by title: two boundaries with the same title merge
///   into one recipe, pages in ascending order. Output preserves the
///   first-seen order of titles.
pub fn assign_pages(
    pages: &[Page],
    boundaries: &[RecipeBoundary],
    cfg: &SegmentConfig,
) -> Vec<Recipe> {
    if boundaries.is_empty() {
        return Vec::new();
    }

    let mut in_range: Vec<&Page> = pages.iter().filter(|p| cfg.contains(p.number)).collect();
    in_range.sort_by_key(|p| p.number);

    // Title in first-seen order -> collected page texts. Boundary counts are
    // small (hundreds), so a linear position lookup is fine.
    let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

    let mut cursor = 0usize;
    for page in in_range {
        if page.number < boundaries[0].start_page {
            continue;
        }
        while cursor + 1 < boundaries.len() && boundaries[cursor + 1].start_page <= page.number {
            cursor += 1;
        }
        let title = &boundaries[cursor].title;

        match groups.iter_mut().find(|(t, _)| t == title) {
            Some((_, texts)) => texts.push(&page.text),
            None => groups.push((title.clone(), vec![&page.text])),
        }
    }

    groups
        .into_iter()
        .map(|(title, texts)| Recipe {
            title,
            description: join_page_texts(&texts),
        })
        .collect()
}

/// Join page texts with a single space. Blank pages contribute nothing, so
/// the description never carries runs of whitespace from empty pages.
fn join_page_texts(texts: &[&str]) -> String {
    texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
