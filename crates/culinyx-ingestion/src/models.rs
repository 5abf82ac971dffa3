//! Data models for the segmentation pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// One physical page of the document. `text` may be empty (illustrations,
/// section dividers); the page is kept anyway so page numbers stay aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based, matches the document's pagination.
    pub number: u32,
    pub text: String,
}

/// One entry of the document's navigational outline, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Nesting depth, 1 = top-level section.
    pub level: u32,
    pub title: String,
    pub start_page: u32,
}

/// An outline entry at the recipe-marking level, after filtering and
/// sorting by `start_page`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeBoundary {
    pub title: String,
    pub start_page: u32,
}

/// A recipe with all of its page text aggregated in page order.
/// The title is the identity key: duplicate outline titles collapse into
/// one recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub description: String,
}

/// A bounded-length piece of a recipe's text, the unit that gets embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub content: String,
    pub recipe_title: String,
}

/// Where in the document the recipes live.
///
/// These are document-specific discoveries (which outline level marks a
/// recipe, which page range holds recipe content) supplied as configuration,
/// never inferred or hardcoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Outline level whose entries mark recipe starts.
    pub recipe_level: u32,
    /// First page (inclusive) eligible to contain recipe content.
    pub content_start_page: u32,
    /// Last page (inclusive) eligible to contain recipe content.
    pub content_end_page: u32,
}

impl SegmentConfig {
    pub fn new(recipe_level: u32, content_start_page: u32, content_end_page: u32) -> Result<Self> {
        let cfg = Self {
            recipe_level,
            content_start_page,
            content_end_page,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.recipe_level == 0 {
            return Err(IngestError::InvalidConfig(
                "recipe_level must be at least 1".to_string(),
            ));
        }
        if self.content_start_page == 0 {
            return Err(IngestError::InvalidConfig(
                "content_start_page must be at least 1".to_string(),
            ));
        }
        if self.content_end_page < self.content_start_page {
            return Err(IngestError::InvalidConfig(format!(
                "content_end_page {} is before content_start_page {}",
                self.content_end_page, self.content_start_page
            )));
        }
        Ok(())
    }

    pub fn contains(&self, page_number: u32) -> bool {
        page_number >= self.content_start_page && page_number <= self.content_end_page
    }
}
