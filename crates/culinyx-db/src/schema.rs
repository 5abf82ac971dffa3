//! Row types stored and returned by the vector store.

use serde::{Deserialize, Serialize};

/// Name of the single fragments table.
pub const TABLE_FRAGMENTS: &str = "fragments";

/// An embedded recipe fragment ready for insertion.
///
/// Carries the vector and the text it was computed from in one struct, so a
/// fragment can never be inserted with someone else's embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentRecord {
    pub id: uuid::Uuid,
    pub content: String,
    /// Title of the recipe this fragment was cut from.
    pub recipe: String,
    pub embedding: Vec<f32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl FragmentRecord {
    pub fn new(content: String, recipe: String, embedding: Vec<f32>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            content,
            recipe,
            embedding,
            created_at: chrono::Utc::now(),
        }
    }
}

/// One similarity query result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub content: String,
    pub recipe: String,
    /// Vector distance to the query; smaller is closer.
    pub distance: f32,
}
