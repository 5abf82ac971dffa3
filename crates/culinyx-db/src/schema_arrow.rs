//! Arrow conversion for the fragments table.
//!
//! LanceDB stores Arrow record batches, so rows have to be converted by hand.
//! The embedding column is a `FixedSizeList<Float32>` whose width is the
//! store's configured dimension, not a compile-time constant.

use crate::error::{Result, StoreError};
use crate::schema::{FragmentRecord, SearchHit};
use arrow_array::{Array, FixedSizeListArray, Float32Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

pub fn fragment_schema(dim: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("content", DataType::Utf8, false),
        Field::new("recipe", DataType::Utf8, false),
        Field::new("created_at", DataType::Utf8, false),
        Field::new(
            "embedding",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, false)),
                dim as i32,
            ),
            false,
        ),
    ]))
}

pub fn fragment_to_record(fragment: &FragmentRecord, dim: usize) -> Result<RecordBatch> {
    if fragment.embedding.len() != dim {
        return Err(StoreError::DimensionMismatch {
            expected: dim,
            actual: fragment.embedding.len(),
        });
    }

    let schema = fragment_schema(dim);

    let id = StringArray::from(vec![fragment.id.to_string()]);
    let content = StringArray::from(vec![fragment.content.as_str()]);
    let recipe = StringArray::from(vec![fragment.recipe.as_str()]);
    let created_at = StringArray::from(vec![fragment.created_at.to_rfc3339()]);

    let values = Float32Array::from(fragment.embedding.clone());
    let field = Arc::new(Field::new("item", DataType::Float32, false));
    let embedding = FixedSizeListArray::try_new(field, dim as i32, Arc::new(values), None)
        .map_err(|e| StoreError::Arrow(e.to_string()))?;

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(id) as Arc<dyn Array>,
            Arc::new(content),
            Arc::new(recipe),
            Arc::new(created_at),
            Arc::new(embedding),
        ],
    )
    .map_err(|e| StoreError::Arrow(e.to_string()))
}

/// Read one row of a vector-search result batch into a [`SearchHit`].
///
/// LanceDB appends a `_distance` column to search results; plain scans do
/// not have it, in which case the distance comes back as 0.
pub fn record_to_hit(batch: &RecordBatch, row: usize) -> Result<SearchHit> {
    let get_string = |name: &str| -> Result<String> {
        let col = batch
            .column_by_name(name)
            .ok_or_else(|| StoreError::Arrow(format!("missing column {name}")))?;
        let arr = col
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| StoreError::Arrow(format!("column {name} is not utf8")))?;
        Ok(arr.value(row).to_string())
    };

    let distance = match batch.column_by_name("_distance") {
        Some(col) => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| StoreError::Arrow("column _distance is not f32".to_string()))?
            .value(row),
        None => 0.0,
    };

    Ok(SearchHit {
        content: get_string("content")?,
        recipe: get_string("recipe")?,
        distance,
    })
}
