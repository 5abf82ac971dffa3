//! PDF access: per-page text extraction and outline extraction.
//!
//! Wraps `lopdf`. Two capabilities are exposed, matching what the rest of
//! the pipeline needs from any document source:
//!   - `extract_pages`: one entry per physical page, in document order
//!   - `extract_outline`: the bookmark tree as `(level, title, start_page)`
//!     entries in native outline order

use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Dictionary, Object, ObjectId};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::models::{OutlineEntry, Page};

#[derive(Debug)]
pub struct PdfDocument {
    doc: lopdf::Document,
}

impl PdfDocument {
    /// Open a PDF. Fails if the file cannot be read or contains no pages.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = lopdf::Document::load(path)
            .map_err(|e| IngestError::DocumentAccess(format!("{}: {e}", path.display())))?;

        if doc.get_pages().is_empty() {
            return Err(IngestError::DocumentAccess(format!(
                "{}: document has no pages",
                path.display()
            )));
        }

        Ok(Self { doc })
    }

    /// Extract text for every page, in document order.
    ///
    /// A page whose content stream fails to decode degrades to an empty
    /// string rather than aborting the run; blank pages are expected
    /// (illustrations, section dividers) and the entry is kept so page
    /// numbers stay aligned.
    pub fn extract_pages(&self) -> Vec<Page> {
        self.doc
            .get_pages()
            .keys()
            .map(|&number| {
                let text = self.doc.extract_text(&[number]).unwrap_or_else(|e| {
                    debug!(page = number, error = %e, "page text extraction failed");
                    String::new()
                });
                Page { number, text }
            })
            .collect()
    }

    /// Walk the outline tree and return entries in native outline order.
    ///
    /// Returns an empty Vec when the document has no outline; the caller
    /// decides whether that is fatal (the pipeline fails fast instead of
    /// guessing boundaries).
    pub fn extract_outline(&self) -> Vec<OutlineEntry> {
        let mut entries = Vec::new();

        // Destinations reference page objects; map them back to page numbers.
        let page_numbers: HashMap<ObjectId, u32> = self
            .doc
            .get_pages()
            .iter()
            .map(|(number, id)| (*id, *number))
            .collect();

        let Ok(catalog) = self.doc.catalog() else {
            return entries;
        };
        let Some(root_id) = catalog
            .get(b"Outlines")
            .ok()
            .and_then(|o| o.as_reference().ok())
        else {
            return entries;
        };
        let Ok(root) = self.doc.get_dictionary(root_id) else {
            return entries;
        };

        if let Some(first) = root.get(b"First").ok().and_then(|o| o.as_reference().ok()) {
            let mut seen = HashSet::new();
            self.walk_outline(first, 1, &page_numbers, &mut entries, &mut seen);
        }

        entries
    }

    fn walk_outline(
        &self,
        first: ObjectId,
        level: u32,
        page_numbers: &HashMap<ObjectId, u32>,
        entries: &mut Vec<OutlineEntry>,
        seen: &mut HashSet<ObjectId>,
    ) {
        let mut current = Some(first);
        while let Some(id) = current {
            // Malformed outlines can contain cycles.
            if !seen.insert(id) {
                break;
            }
            let Ok(item) = self.doc.get_dictionary(id) else {
                break;
            };

            let title = item
                .get(b"Title")
                .ok()
                .and_then(|o| self.resolve(o).as_str().ok())
                .and_then(decode_pdf_string);
            let start_page = self.destination_page(item, page_numbers);

            match (title, start_page) {
                (Some(title), Some(start_page)) => {
                    entries.push(OutlineEntry { level, title, start_page });
                }
                (title, _) => {
                    debug!(?title, level, "skipping outline entry without resolvable target page");
                }
            }

            if let Some(child) = item.get(b"First").ok().and_then(|o| o.as_reference().ok()) {
                self.walk_outline(child, level + 1, page_numbers, entries, seen);
            }

            current = item.get(b"Next").ok().and_then(|o| o.as_reference().ok());
        }
    }

    /// Resolve an outline item's target to a page number.
    ///
    /// Handles direct `/Dest` arrays and `/A` GoTo actions with a `/D`
    /// array. Named destinations are not resolved; such entries are skipped.
    fn destination_page(
        &self,
        item: &Dictionary,
        page_numbers: &HashMap<ObjectId, u32>,
    ) -> Option<u32> {
        let dest = match item.get(b"Dest") {
            Ok(dest) => dest,
            Err(_) => {
                let action = self.resolve(item.get(b"A").ok()?);
                action.as_dict().ok()?.get(b"D").ok()?
            }
        };

        let dest = self.resolve(dest);
        let array = dest.as_array().ok()?;
        let page_ref = array.first()?.as_reference().ok()?;
        page_numbers.get(&page_ref).copied()
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(object),
            other => other,
        }
    }
}

/// Decode PDF string bytes: UTF-16BE with BOM, then UTF-8, then Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    let decoded = if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16(&units).ok()?
    } else if let Ok(s) = std::str::from_utf8(bytes) {
        s.to_string()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    };

    let cleaned: String = decoded
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
