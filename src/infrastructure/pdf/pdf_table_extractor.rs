use lopdf::Document;
use tracing::debug;

use super::page_layout::read_page_layout;
use super::table_grid::detect_table;
use crate::application::ports::{ExtractedPage, TableExtractionError, TableExtractor};

pub struct PdfTableExtractor {
    password: String,
}

impl PdfTableExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }
}

impl Default for PdfTableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for PdfTableExtractor {
    fn extract_first_page(&self, data: &[u8]) -> Result<ExtractedPage, TableExtractionError> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| TableExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(&self.password)
                .map_err(|_e| TableExtractionError::Encrypted)?;
        }

        let (page_number, page_id) = doc
            .get_pages()
            .into_iter()
            .next()
            .ok_or(TableExtractionError::NoPages)?;

        let layout = read_page_layout(&doc, page_id)?;
        debug!(
            "Page {} has {} text fragments and {} ruling edges",
            page_number,
            layout.fragments.len(),
            layout.edges.len()
        );

        // lopdf's own extraction glues separate `Tj` runs together, so it is
        // only used when the interpreter found no text at all.
        let flattened = layout.flattened_text();
        let text = if flattened.trim().is_empty() {
            doc.extract_text(&[page_number]).unwrap_or_default()
        } else {
            flattened
        };

        Ok(ExtractedPage {
            text,
            tables: detect_table(&layout).into_iter().collect(),
        })
    }
}
