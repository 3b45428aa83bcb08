use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableExtractionError {
    #[error("Corrupted document: {0}")]
    CorruptedFile(String),
    #[error("Failed to decrypt document")]
    Encrypted,
    #[error("Document has no pages")]
    NoPages,
    #[error("Failed to read page content: {0}")]
    Content(String),
}

/// A table as a grid of cells; `None` marks a cell with no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }
}

/// Flattened text and detected tables of a document's first page.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    pub text: String,
    pub tables: Vec<Table>,
}

pub trait TableExtractor: Send + Sync {
    fn extract_first_page(&self, data: &[u8]) -> Result<ExtractedPage, TableExtractionError>;
}
