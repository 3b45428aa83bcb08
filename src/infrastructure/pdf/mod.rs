pub mod page_layout;
pub mod pdf_table_extractor;
pub mod table_grid;

pub use pdf_table_extractor::PdfTableExtractor;
