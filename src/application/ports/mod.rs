pub mod page_fetcher;
pub mod table_extractor;

pub use page_fetcher::{FetchError, PageFetcher};
pub use table_extractor::{ExtractedPage, Table, TableExtractionError, TableExtractor};
