use thiserror::Error;

use crate::application::ports::{FetchError, TableExtractionError};
use crate::domain::repositories::RepositoryError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extraction(#[from] TableExtractionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
