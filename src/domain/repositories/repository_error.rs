use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Pool error: {0}")]
    Pool(String),
    #[error("Database error: {0}")]
    Database(String),
}
