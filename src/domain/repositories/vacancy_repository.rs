use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::VacancyRow;

#[async_trait]
pub trait VacancyRepository: Send + Sync {
    /// Upserts the whole batch keyed by `(property_name, source_pdf_url,
    /// updated_date)`. Either every row is written or none is.
    async fn upsert_batch(&self, rows: &[VacancyRow]) -> Result<usize, RepositoryError>;
    /// Newest board first (undated rows last), then by property name.
    async fn list_for_report(&self) -> Result<Vec<VacancyRow>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
}
