use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::entities::PropertyListing;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Upserts the whole batch keyed by `details_url`. Either every listing is
    /// written or none is.
    async fn upsert_batch(&self, listings: &[PropertyListing]) -> Result<usize, RepositoryError>;
    async fn find_by_details_url(
        &self,
        details_url: &str,
    ) -> Result<Option<PropertyListing>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
}
