//! In-memory ports for use-case tests. The repositories apply the same merge
//! policy as the SQL upserts.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::ports::{
    ExtractedPage, FetchError, PageFetcher, TableExtractionError, TableExtractor,
};
use crate::domain::entities::{PropertyListing, VacancyRow};
use crate::domain::repositories::{PropertyRepository, RepositoryError, VacancyRepository};

/// Serves canned responses; unknown URLs answer 404.
#[derive(Default)]
pub struct StaticFetcher {
    responses: HashMap<String, Vec<u8>>,
    fetches: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.with_bytes(url, html.as_bytes())
    }

    pub fn with_bytes(mut self, url: &str, data: &[u8]) -> Self {
        self.responses.insert(url.to_string(), data.to_vec());
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .iter()
            .filter(|fetched| fetched.as_str() == url)
            .count()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetches.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let data = self.respond(url)?;
        String::from_utf8(data).map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.respond(url)
    }
}

pub struct StaticTableExtractor {
    page: ExtractedPage,
}

impl StaticTableExtractor {
    pub fn new(page: ExtractedPage) -> Self {
        Self { page }
    }
}

impl TableExtractor for StaticTableExtractor {
    fn extract_first_page(&self, _data: &[u8]) -> Result<ExtractedPage, TableExtractionError> {
        Ok(self.page.clone())
    }
}

#[derive(Default)]
pub struct InMemoryPropertyRepository {
    listings: Mutex<Vec<PropertyListing>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn upsert_batch(&self, listings: &[PropertyListing]) -> Result<usize, RepositoryError> {
        let now = Utc::now().naive_utc();
        let mut stored = self.listings.lock().unwrap();

        for listing in listings {
            match stored
                .iter_mut()
                .find(|existing| existing.details_url() == listing.details_url())
            {
                Some(existing) => existing.merge_from(listing, now),
                None => stored.push(listing.clone().with_last_seen(Some(now))),
            }
        }

        Ok(listings.len())
    }

    async fn find_by_details_url(
        &self,
        details_url: &str,
    ) -> Result<Option<PropertyListing>, RepositoryError> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .iter()
            .find(|listing| listing.details_url() == details_url)
            .cloned())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.listings.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryVacancyRepository {
    rows: Mutex<Vec<VacancyRow>>,
}

impl InMemoryVacancyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VacancyRepository for InMemoryVacancyRepository {
    async fn upsert_batch(&self, rows: &[VacancyRow]) -> Result<usize, RepositoryError> {
        let now = Utc::now().naive_utc();
        let mut stored = self.rows.lock().unwrap();

        for row in rows {
            let key = row.identity_key();
            match stored.iter_mut().find(|existing| existing.identity_key() == key) {
                Some(existing) => existing.merge_from(row, now),
                None => stored.push(row.clone().with_ingested_at(Some(now))),
            }
        }

        Ok(rows.len())
    }

    async fn list_for_report(&self) -> Result<Vec<VacancyRow>, RepositoryError> {
        let mut rows = self.rows.lock().unwrap().clone();
        // Option orders None first, so reversing puts undated rows last.
        rows.sort_by(|a, b| {
            b.updated_date()
                .cmp(&a.updated_date())
                .then_with(|| a.property_name().cmp(b.property_name()))
        });
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}
