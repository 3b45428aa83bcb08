use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::IngestError;
use crate::application::ports::PageFetcher;
use crate::application::services::listing_parser::{find_read_more_links, parse_detail_page};
use crate::domain::entities::PropertyListing;
use crate::domain::entities::property_listing::DEFAULT_CITY;
use crate::domain::repositories::PropertyRepository;

#[derive(Debug, Clone)]
pub struct ListingCrawlSettings {
    /// Wait before every detail-page request.
    pub politeness_delay: Duration,
    /// Upper bound on detail pages per run.
    pub max_links: usize,
    pub city: String,
}

impl Default for ListingCrawlSettings {
    fn default() -> Self {
        Self {
            politeness_delay: Duration::from_millis(1200),
            max_links: 30,
            city: DEFAULT_CITY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestPropertiesOutcome {
    Completed { pages_processed: usize },
    /// The index page had no "Read More" links; most likely the layout changed.
    NoLinksFound,
}

pub struct IngestPropertiesUseCase {
    fetcher: Arc<dyn PageFetcher>,
    property_repository: Arc<dyn PropertyRepository>,
    settings: ListingCrawlSettings,
}

impl IngestPropertiesUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        property_repository: Arc<dyn PropertyRepository>,
        settings: ListingCrawlSettings,
    ) -> Self {
        Self {
            fetcher,
            property_repository,
            settings,
        }
    }

    /// Crawls the index page and every linked detail page, then writes the
    /// batch in one go. Any failed request aborts the run before anything is
    /// written.
    pub async fn execute(&self, index_url: &str) -> Result<IngestPropertiesOutcome, IngestError> {
        let base = Url::parse(index_url).map_err(|e| IngestError::InvalidUrl {
            url: index_url.to_string(),
            message: e.to_string(),
        })?;

        let index_html = self.fetcher.fetch_text(index_url).await?;
        let mut links = find_read_more_links(&index_html, &base);

        if links.is_empty() {
            warn!("No Read More links found on {}; the page layout may have changed", index_url);
            return Ok(IngestPropertiesOutcome::NoLinksFound);
        }

        if links.len() > self.settings.max_links {
            info!(
                "Found {} detail links, processing the first {}",
                links.len(),
                self.settings.max_links
            );
            links.truncate(self.settings.max_links);
        } else {
            info!("Found {} detail links", links.len());
        }

        let mut listings = Vec::with_capacity(links.len());
        for details_url in &links {
            if !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }

            debug!("Fetching detail page {}", details_url);
            let detail_html = self.fetcher.fetch_text(details_url.as_str()).await?;
            let facts = parse_detail_page(&detail_html, details_url);

            listings.push(
                PropertyListing::new(
                    facts.name,
                    details_url.as_str().to_string(),
                    index_url.to_string(),
                )
                .with_address(facts.address)
                .with_city(self.settings.city.clone())
                .with_amenities(facts.allows_cats, facts.allows_dogs, facts.senior_55_plus),
            );
        }

        let pages_processed = self.property_repository.upsert_batch(&listings).await?;
        info!("Upserted {} property listings", pages_processed);

        Ok(IngestPropertiesOutcome::Completed { pages_processed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryPropertyRepository, StaticFetcher};

    const INDEX: &str = "https://housing.example.org/affordable-housing";

    fn settings() -> ListingCrawlSettings {
        ListingCrawlSettings {
            politeness_delay: Duration::ZERO,
            ..ListingCrawlSettings::default()
        }
    }

    fn index_page(hrefs: &[&str]) -> String {
        let links: String = hrefs
            .iter()
            .map(|href| format!(r#"<div><h3>Property</h3><a href="{href}">Read More</a></div>"#))
            .collect();
        format!("<html><body><a href='/contact'>Contact</a>{links}</body></html>")
    }

    fn use_case(
        fetcher: Arc<StaticFetcher>,
        repository: Arc<InMemoryPropertyRepository>,
    ) -> IngestPropertiesUseCase {
        IngestPropertiesUseCase::new(fetcher, repository, settings())
    }

    #[tokio::test]
    async fn test_ingest_properties() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(INDEX, &index_page(&["/riverside", "/hillside"]))
                .with_page(
                    "https://housing.example.org/riverside",
                    "<h1>Riverside Apartments</h1><p>123 Main St, Missoula</p><p>Cats allowed</p>",
                )
                .with_page(
                    "https://housing.example.org/hillside",
                    "<h1>Hillside Manor</h1><p>Senior living for ages 55+</p>",
                ),
        );
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let outcome = use_case(fetcher, repository.clone()).execute(INDEX).await.unwrap();

        assert_eq!(outcome, IngestPropertiesOutcome::Completed { pages_processed: 2 });

        let riverside = repository
            .find_by_details_url("https://housing.example.org/riverside")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(riverside.property_name(), "Riverside Apartments");
        assert_eq!(riverside.address(), Some("123 Main St"));
        assert_eq!(riverside.allows_cats(), Some(true));
        assert_eq!(riverside.allows_dogs(), None);
        assert_eq!(riverside.source_url(), INDEX);
        assert_eq!(riverside.city(), "Missoula");

        let hillside = repository
            .find_by_details_url("https://housing.example.org/hillside")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hillside.senior_55_plus(), Some(true));
        assert_eq!(hillside.allows_cats(), None);
    }

    #[tokio::test]
    async fn test_duplicate_links_fetched_once() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(INDEX, &index_page(&["/riverside", "/riverside"]))
                .with_page("https://housing.example.org/riverside", "<h1>Riverside</h1>"),
        );
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let outcome = use_case(fetcher.clone(), repository.clone())
            .execute(INDEX)
            .await
            .unwrap();

        assert_eq!(outcome, IngestPropertiesOutcome::Completed { pages_processed: 1 });
        assert_eq!(fetcher.fetch_count("https://housing.example.org/riverside"), 1);
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_no_links_is_not_an_error() {
        let fetcher =
            Arc::new(StaticFetcher::new().with_page(INDEX, "<html><body>Moved</body></html>"));
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let outcome = use_case(fetcher, repository.clone()).execute(INDEX).await.unwrap();

        assert_eq!(outcome, IngestPropertiesOutcome::NoLinksFound);
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent_and_non_destructive() {
        let detail = "https://housing.example.org/riverside";
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let first = Arc::new(
            StaticFetcher::new()
                .with_page(INDEX, &index_page(&["/riverside"]))
                .with_page(detail, "<h1>Riverside</h1><p>Cats allowed</p>"),
        );
        use_case(first, repository.clone()).execute(INDEX).await.unwrap();

        let second = Arc::new(
            StaticFetcher::new()
                .with_page(INDEX, &index_page(&["/riverside"]))
                .with_page(detail, "<h1>Riverside</h1><p>Pets by arrangement</p>"),
        );
        use_case(second, repository.clone()).execute(INDEX).await.unwrap();

        assert_eq!(repository.count().await.unwrap(), 1);
        let listing = repository.find_by_details_url(detail).await.unwrap().unwrap();
        assert_eq!(listing.allows_cats(), Some(true));
    }

    #[tokio::test]
    async fn test_link_cap() {
        let hrefs: Vec<String> = (0..35).map(|i| format!("/p{i}")).collect();
        let href_refs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
        let mut fetcher = StaticFetcher::new().with_page(INDEX, &index_page(&href_refs));
        for href in &hrefs {
            fetcher =
                fetcher.with_page(&format!("https://housing.example.org{href}"), "<h1>P</h1>");
        }
        let fetcher = Arc::new(fetcher);
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let outcome = use_case(fetcher.clone(), repository.clone())
            .execute(INDEX)
            .await
            .unwrap();

        assert_eq!(outcome, IngestPropertiesOutcome::Completed { pages_processed: 30 });
        assert_eq!(fetcher.fetch_count("https://housing.example.org/p30"), 0);
    }

    #[tokio::test]
    async fn test_failed_detail_page_aborts_batch() {
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(INDEX, &index_page(&["/riverside", "/missing"]))
                .with_page("https://housing.example.org/riverside", "<h1>Riverside</h1>"),
        );
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let result = use_case(fetcher, repository.clone()).execute(INDEX).await;

        assert!(matches!(result, Err(IngestError::Fetch(_))));
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_index_fetch_is_fatal() {
        let fetcher = Arc::new(StaticFetcher::new());
        let repository = Arc::new(InMemoryPropertyRepository::new());

        let result = use_case(fetcher, repository).execute(INDEX).await;

        assert!(matches!(result, Err(IngestError::Fetch(_))));
    }
}
