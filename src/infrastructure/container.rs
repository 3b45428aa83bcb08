use std::sync::Arc;
use thiserror::Error;

use crate::{
    application::{
        ports::{PageFetcher, TableExtractor},
        use_cases::{IngestPropertiesUseCase, IngestVacancyBoardUseCase, ListVacanciesUseCase},
    },
    domain::repositories::{PropertyRepository, VacancyRepository},
    infrastructure::{
        config::{ConfigError, IngestConfig},
        database::{
            DatabaseError, DbPool, create_connection_pool,
            repositories::{PostgresPropertyRepository, PostgresVacancyRepository},
        },
        http::HttpFetcher,
        pdf::PdfTableExtractor,
    },
};

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Owns the store handle for one run. Dropping it releases the pool.
pub struct AppContainer {
    pub config: IngestConfig,
    pub db_pool: DbPool,

    // Repositories
    pub property_repository: Arc<dyn PropertyRepository>,
    pub vacancy_repository: Arc<dyn VacancyRepository>,
}

impl AppContainer {
    pub fn from_env() -> Result<Self, ContainerError> {
        Self::new(IngestConfig::from_env()?)
    }

    pub fn new(config: IngestConfig) -> Result<Self, ContainerError> {
        let db_pool = create_connection_pool(&config.database_url)?;

        let property_repository: Arc<dyn PropertyRepository> =
            Arc::new(PostgresPropertyRepository::new(db_pool.clone()));
        let vacancy_repository: Arc<dyn VacancyRepository> =
            Arc::new(PostgresVacancyRepository::new(db_pool.clone()));

        Ok(Self {
            config,
            db_pool,
            property_repository,
            vacancy_repository,
        })
    }

    pub fn ingest_properties_use_case(&self) -> Result<IngestPropertiesUseCase, ContainerError> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(
            &self.config.user_agent,
            self.config.index_timeout,
        )?);

        Ok(IngestPropertiesUseCase::new(
            fetcher,
            self.property_repository.clone(),
            self.config.crawl.clone(),
        ))
    }

    pub fn ingest_vacancy_board_use_case(
        &self,
    ) -> Result<IngestVacancyBoardUseCase, ContainerError> {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(
            &self.config.user_agent,
            self.config.pdf_timeout,
        )?);
        let table_extractor: Arc<dyn TableExtractor> = Arc::new(PdfTableExtractor::new());

        Ok(IngestVacancyBoardUseCase::new(
            fetcher,
            table_extractor,
            self.vacancy_repository.clone(),
        ))
    }

    pub fn list_vacancies_use_case(&self) -> ListVacanciesUseCase {
        ListVacanciesUseCase::new(self.vacancy_repository.clone())
    }
}
