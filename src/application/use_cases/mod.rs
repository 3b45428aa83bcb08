pub mod ingest_error;
pub mod ingest_properties;
pub mod ingest_vacancy_board;
pub mod list_vacancies;

pub use ingest_error::IngestError;
pub use ingest_properties::{IngestPropertiesOutcome, IngestPropertiesUseCase, ListingCrawlSettings};
pub use ingest_vacancy_board::{IngestVacancyBoardOutcome, IngestVacancyBoardUseCase};
pub use list_vacancies::ListVacanciesUseCase;
