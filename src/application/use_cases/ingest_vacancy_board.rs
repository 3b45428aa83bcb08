use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::IngestError;
use crate::application::ports::{PageFetcher, TableExtractor};
use crate::application::services::vacancy_parser::{parse_row, parse_updated_date};
use crate::domain::entities::VacancyRow;
use crate::domain::repositories::VacancyRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestVacancyBoardOutcome {
    Completed {
        updated_date: Option<NaiveDate>,
        rows_processed: usize,
    },
    /// The first page had no detectable table; the board format likely changed.
    NoTablesFound { updated_date: Option<NaiveDate> },
}

pub struct IngestVacancyBoardUseCase {
    fetcher: Arc<dyn PageFetcher>,
    table_extractor: Arc<dyn TableExtractor>,
    vacancy_repository: Arc<dyn VacancyRepository>,
}

impl IngestVacancyBoardUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        table_extractor: Arc<dyn TableExtractor>,
        vacancy_repository: Arc<dyn VacancyRepository>,
    ) -> Self {
        Self {
            fetcher,
            table_extractor,
            vacancy_repository,
        }
    }

    pub async fn execute(&self, pdf_url: &str) -> Result<IngestVacancyBoardOutcome, IngestError> {
        let data = self.fetcher.fetch_bytes(pdf_url).await?;
        debug!("Downloaded {} bytes from {}", data.len(), pdf_url);

        let page = self.table_extractor.extract_first_page(&data)?;
        let updated_date = parse_updated_date(&page.text);
        if updated_date.is_none() {
            warn!("No 'Information updated' date found on {}", pdf_url);
        }

        let Some(table) = page.tables.first() else {
            warn!("No tables detected in {}", pdf_url);
            return Ok(IngestVacancyBoardOutcome::NoTablesFound { updated_date });
        };

        // Row 0 is the column header.
        let rows: Vec<VacancyRow> = table
            .rows
            .iter()
            .skip(1)
            .filter_map(|cells| parse_row(cells, updated_date, pdf_url))
            .collect();

        let rows_processed = self.vacancy_repository.upsert_batch(&rows).await?;
        info!(
            "Upserted {} vacancy rows from {} (updated_date={:?})",
            rows_processed, pdf_url, updated_date
        );

        Ok(IngestVacancyBoardOutcome::Completed {
            updated_date,
            rows_processed,
        })
    }
}
