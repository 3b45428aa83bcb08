use std::process::ExitCode;

use housing_ingest::application::IngestVacancyBoardOutcome;
use housing_ingest::infrastructure::{AppContainer, init_logging};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let container = AppContainer::from_env()?;
    let use_case = container.ingest_vacancy_board_use_case()?;

    match use_case.execute(&container.config.vacancy_pdf_url).await? {
        IngestVacancyBoardOutcome::Completed {
            updated_date,
            rows_processed,
        } => {
            let date = updated_date
                .map(|date| date.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "Inserted or updated {} vacancy rows (updated_date={})",
                rows_processed, date
            );
        }
        IngestVacancyBoardOutcome::NoTablesFound { .. } => {
            println!("No tables detected in PDF. The board format may have changed.");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
