use std::process::ExitCode;

use housing_ingest::application::use_cases::list_vacancies::format_vacancy_line;
use housing_ingest::infrastructure::{AppContainer, init_logging};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let container = AppContainer::from_env()?;
    let rows = container.list_vacancies_use_case().execute().await?;

    if rows.is_empty() {
        println!("No vacancy rows stored yet");
    }
    for row in &rows {
        println!("{}", format_vacancy_line(row));
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
