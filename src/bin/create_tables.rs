use std::process::ExitCode;

use housing_ingest::infrastructure::database::run_migrations;
use housing_ingest::infrastructure::{AppContainer, init_logging};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let container = AppContainer::from_env()?;
    let applied = run_migrations(&container.db_pool)?;
    tracing::info!("Applied {} pending migrations", applied);

    println!("mha_properties and mha_vacancy_board tables created");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
