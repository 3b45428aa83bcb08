use std::process::ExitCode;

use housing_ingest::application::IngestPropertiesOutcome;
use housing_ingest::infrastructure::{AppContainer, init_logging};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let container = AppContainer::from_env()?;
    let use_case = container.ingest_properties_use_case()?;

    match use_case.execute(&container.config.properties_url).await? {
        IngestPropertiesOutcome::Completed { pages_processed } => {
            println!(
                "Ingested {} property detail pages into mha_properties",
                pages_processed
            );
        }
        IngestPropertiesOutcome::NoLinksFound => {
            println!("No Read More links found. The page layout may have changed.");
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
