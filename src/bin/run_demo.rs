use std::io;
use std::process::ExitCode;

use housing_ingest::infrastructure::init_logging;
use housing_ingest::infrastructure::step_runner::{SequenceResult, demo_steps, run_steps};

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let exe = std::env::current_exe()?;
    let bin_dir = exe
        .parent()
        .ok_or("cannot locate the directory of the running executable")?;

    println!("\nMHA Affordable Housing Demo Runner");
    println!("This will create tables, ingest data, and print demo queries.");

    let mut stdout = io::stdout().lock();
    match run_steps(&demo_steps(bin_dir), &mut stdout)? {
        SequenceResult::Completed => {
            println!("\nDemo complete.");
            Ok(ExitCode::SUCCESS)
        }
        SequenceResult::Failed { exit_code, .. } => {
            Ok(ExitCode::from(u8::try_from(exit_code).unwrap_or(1)))
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
