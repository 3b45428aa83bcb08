//! Runs the pipeline binaries one after another, stopping at the first
//! failure.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{error, info};

const BANNER_WIDTH: usize = 70;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Step {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|arg| arg.to_string()).collect();
        self
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a sequence: `Ok` when every step exited 0, otherwise the name
/// and exit code of the step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceResult {
    Completed,
    Failed { step: String, exit_code: i32 },
}

/// The four demo steps, resolved against the directory holding the binaries.
pub fn demo_steps(bin_dir: &Path) -> Vec<Step> {
    [
        ("Create/verify tables", "create_tables"),
        ("Ingest properties page", "ingest_properties"),
        ("Ingest vacancy board PDF", "ingest_vacancy_board"),
        ("Show vacancy results", "show_vacancies"),
    ]
    .into_iter()
    .map(|(name, binary)| {
        Step::new(
            name,
            bin_dir.join(format!("{binary}{}", std::env::consts::EXE_SUFFIX)),
        )
    })
    .collect()
}

/// Runs each step with captured output, echoing it to `out`. A step that
/// cannot be started counts as a failure with exit code 1.
pub fn run_steps<W: Write>(steps: &[Step], out: &mut W) -> io::Result<SequenceResult> {
    for step in steps {
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(out, "STEP: {}", step.name)?;
        writeln!(out, "COMMAND: {}", step.command_line())?;
        writeln!(out, "{}", "=".repeat(BANNER_WIDTH))?;

        info!("Running step '{}'", step.name);
        let output = match Command::new(&step.program).args(&step.args).output() {
            Ok(output) => output,
            Err(e) => {
                error!("Could not start step '{}': {}", step.name, e);
                writeln!(out, "{}", e)?;
                writeln!(out, "\nStep failed: {}", step.name)?;
                return Ok(SequenceResult::Failed {
                    step: step.name.clone(),
                    exit_code: 1,
                });
            }
        };

        for captured in [&output.stdout, &output.stderr] {
            let text = String::from_utf8_lossy(captured);
            let text = text.trim();
            if !text.is_empty() {
                writeln!(out, "{}", text)?;
            }
        }

        if !output.status.success() {
            // No code means the child was killed by a signal.
            let exit_code = output.status.code().unwrap_or(1);
            error!("Step '{}' exited with {}", step.name, exit_code);
            writeln!(out, "\nStep failed: {}", step.name)?;
            return Ok(SequenceResult::Failed {
                step: step.name.clone(),
                exit_code,
            });
        }
    }

    Ok(SequenceResult::Completed)
}
