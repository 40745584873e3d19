pub mod extractor;
pub mod pdf;
pub mod process;

use std::path::PathBuf;

use thiserror::Error;

pub use extractor::ExperienceExtractor;
pub use pdf::PdfBuilder;
pub use process::{run_checked, ProcessOutput, ProcessRunner, SystemRunner};

#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with status {}: {diagnostics}", exit_label(.status))]
    ProcessFailed {
        program: String,
        status: Option<i32>,
        diagnostics: String,
    },
    #[error("{program} produced invalid JSON: {source}")]
    InvalidOutput {
        program: String,
        source: serde_json::Error,
    },
}

fn exit_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}
