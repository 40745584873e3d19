pub mod latex;
pub mod output;
pub mod website;

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::LoadError;
pub use latex::{escape_latex, format_period, LatexGenerator, LatexTemplate};
pub use output::{write_json, write_versioned, GeneratedFile};
pub use website::WebsiteGenerator;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
