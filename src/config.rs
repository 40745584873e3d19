//! Layered configuration.
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed `CV_BUILDER_` (nested keys split on `__`,
//!    e.g. `CV_BUILDER_PDF__DOCKER_IMAGE`)
//! 2. Explicit config path (`--config`)
//! 3. Project file `./cv-builder.toml`
//! 4. Default values
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::latex::DEFAULT_TEMPLATE_NAME;

pub const PROJECT_CONFIG_FILE: &str = "cv-builder.toml";
pub const ENV_PREFIX: &str = "CV_BUILDER_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfConfig {
    pub program: String,
    pub docker_image: String,
    pub engine: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            program: "docker".into(),
            docker_image: "blang/latex".into(),
            engine: "pdflatex".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub program: String,
    pub script: PathBuf,
    /// Component file to scrape. Falls back to `$WEBSITE_REPO_PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<PathBuf>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            program: "node".into(),
            script: PathBuf::from("scripts/extract_experiences_acorn.js"),
            component: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub data_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template_name: String,
    pub latex_output: PathBuf,
    pub website_output_dir: PathBuf,
    pub summary_variant: String,
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("cv_data"),
            template_dir: PathBuf::from("templates"),
            template_name: DEFAULT_TEMPLATE_NAME.into(),
            latex_output: PathBuf::from("output/resume.tex"),
            website_output_dir: PathBuf::from("website/src/data"),
            summary_variant: "default".into(),
            pdf: PdfConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Load from the current directory's project file, `explicit`, and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_in(Path::new("."), explicit)
    }

    /// Like [`BuilderConfig::load`], looking for the project file in `project_dir`.
    pub fn load_in(project_dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(BuilderConfig::default()));

        let project = project_dir.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}
