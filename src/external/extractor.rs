use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ExtractorConfig;
use crate::external::process::{require_file, run_checked, ProcessRunner, SystemRunner};
use crate::external::ExternalError;
use crate::types::website::WebsiteExperience;

/// Component file inside the website repository that holds the experience array.
pub const EXPERIENCE_COMPONENT: &str = "src/components/Experience.tsx";

/// Env var naming the website repository root.
pub const WEBSITE_REPO_ENV: &str = "WEBSITE_REPO_PATH";

/// Pulls the hand-maintained experience array out of a UI component.
///
/// The heavy lifting is done by an external script that prints the array
/// as JSON on stdout; a non-zero exit means extraction failed.
pub struct ExperienceExtractor<R = SystemRunner> {
    config: ExtractorConfig,
    runner: R,
}

impl ExperienceExtractor<SystemRunner> {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            runner: SystemRunner,
        }
    }
}

impl<R: ProcessRunner> ExperienceExtractor<R> {
    pub fn with_runner(config: ExtractorConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Configured component path, else `$WEBSITE_REPO_PATH/src/components/Experience.tsx`.
    pub fn component_path(&self) -> Result<PathBuf, ExternalError> {
        if let Some(path) = &self.config.component {
            return Ok(path.clone());
        }
        std::env::var_os(WEBSITE_REPO_ENV)
            .map(|root| PathBuf::from(root).join(EXPERIENCE_COMPONENT))
            .ok_or(ExternalError::MissingEnv(WEBSITE_REPO_ENV))
    }

    pub fn extract(&self) -> Result<Vec<WebsiteExperience>, ExternalError> {
        let component = self.component_path()?;
        self.extract_from(&component)
    }

    pub fn extract_from(&self, component: &Path) -> Result<Vec<WebsiteExperience>, ExternalError> {
        let component = require_file(component)?;
        let args = vec![
            self.config.script.display().to_string(),
            component.display().to_string(),
        ];

        let output = run_checked(&self.runner, &self.config.program, &args, None)?;

        let experiences: Vec<WebsiteExperience> = serde_json::from_str(&output.stdout)
            .map_err(|source| ExternalError::InvalidOutput {
                program: self.config.program.clone(),
                source,
            })?;

        info!(
            component = %component.display(),
            entries = experiences.len(),
            "extracted experiences"
        );
        Ok(experiences)
    }
}
