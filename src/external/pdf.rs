use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::PdfConfig;
use crate::external::process::{require_file, run_checked, ProcessRunner, SystemRunner};
use crate::external::ExternalError;

/// Compiles a `.tex` file to PDF inside a LaTeX container.
pub struct PdfBuilder<R = SystemRunner> {
    config: PdfConfig,
    runner: R,
}

impl PdfBuilder<SystemRunner> {
    pub fn new(config: PdfConfig) -> Self {
        Self {
            config,
            runner: SystemRunner,
        }
    }
}

impl<R: ProcessRunner> PdfBuilder<R> {
    pub fn with_runner(config: PdfConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Arguments for `docker run`, mounting the file's directory at `/data`.
    pub fn command_args(&self, directory: &Path, file_name: &str) -> Vec<String> {
        vec![
            "run".into(),
            "--rm".into(),
            "-i".into(),
            "-v".into(),
            format!("{}:/data", directory.display()),
            "-w".into(),
            "/data".into(),
            self.config.docker_image.clone(),
            self.config.engine.clone(),
            file_name.to_string(),
        ]
    }

    /// Build the PDF next to `tex_file` and return its path.
    pub fn build(&self, tex_file: &Path) -> Result<PathBuf, ExternalError> {
        let tex_file = require_file(tex_file)?;
        let tex_file = tex_file.canonicalize().unwrap_or(tex_file);

        let directory = tex_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = tex_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ExternalError::InputNotFound {
                path: tex_file.clone(),
            })?;

        let args = self.command_args(&directory, &file_name);
        run_checked(&self.runner, &self.config.program, &args, Some(&directory))?;

        let pdf = tex_file.with_extension("pdf");
        info!(pdf = %pdf.display(), "pdf built");
        Ok(pdf)
    }
}
