use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::external::ExternalError;

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a program to completion and captures its output.
pub trait ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput, std::io::Error>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput, std::io::Error> {
        (**self).run(program, args, cwd)
    }
}

/// Spawns real child processes and blocks until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput, std::io::Error> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;
        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run `program` once; a spawn failure or non-zero exit is an error.
pub fn run_checked<R: ProcessRunner + ?Sized>(
    runner: &R,
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
) -> Result<ProcessOutput, ExternalError> {
    debug!(program, ?args, "running external process");

    let output = runner
        .run(program, args, cwd)
        .map_err(|source| ExternalError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.success() {
        warn!(program, status = ?output.status, "external process failed");
        return Err(ExternalError::ProcessFailed {
            program: program.to_string(),
            status: output.status,
            diagnostics: diagnostics(&output),
        });
    }

    Ok(output)
}

/// Stderr, or stdout when stderr is empty (pdflatex reports on stdout).
fn diagnostics(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        output.stdout.trim().to_string()
    } else {
        stderr.to_string()
    }
}

pub(crate) fn require_file(path: &Path) -> Result<PathBuf, ExternalError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ExternalError::InputNotFound {
            path: path.to_path_buf(),
        })
    }
}
