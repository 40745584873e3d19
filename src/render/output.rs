use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::render::RenderError;
use crate::types::identifiers::ContentVersion;

/// A file produced by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub name: String,
    pub path: PathBuf,
    pub version: ContentVersion,
    /// True when the file already held exactly these bytes and was not rewritten.
    pub unchanged: bool,
}

/// Write `content` to `path` via a sibling temp file and a rename.
///
/// Parent directories are created. If the current file content already
/// hashes to the new version nothing is written.
pub fn write_versioned(path: &Path, content: &[u8]) -> Result<GeneratedFile, RenderError> {
    let version = ContentVersion::from_content(content);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Ok(existing) = fs::read(path) {
        if ContentVersion::from_content(&existing) == version {
            info!(path = %path.display(), version = version.short(), "unchanged");
            return Ok(GeneratedFile {
                name,
                path: path.to_path_buf(),
                version,
                unchanged: true,
            });
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    // e.g. resume.tex -> resume.tmp.<12 hex chars>
    let temp_path = path.with_extension(format!("tmp.{}", version.short()));
    if let Err(e) = write_then_rename(&temp_path, path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!(path = %path.display(), version = version.short(), "written");
    Ok(GeneratedFile {
        name,
        path: path.to_path_buf(),
        version,
        unchanged: false,
    })
}

fn write_then_rename(temp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(temp_path)?;
    f.write_all(content)?;
    f.sync_all()?;
    drop(f);
    fs::rename(temp_path, path)
}

/// Serialize `value` as 2-space-indented JSON and write it with [`write_versioned`].
pub fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<GeneratedFile, RenderError> {
    let json = serde_json::to_string_pretty(value)?;
    write_versioned(path, json.as_bytes())
}
