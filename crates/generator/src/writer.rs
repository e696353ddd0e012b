//! Create-if-absent file writes

use openapi_docs_gen_common::{DocsError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// What happened to a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    /// The file already existed and was left untouched
    Skipped,
}

/// Write `contents` to `path` unless the file already exists
///
/// Existing files are never overwritten; run a clean first to regenerate.
pub fn write_if_absent(path: &Path, contents: &str) -> Result<WriteOutcome> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "file exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }
        Err(source) => {
            return Err(DocsError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    fill(file, path, contents)?;
    Ok(WriteOutcome::Created)
}

/// Write the contents of a freshly created file
///
/// On failure the partial file is removed so the next run does not skip it.
fn fill(mut file: impl Write, path: &Path, contents: &str) -> Result<()> {
    let written = file.write_all(contents.as_bytes()).and_then(|()| file.flush());
    if let Err(source) = written {
        drop(file);
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove partial file");
        }
        return Err(DocsError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
