//! Removal of generated artifacts

use openapi_docs_gen_common::{DocsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name patterns of everything the generator emits
pub const GENERATED_PATTERNS: [&str; 5] = [
    "*.api.mdx",
    "*.info.mdx",
    "*.tag.mdx",
    "sidebar.js",
    "versions.json",
];

/// Outcome of one clean run
#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<DocsError>,
}

/// Remove generated files directly inside `output_dir`
///
/// Subdirectories and files not matching [`GENERATED_PATTERNS`] are left
/// alone. A missing directory is not an error.
pub fn clean_output_dir(output_dir: &Path) -> Result<CleanReport> {
    clean_matching(output_dir, &GENERATED_PATTERNS)
}

/// Remove files directly inside `dir` whose names match one of `patterns`
pub fn clean_matching(dir: &Path, patterns: &[&str]) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "nothing to clean");
        return Ok(report);
    }

    let base = glob::Pattern::escape(&dir.to_string_lossy());
    for pattern in patterns {
        let full = format!("{}/{}", base, pattern);
        let paths = glob::glob(&full)
            .map_err(|e| DocsError::Config(format!("Invalid clean pattern {}: {}", full, e)))?;

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    report.failures.push(DocsError::Io(e.into()));
                    continue;
                }
            };
            if !path.is_file() {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "removed");
                    report.removed.push(path);
                }
                Err(source) => report.failures.push(DocsError::Write { path, source }),
            }
        }
    }

    Ok(report)
}
