//! Versions manifest of versioned units

use crate::writer::{write_if_absent, WriteOutcome};
use openapi_docs_gen_common::{DocsError, Result, UnitConfig};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// File name of the manifest, written into the parent output directory
pub const VERSIONS_FILE: &str = "versions.json";

/// One entry of `versions.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version: String,
    pub label: String,
    pub base_url: String,
}

/// Manifest entries of a unit: the parent version first, then its
/// versions in configuration order
pub fn version_manifest(unit: &UnitConfig) -> Vec<VersionEntry> {
    let parent = unit.version.as_ref().map(|version| VersionEntry {
        version: version.clone(),
        label: unit.label.clone().unwrap_or_else(|| version.clone()),
        base_url: unit.base_url.clone().unwrap_or_default(),
    });

    parent
        .into_iter()
        .chain(unit.versions.iter().map(|(id, version)| VersionEntry {
            version: id.clone(),
            label: if version.label.is_empty() {
                id.clone()
            } else {
                version.label.clone()
            },
            base_url: version.base_url.clone(),
        }))
        .collect()
}

/// Write `versions.json` into the unit's output directory unless present
pub fn write_version_manifest(unit: &UnitConfig) -> Result<(PathBuf, WriteOutcome)> {
    if unit.versions.is_empty() {
        return Err(DocsError::Config(format!(
            "No versions configured for {}",
            unit.output_dir.display()
        )));
    }

    fs::create_dir_all(&unit.output_dir).map_err(|source| DocsError::Write {
        path: unit.output_dir.clone(),
        source,
    })?;

    let json = serde_json::to_string_pretty(&version_manifest(unit))?;
    let path = unit.output_dir.join(VERSIONS_FILE);
    let outcome = write_if_absent(&path, &json)?;
    Ok((path, outcome))
}
