//! Batch driver over configuration units
//!
//! Runs generate and clean for one unit or for every unit of a plugin.
//! In `all` mode each unit's result is captured so that a failing unit does
//! not stop its siblings; a single named unit propagates its error.

use crate::clean::{clean_matching, clean_output_dir, CleanReport};
use crate::versions::{write_version_manifest, VERSIONS_FILE};
use crate::{generate_api_docs, GenerationReport};
use openapi_docs_gen_common::{DocsError, PluginConfig, Result, UnitConfig};
use openapi_docs_gen_parser::SpecLoader;

/// Target keyword selecting every unit or every version
pub const ALL: &str = "all";

/// Which units of a plugin to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Unit(String),
}

impl Selector {
    pub fn parse(target: &str) -> Self {
        if target == ALL {
            Selector::All
        } else {
            Selector::Unit(target.to_string())
        }
    }
}

/// Which versions of a unit to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    All,
    Version(String),
}

impl VersionSelector {
    /// Parse an `id:version` or `id:all` target into the unit key and selector
    pub fn parse(target: &str) -> Result<(String, Self)> {
        let (unit, version) = target.split_once(':').ok_or_else(|| {
            DocsError::Config(format!(
                "Invalid version target \"{}\", expected <id>:<version> or <id>:all",
                target
            ))
        })?;

        if unit.is_empty() || version.is_empty() {
            return Err(DocsError::Config(format!(
                "Invalid version target \"{}\", expected <id>:<version> or <id>:all",
                target
            )));
        }

        let selector = if version == ALL {
            VersionSelector::All
        } else {
            VersionSelector::Version(version.to_string())
        };
        Ok((unit.to_string(), selector))
    }
}

/// Result of processing one unit
#[derive(Debug)]
pub struct UnitOutcome<T> {
    /// Unit key, or `key:version` for versions
    pub name: String,
    pub result: Result<T>,
}

impl<T> UnitOutcome<T> {
    fn new(name: impl Into<String>, result: Result<T>) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }
}

/// Generate docs for the selected units
pub fn generate_docs(
    plugin: &PluginConfig,
    selector: &Selector,
    loader: &mut SpecLoader,
) -> Result<Vec<UnitOutcome<GenerationReport>>> {
    match selector {
        Selector::All => Ok(plugin
            .config
            .iter()
            .map(|(key, unit)| {
                tracing::debug!(unit = %key, "generating");
                UnitOutcome::new(key, generate_api_docs(unit, loader))
            })
            .collect()),
        Selector::Unit(key) => {
            let unit = plugin.resolve_unit(key)?;
            let report = generate_api_docs(unit, loader)?;
            Ok(vec![UnitOutcome::new(key, Ok(report))])
        }
    }
}

/// Generate docs for the selected versions of a unit
///
/// Writes the parent's `versions.json` first, then each version unit.
pub fn generate_version_docs(
    plugin: &PluginConfig,
    key: &str,
    selector: &VersionSelector,
    loader: &mut SpecLoader,
) -> Result<Vec<UnitOutcome<GenerationReport>>> {
    let parent = plugin.resolve_unit(key)?;
    let manifest = write_version_manifest(parent)?;
    tracing::debug!(path = %manifest.0.display(), outcome = ?manifest.1, "versions manifest");

    match selector {
        VersionSelector::All => Ok(parent
            .versions
            .keys()
            .map(|version| {
                let result = parent
                    .version_unit(version)
                    .and_then(|unit| generate_api_docs(&unit, loader));
                UnitOutcome::new(format!("{}:{}", key, version), result)
            })
            .collect()),
        VersionSelector::Version(version) => {
            let unit = parent.version_unit(version)?;
            let report = generate_api_docs(&unit, loader)?;
            Ok(vec![UnitOutcome::new(
                format!("{}:{}", key, version),
                Ok(report),
            )])
        }
    }
}

/// Remove generated docs of the selected units
pub fn clean_docs(
    plugin: &PluginConfig,
    selector: &Selector,
) -> Result<Vec<UnitOutcome<CleanReport>>> {
    match selector {
        Selector::All => Ok(plugin
            .config
            .iter()
            .map(|(key, unit)| UnitOutcome::new(key, clean_unit(unit)))
            .collect()),
        Selector::Unit(key) => {
            let unit = plugin.resolve_unit(key)?;
            Ok(vec![UnitOutcome::new(key, Ok(clean_unit(unit)?))])
        }
    }
}

/// Remove generated docs of the selected versions of a unit
///
/// `all` also removes the parent's `versions.json`.
pub fn clean_version_docs(
    plugin: &PluginConfig,
    key: &str,
    selector: &VersionSelector,
) -> Result<Vec<UnitOutcome<CleanReport>>> {
    let parent = plugin.resolve_unit(key)?;

    match selector {
        VersionSelector::All => {
            let mut outcomes = vec![UnitOutcome::new(
                key,
                clean_matching(&parent.output_dir, &[VERSIONS_FILE]),
            )];
            outcomes.extend(parent.versions.keys().map(|version| {
                let result = parent
                    .version_unit(version)
                    .and_then(|unit| clean_unit(&unit));
                UnitOutcome::new(format!("{}:{}", key, version), result)
            }));
            Ok(outcomes)
        }
        VersionSelector::Version(version) => {
            let unit = parent.version_unit(version)?;
            Ok(vec![UnitOutcome::new(
                format!("{}:{}", key, version),
                Ok(clean_unit(&unit)?),
            )])
        }
    }
}

fn clean_unit(unit: &UnitConfig) -> Result<CleanReport> {
    clean_output_dir(&unit.output_dir)
}
