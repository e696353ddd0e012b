//! Host site configuration
//!
//! The site configuration lists plugin instances (under `presets` or
//! `plugins`), each carrying named configuration units. A unit describes
//! one spec-to-docs generation job. Lookups are explicit functions over a
//! loaded [`SiteConfig`] value; nothing is cached globally.

use crate::{DocsError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Plugin id used when an entry does not name itself
pub const DEFAULT_PLUGIN_ID: &str = "default";

/// Root of the host configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub presets: Vec<PluginConfig>,

    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// One API docs plugin instance
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    #[serde(default = "default_plugin_id")]
    pub id: String,

    /// Configuration units keyed by name
    #[serde(default)]
    pub config: IndexMap<String, UnitConfig>,
}

fn default_plugin_id() -> String {
    DEFAULT_PLUGIN_ID.to_string()
}

/// One spec-to-docs generation job
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConfig {
    /// File, directory, or http(s) URL
    pub spec_path: String,

    pub output_dir: PathBuf,

    /// Replacement for the built-in api page template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_options: Option<SidebarOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub versions: IndexMap<String, VersionConfig>,
}

/// A versioned variant of a unit
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionConfig {
    pub spec_path: String,

    pub output_dir: PathBuf,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_options: Option<SidebarOptions>,
}

/// Sidebar generation options
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarOptions {
    /// Which page a tag category links to; no link when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_link_source: Option<CategoryLinkSource>,

    #[serde(default)]
    pub group_paths_by: GroupPathsBy,

    #[serde(default)]
    pub category_order: CategoryOrder,

    /// Nest a category's operations by shared leading path segments
    #[serde(default)]
    pub nest_paths: bool,

    #[serde(default = "default_true")]
    pub sidebar_collapsible: bool,

    #[serde(default = "default_true")]
    pub sidebar_collapsed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Map<String, Value>>,
}

fn default_true() -> bool {
    true
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            category_link_source: None,
            group_paths_by: GroupPathsBy::default(),
            category_order: CategoryOrder::default(),
            nest_paths: false,
            sidebar_collapsible: true,
            sidebar_collapsed: true,
            custom_props: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryLinkSource {
    /// Link to the tag page
    Tag,
    /// Link to the info page of the document declaring the tag
    Info,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupPathsBy {
    /// One category per tag
    #[default]
    Tag,
    /// One category per `x-tagGroups` entry, holding tag categories
    TagGroup,
    /// No categories
    Flat,
}

/// Category ordering: a named mode or an explicit list of tag names
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CategoryOrder {
    Mode(OrderMode),
    Explicit(Vec<String>),
}

impl Default for CategoryOrder {
    fn default() -> Self {
        CategoryOrder::Mode(OrderMode::Spec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderMode {
    Spec,
    Alphabetical,
}

impl SiteConfig {
    /// Load the site configuration from a YAML or JSON file
    ///
    /// Relative paths inside units are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DocsError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut site: SiteConfig = serde_yaml::from_str(&content).map_err(|e| {
            DocsError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            site.rebase(base);
        }

        Ok(site)
    }

    /// Resolve relative spec paths, output directories and templates against `base`
    pub fn rebase(&mut self, base: &Path) {
        for plugin in self.presets.iter_mut().chain(self.plugins.iter_mut()) {
            for unit in plugin.config.values_mut() {
                unit.rebase(base);
            }
        }
    }

    /// All plugin entries, presets first
    pub fn entries(&self) -> impl Iterator<Item = &PluginConfig> {
        self.presets.iter().chain(self.plugins.iter())
    }

    /// Find the plugin instance to operate on
    ///
    /// Without an explicit id, the `default` instance is used, or the only
    /// instance when there is exactly one.
    pub fn resolve_plugin(&self, plugin_id: Option<&str>) -> Result<&PluginConfig> {
        match plugin_id {
            Some(id) => self.entries().find(|p| p.id == id).ok_or_else(|| {
                DocsError::Config(format!(
                    "Plugin instance \"{}\" not found (available: {})",
                    id,
                    self.plugin_ids().join(", ")
                ))
            }),
            None => {
                if let Some(plugin) = self.entries().find(|p| p.id == DEFAULT_PLUGIN_ID) {
                    return Ok(plugin);
                }
                let mut entries = self.entries();
                match (entries.next(), entries.next()) {
                    (Some(only), None) => Ok(only),
                    (None, _) => Err(DocsError::Config(
                        "No API docs plugin configured".to_string(),
                    )),
                    _ => Err(DocsError::Config(format!(
                        "Multiple plugin instances configured ({}); pass --plugin-id",
                        self.plugin_ids().join(", ")
                    ))),
                }
            }
        }
    }

    fn plugin_ids(&self) -> Vec<&str> {
        self.entries().map(|p| p.id.as_str()).collect()
    }
}

impl PluginConfig {
    /// Find a configuration unit by key
    pub fn resolve_unit(&self, key: &str) -> Result<&UnitConfig> {
        self.config.get(key).ok_or_else(|| {
            DocsError::Config(format!(
                "Configuration \"{}\" not found in plugin \"{}\" (available: {})",
                key,
                self.id,
                self.config.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })
    }
}

impl UnitConfig {
    /// Build the unit for one version, inheriting template and sidebar options
    pub fn version_unit(&self, version_id: &str) -> Result<UnitConfig> {
        let version = self.versions.get(version_id).ok_or_else(|| {
            DocsError::Config(format!(
                "Version \"{}\" not found (available: {})",
                version_id,
                self.versions.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })?;

        Ok(UnitConfig {
            spec_path: version.spec_path.clone(),
            output_dir: version.output_dir.clone(),
            template: version.template.clone().or_else(|| self.template.clone()),
            sidebar_options: version
                .sidebar_options
                .clone()
                .or_else(|| self.sidebar_options.clone()),
            version: Some(version_id.to_string()),
            label: Some(version.label.clone()),
            base_url: Some(version.base_url.clone()),
            versions: IndexMap::new(),
        })
    }

    /// Whether the spec path points at a remote document
    pub fn is_remote(&self) -> bool {
        is_url(&self.spec_path)
    }

    fn rebase(&mut self, base: &Path) {
        if !self.is_remote() {
            self.spec_path = rebase_path(base, Path::new(&self.spec_path))
                .to_string_lossy()
                .into_owned();
        }
        self.output_dir = rebase_path(base, &self.output_dir);
        self.template = self.template.as_deref().map(|t| rebase_path(base, t));

        for version in self.versions.values_mut() {
            if !is_url(&version.spec_path) {
                version.spec_path = rebase_path(base, Path::new(&version.spec_path))
                    .to_string_lossy()
                    .into_owned();
            }
            version.output_dir = rebase_path(base, &version.output_dir);
            version.template = version.template.as_deref().map(|t| rebase_path(base, t));
        }
    }
}

/// Case-insensitive `http://` / `https://` prefix check
pub fn is_url(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn rebase_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
