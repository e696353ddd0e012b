//! Page and sidebar generation for OpenAPI documentation
//!
//! This crate turns normalized records into documentation artifacts:
//! one MDX page per record, a `sidebar.js` navigation slice, and the
//! versions manifest of versioned units. It also provides the clean
//! operations that remove those artifacts again.

pub mod batch;
pub mod clean;
mod pages;
pub mod sidebar;
mod templates;
pub mod versions;
mod writer;

pub use batch::{
    clean_docs, clean_version_docs, generate_docs, generate_version_docs, Selector, UnitOutcome,
    VersionSelector,
};
pub use clean::{clean_output_dir, CleanReport, GENERATED_PATTERNS};
pub use sidebar::{doc_base_path, SidebarBuilder, SidebarNode, SidebarSlice};
pub use versions::{version_manifest, write_version_manifest, VersionEntry, VERSIONS_FILE};
pub use writer::{write_if_absent, WriteOutcome};

use openapi_docs_gen_common::{
    DocsError, NormalizedDocs, NormalizedRecord, Result, SidebarOptions, UnitConfig,
};
use openapi_docs_gen_parser::{checked_id, load_and_normalize, SpecLoader};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// File name of the emitted sidebar slice
pub const SIDEBAR_FILE: &str = "sidebar.js";

/// Outcome of one generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written by this run
    pub created: Vec<PathBuf>,
    /// Files left untouched because they already existed
    pub skipped: Vec<PathBuf>,
    /// Records or files that could not be emitted
    pub failures: Vec<DocsError>,
    /// Sidebar misconfigurations that were worked around
    pub diagnostics: Vec<DocsError>,
}

impl GenerationReport {
    fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created => self.created.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }
}

/// Documentation generator
///
/// Emits normalized records into an output directory:
/// - `<id>.info.mdx` per API
/// - `<id>.api.mdx` per operation
/// - `<id>.tag.mdx` per tag
/// - `sidebar.js` when sidebar options are set
pub struct ApiDocsGenerator {
    docs: NormalizedDocs,
    tera: Tera,
    sidebar_options: Option<SidebarOptions>,
}

impl ApiDocsGenerator {
    /// Create a new generator with the built-in templates
    pub fn new(docs: NormalizedDocs) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            docs,
            tera,
            sidebar_options: None,
        })
    }

    /// Render api pages with a custom template file
    pub fn with_api_template(mut self, path: &Path) -> Result<Self> {
        templates::override_api_template(&mut self.tera, path)?;
        Ok(self)
    }

    /// Also emit a sidebar slice built with these options
    pub fn with_sidebar(mut self, options: SidebarOptions) -> Self {
        self.sidebar_options = Some(options);
        self
    }

    pub fn docs(&self) -> &NormalizedDocs {
        &self.docs
    }

    /// Generate all pages to a directory
    ///
    /// Existing files are skipped. A record that fails to emit is reported
    /// in [`GenerationReport::failures`] and its siblings are still written.
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<GenerationReport> {
        fs::create_dir_all(output_dir).map_err(|source| DocsError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut report = GenerationReport::default();

        for record in &self.docs.records {
            match self.emit_record(record, output_dir) {
                Ok((path, outcome)) => report.record(path, outcome),
                Err(e) => {
                    tracing::warn!(record = %record.label(), "{}", e);
                    report.failures.push(e);
                }
            }
        }

        if let Some(options) = &self.sidebar_options {
            let mut slice = SidebarBuilder::new(&self.docs, options)
                .with_base_path(doc_base_path(output_dir))
                .build();
            report.diagnostics.append(&mut slice.diagnostics);

            let path = output_dir.join(SIDEBAR_FILE);
            match slice
                .to_module()
                .and_then(|module| write_if_absent(&path, &module))
            {
                Ok(outcome) => report.record(path, outcome),
                Err(e) => report.failures.push(e),
            }
        }

        tracing::debug!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            failed = report.failures.len(),
            "generated {}",
            output_dir.display()
        );

        Ok(report)
    }

    fn emit_record(
        &self,
        record: &NormalizedRecord,
        output_dir: &Path,
    ) -> Result<(PathBuf, WriteOutcome)> {
        checked_id(record)?;
        let content = pages::render_page(&self.tera, &self.docs, record)?;
        let path = output_dir.join(record.file_name());
        let outcome = write_if_absent(&path, &content)?;
        Ok((path, outcome))
    }
}

/// Generate documentation for one configuration unit
///
/// Loading failures abort the unit; per-record failures are collected
/// in the returned report.
pub fn generate_api_docs(unit: &UnitConfig, loader: &mut SpecLoader) -> Result<GenerationReport> {
    let docs = load_and_normalize(loader, &unit.spec_path)?;

    let mut generator = ApiDocsGenerator::new(docs)?;
    if let Some(template) = &unit.template {
        generator = generator.with_api_template(template)?;
    }
    if let Some(options) = &unit.sidebar_options {
        generator = generator.with_sidebar(options.clone());
    }

    generator.generate_to_directory(&unit.output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_docs_gen_common::OpenApiDocument;
    use openapi_docs_gen_parser::normalize;
    use tempfile::TempDir;

    fn docs() -> NormalizedDocs {
        let doc: OpenApiDocument = serde_json::from_str(
            r#"{
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "version": "1"},
                "paths": {
                    "/pets": {"get": {"summary": "List Pets", "tags": ["pets"]}},
                    "/pets/{id}": {"delete": {"tags": ["pets"]}}
                }
            }"#,
        )
        .unwrap();
        normalize(&[doc])
    }

    #[test]
    fn test_invalid_id_does_not_stop_siblings() {
        let dir = TempDir::new().unwrap();
        let generator = ApiDocsGenerator::new(docs()).unwrap();

        let report = generator.generate_to_directory(dir.path()).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0], DocsError::InvalidId { .. }));
        assert!(dir.path().join("petstore.info.mdx").exists());
        assert!(dir.path().join("list-pets.api.mdx").exists());
        assert!(dir.path().join("pets.tag.mdx").exists());
        assert_eq!(report.created.len(), 3);
    }

    #[test]
    fn test_write_error_does_not_stop_siblings() {
        let dir = TempDir::new().unwrap();
        let long_name = "x".repeat(300);
        let doc: OpenApiDocument = serde_json::from_value(serde_json::json!({
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "paths": {
                "/pets": {"get": {"summary": "List Pets", "tags": ["pets"]}},
                "/pets/{id}": {"get": {"summary": long_name, "tags": ["pets"]}}
            }
        }))
        .unwrap();
        let generator = ApiDocsGenerator::new(normalize(&[doc])).unwrap();

        let report = generator.generate_to_directory(dir.path()).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0], DocsError::Write { .. }));
        assert!(dir.path().join("petstore.info.mdx").exists());
        assert!(dir.path().join("list-pets.api.mdx").exists());
        assert!(dir.path().join("pets.tag.mdx").exists());
        assert_eq!(report.created.len(), 3);
    }

    #[test]
    fn test_sidebar_only_with_options() {
        let dir = TempDir::new().unwrap();
        let generator = ApiDocsGenerator::new(docs()).unwrap();
        generator.generate_to_directory(dir.path()).unwrap();
        assert!(!dir.path().join(SIDEBAR_FILE).exists());

        let dir = TempDir::new().unwrap();
        let generator = ApiDocsGenerator::new(docs())
            .unwrap()
            .with_sidebar(SidebarOptions::default());
        generator.generate_to_directory(dir.path()).unwrap();

        let module = fs::read_to_string(dir.path().join(SIDEBAR_FILE)).unwrap();
        assert!(module.starts_with("module.exports = "));
        assert!(module.contains("\"list-pets\""));
    }

    #[test]
    fn test_missing_template_override() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.mdx.tera");
        let result = ApiDocsGenerator::new(docs()).and_then(|g| g.with_api_template(&missing));
        assert!(matches!(result, Err(DocsError::Template(_))));
    }
}
