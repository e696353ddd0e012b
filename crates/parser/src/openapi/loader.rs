//! OpenAPI spec loading
//!
//! A spec location is a single file, a directory of spec files, or an
//! http(s) URL. Directories are walked recursively and files describing the
//! same API are merged into one document.

use super::fetch::{HttpFetcher, SpecFetcher};
use super::merge::group_and_merge;
use openapi_docs_gen_common::{is_url, DocsError, OpenApiDocument, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Extensions recognized as spec files when scanning a directory
pub const SPEC_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Serialization format of a spec document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// Detect format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(SpecFormat::Json),
            "yaml" | "yml" => Some(SpecFormat::Yaml),
            _ => None,
        }
    }

    /// Guess format from content: JSON documents open with `{`
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            SpecFormat::Json
        } else {
            SpecFormat::Yaml
        }
    }
}

/// Options controlling how spec files are combined
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Merge every file of a directory into one document, regardless of title
    pub group_key: Option<String>,
}

/// Loads and merges OpenAPI documents
///
/// Parsed documents are cached by location for the lifetime of the loader,
/// so several units sharing one spec read it once per invocation.
pub struct SpecLoader {
    fetcher: Box<dyn SpecFetcher>,
    options: LoadOptions,
    cache: HashMap<String, Vec<OpenApiDocument>>,
}

impl SpecLoader {
    /// Create a loader fetching remote specs over HTTP
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Box::new(HttpFetcher::new()?)))
    }

    pub fn with_fetcher(fetcher: Box<dyn SpecFetcher>) -> Self {
        Self {
            fetcher,
            options: LoadOptions::default(),
            cache: HashMap::new(),
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Load every logical API found at `location`
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut loader = SpecLoader::new()?;
    /// let documents = loader.load("specs/petstore.yaml")?;
    /// ```
    pub fn load(&mut self, location: &str) -> Result<Vec<OpenApiDocument>> {
        if let Some(cached) = self.cache.get(location) {
            tracing::debug!(location, "using cached spec");
            return Ok(cached.clone());
        }

        let documents = self.load_uncached(location)?;
        self.cache.insert(location.to_string(), documents.clone());
        Ok(documents)
    }

    fn load_uncached(&self, location: &str) -> Result<Vec<OpenApiDocument>> {
        if is_url(location) {
            let content = self.fetcher.fetch(location.trim())?;
            let doc = parse_document(&content, SpecFormat::sniff(&content), location)?;
            return Ok(vec![doc]);
        }

        let path = Path::new(location);
        if !path.exists() {
            return Err(DocsError::load(location, "no such file or directory"));
        }

        if path.is_dir() {
            self.load_directory(path)
        } else {
            Ok(vec![load_file(path)?])
        }
    }

    fn load_directory(&self, dir: &Path) -> Result<Vec<OpenApiDocument>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry =
                entry.map_err(|e| DocsError::load(dir.display().to_string(), e))?;
            let path = entry.path();
            if entry.file_type().is_file() && SpecFormat::from_path(path).is_some() {
                files.push(path.to_path_buf());
            }
        }

        if files.is_empty() {
            return Err(DocsError::load(
                dir.display().to_string(),
                format!("no spec files ({}) found", SPEC_EXTENSIONS.join(", ")),
            ));
        }

        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            tracing::debug!(file = %file.display(), "loading spec file");
            documents.push(load_file(file)?);
        }

        Ok(group_and_merge(documents, self.options.group_key.as_deref()))
    }
}

/// Read and parse a single spec file
pub fn load_file(path: &Path) -> Result<OpenApiDocument> {
    let location = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| DocsError::load(&location, e))?;
    let format = SpecFormat::from_path(path).unwrap_or_else(|| SpecFormat::sniff(&content));
    parse_document(&content, format, &location)
}

/// Parse spec text into a document
pub fn parse_document(
    content: &str,
    format: SpecFormat,
    location: &str,
) -> Result<OpenApiDocument> {
    let doc: OpenApiDocument = match format {
        SpecFormat::Json => serde_json::from_str(content)
            .map_err(|e| DocsError::load(location, format!("invalid JSON: {}", e)))?,
        SpecFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| DocsError::load(location, format!("invalid YAML: {}", e)))?,
    };

    if doc.openapi.is_empty() {
        let reason = match &doc.swagger {
            Some(version) => format!("Swagger {} documents are not supported", version),
            None => "missing `openapi` version field".to_string(),
        };
        return Err(DocsError::load(location, reason));
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::super::fetch::MockSpecFetcher;
    use super::*;

    const PETSTORE: &str = r#"{
        "openapi": "3.0.0",
        "info": {"title": "Petstore", "version": "1.0.0"},
        "paths": {"/pets": {"get": {"summary": "List pets"}}}
    }"#;

    #[test]
    fn test_parse_minimal_openapi() {
        let doc = parse_document(PETSTORE, SpecFormat::Json, "inline").unwrap();
        assert_eq!(doc.openapi, "3.0.0");
        assert_eq!(doc.info.title, "Petstore");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "openapi: 3.0.3\ninfo:\n  title: Petstore\n  version: '1'\npaths:\n  /pets:\n    get:\n      summary: List pets\n      responses:\n        200:\n          description: OK\n";
        let doc = parse_document(yaml, SpecFormat::Yaml, "inline.yaml").unwrap();
        let op = &doc.paths["/pets"].operations["get"];
        assert!(op.responses.contains_key("200"));
    }

    #[test]
    fn test_swagger_rejected() {
        let json = r#"{"swagger": "2.0", "info": {"title": "Old", "version": "1"}}"#;
        let err = parse_document(json, SpecFormat::Json, "old.json").unwrap_err();
        assert!(err.to_string().contains("Swagger 2.0"));
        assert!(err.to_string().contains("old.json"));
    }

    #[test]
    fn test_sniff_format() {
        assert_eq!(SpecFormat::sniff("  {\"openapi\": 1}"), SpecFormat::Json);
        assert_eq!(SpecFormat::sniff("openapi: 3.0.0"), SpecFormat::Yaml);
        assert_eq!(
            SpecFormat::from_path(Path::new("spec.YML")),
            Some(SpecFormat::Yaml)
        );
    }

    #[test]
    fn test_url_uses_fetcher_once() {
        let mut fetcher = MockSpecFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url == "HTTPS://example.com/petstore.json")
            .times(1)
            .returning(|_| Ok(PETSTORE.to_string()));

        let mut loader = SpecLoader::with_fetcher(Box::new(fetcher));
        let docs = loader.load("HTTPS://example.com/petstore.json").unwrap();
        assert_eq!(docs.len(), 1);

        // second load is served from the cache
        let again = loader.load("HTTPS://example.com/petstore.json").unwrap();
        assert_eq!(again[0].info.title, "Petstore");
    }

    #[test]
    fn test_fetch_failure_is_load_error() {
        let mut fetcher = MockSpecFetcher::new();
        fetcher.expect_fetch().returning(|url| {
            Err(DocsError::load(url, "HTTP status 404 Not Found"))
        });

        let mut loader = SpecLoader::with_fetcher(Box::new(fetcher));
        let err = loader.load("https://example.com/missing.json").unwrap_err();
        assert!(matches!(err, DocsError::Load { .. }));
    }

    #[test]
    fn test_missing_location() {
        let mut loader = SpecLoader::with_fetcher(Box::new(MockSpecFetcher::new()));
        let err = loader.load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
