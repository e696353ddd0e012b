//! Common types and utilities for openapi-docs-gen
//!
//! This crate contains the OpenAPI document model, the normalized page
//! records produced from it, the host configuration model and the error
//! type shared by the parser, generator, and CLI components.

pub mod config;
pub mod openapi;
pub mod record;

pub use config::{
    is_url, CategoryLinkSource, CategoryOrder, GroupPathsBy, OrderMode, PluginConfig,
    SidebarOptions, SiteConfig, UnitConfig, VersionConfig,
};
pub use openapi::{
    Components, Contact, ExternalDocs, Info, License, MediaType, OpenApiDocument, Operation,
    Parameter, PathItem, RequestBody, Response, Server, Tag, TagGroup,
};
pub use record::{ApiRecord, InfoRecord, NormalizedDocs, NormalizedRecord, RecordKind, TagRecord};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating API documentation
#[derive(Error, Debug)]
pub enum DocsError {
    /// Spec unreadable, unparseable or unreachable. Fatal to the configuration unit.
    #[error("Failed to load {location}: {reason}")]
    Load { location: String, reason: String },

    /// A record resolved to an empty identifier. Fatal to that record only.
    #[error("Cannot derive an id for {kind} record \"{label}\": resolved slug is empty")]
    InvalidId { kind: RecordKind, label: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DocsError {
    /// Build a load error for a spec location
    pub fn load(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        DocsError::Load {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error only affects a single record or file
    pub fn is_per_record(&self) -> bool {
        matches!(self, DocsError::InvalidId { .. } | DocsError::Write { .. })
    }
}

/// Result type for documentation generation
pub type Result<T> = std::result::Result<T, DocsError>;
