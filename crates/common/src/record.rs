//! Normalized page records
//!
//! Every OpenAPI document is flattened into one info record, one api
//! record per operation and one tag record per tag. Records are the unit
//! of page emission and the input of sidebar building.

use crate::openapi::{ExternalDocs, Info, Operation, TagGroup};
use serde::Serialize;
use std::fmt;

/// Record variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Api,
    Info,
    Tag,
}

impl RecordKind {
    /// File suffix of the emitted page, e.g. `api.mdx`
    pub fn file_suffix(&self) -> &'static str {
        match self {
            RecordKind::Api => "api.mdx",
            RecordKind::Info => "info.mdx",
            RecordKind::Tag => "tag.mdx",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Api => write!(f, "api"),
            RecordKind::Info => write!(f, "info"),
            RecordKind::Tag => write!(f, "tag"),
        }
    }
}

/// One operation page
#[derive(Debug, Clone, Serialize)]
pub struct ApiRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Lowercase HTTP method
    pub method: String,
    pub path: String,
    pub deprecated: bool,
    pub tags: Vec<String>,
    /// Id of the info record of the document declaring this operation
    pub info_id: String,
    /// `"<method> <path>"`
    pub sort_key: String,
    pub operation: Operation,
}

/// Document overview page
#[derive(Debug, Clone, Serialize)]
pub struct InfoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub info: Info,
    /// Tag names present in the document
    pub tags: Vec<String>,
    pub tag_groups: Vec<TagGroup>,
    pub external_docs: Option<ExternalDocs>,
}

/// Tag overview page
#[derive(Debug, Clone, Serialize)]
pub struct TagRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub name: String,
    /// Whether the tag appears in the document's top-level `tags` list
    pub declared: bool,
    /// Id of the info record of the document declaring this tag
    pub info_id: String,
    /// Ids of the api records carrying this tag, in emission order
    pub api_ids: Vec<String>,
}

/// A normalized page record
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NormalizedRecord {
    Api(ApiRecord),
    Info(InfoRecord),
    Tag(TagRecord),
}

impl NormalizedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            NormalizedRecord::Api(_) => RecordKind::Api,
            NormalizedRecord::Info(_) => RecordKind::Info,
            NormalizedRecord::Tag(_) => RecordKind::Tag,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            NormalizedRecord::Api(r) => &r.id,
            NormalizedRecord::Info(r) => &r.id,
            NormalizedRecord::Tag(r) => &r.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            NormalizedRecord::Api(r) => &r.title,
            NormalizedRecord::Info(r) => &r.title,
            NormalizedRecord::Tag(r) => &r.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            NormalizedRecord::Api(r) => &r.description,
            NormalizedRecord::Info(r) => &r.description,
            NormalizedRecord::Tag(r) => &r.description,
        }
    }

    /// Human-readable label used in diagnostics
    ///
    /// Api records are labelled by method and path since an unnamed
    /// operation has no title to show.
    pub fn label(&self) -> String {
        match self {
            NormalizedRecord::Api(r) => format!("{} {}", r.method.to_uppercase(), r.path),
            NormalizedRecord::Info(r) => r.title.clone(),
            NormalizedRecord::Tag(r) => r.name.clone(),
        }
    }

    /// File name of the emitted page, e.g. `get-pet.api.mdx`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id(), self.kind().file_suffix())
    }

    pub fn as_api(&self) -> Option<&ApiRecord> {
        match self {
            NormalizedRecord::Api(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_info(&self) -> Option<&InfoRecord> {
        match self {
            NormalizedRecord::Info(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagRecord> {
        match self {
            NormalizedRecord::Tag(r) => Some(r),
            _ => None,
        }
    }
}

/// Output of normalization for one generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedDocs {
    /// Records in emission order
    pub records: Vec<NormalizedRecord>,
    /// Known tag names across all documents, deduplicated
    pub tags: Vec<String>,
}

impl NormalizedDocs {
    pub fn api_records(&self) -> impl Iterator<Item = &ApiRecord> {
        self.records.iter().filter_map(NormalizedRecord::as_api)
    }

    pub fn info_records(&self) -> impl Iterator<Item = &InfoRecord> {
        self.records.iter().filter_map(NormalizedRecord::as_info)
    }

    pub fn tag_records(&self) -> impl Iterator<Item = &TagRecord> {
        self.records.iter().filter_map(NormalizedRecord::as_tag)
    }

    /// Look up a record by id; empty ids never match
    pub fn find(&self, id: &str) -> Option<&NormalizedRecord> {
        if id.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.id() == id)
    }
}
