//! OpenAPI 3.x document model
//!
//! Simplified representation focusing on what documentation pages need:
//! metadata, operations, tags and shared components. Schemas are kept as
//! raw JSON values since they are rendered, never validated.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed method precedence used when listing the operations of a path
pub const METHOD_ORDER: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Path item keys that are never operations
const PATH_ITEM_FIELDS: [&str; 5] = [
    "summary",
    "description",
    "servers",
    "parameters",
    "$ref",
];

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version (e.g., "3.0.3")
    #[serde(default)]
    pub openapi: String,

    /// Swagger version, only present on 2.0 documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    /// API metadata
    pub info: Info,

    /// Servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// API paths in declaration order
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Components,

    /// Declared tags
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Tag groups (Redoc `x-tagGroups` extension)
    #[serde(rename = "x-tagGroups", default, skip_serializing_if = "Vec::is_empty")]
    pub tag_groups: Vec<TagGroup>,

    /// External documentation
    #[serde(
        rename = "externalDocs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_docs: Option<ExternalDocs>,
}

/// API information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    /// API title
    #[serde(default)]
    pub title: String,

    /// API version
    #[serde(default)]
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "termsOfService", default)]
    pub terms_of_service: Option<String>,

    #[serde(default)]
    pub contact: Option<Contact>,

    #[serde(default)]
    pub license: Option<License>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL
    pub url: String,

    /// Server description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level tag declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named group of tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalDocs {
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Path item: the operations declared for one path
///
/// Operations are keyed by lowercase method name in declaration order.
/// Any key that is not a path-level field or an `x-` extension is treated
/// as a method, so non-standard methods survive normalization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path-level parameters
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(flatten)]
    pub operations: IndexMap<String, Operation>,
}

impl PathItem {
    /// Operations in fixed method precedence, unknown methods last in encounter order
    pub fn ordered_operations(&self) -> Vec<(&str, &Operation)> {
        let mut ordered: Vec<(&str, &Operation)> = METHOD_ORDER
            .iter()
            .filter_map(|method| {
                self.operations
                    .get_key_value(*method)
                    .map(|(m, op)| (m.as_str(), op))
            })
            .collect();

        ordered.extend(
            self.operations
                .iter()
                .filter(|(method, _)| !METHOD_ORDER.contains(&method.as_str()))
                .map(|(m, op)| (m.as_str(), op)),
        );

        ordered
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: IndexMap<String, Value> = IndexMap::deserialize(deserializer)?;
        let mut item = PathItem::default();

        for (key, value) in raw {
            match key.as_str() {
                "summary" => item.summary = value.as_str().map(String::from),
                "description" => item.description = value.as_str().map(String::from),
                "parameters" => {
                    item.parameters = serde_json::from_value(value).map_err(de::Error::custom)?
                }
                _ if PATH_ITEM_FIELDS.contains(&key.as_str()) || key.starts_with("x-") => {}
                _ => {
                    let operation: Operation = serde_json::from_value(value).map_err(|e| {
                        de::Error::custom(format!("invalid `{}` operation: {}", key, e))
                    })?;
                    item.operations.insert(key.to_lowercase(), operation);
                }
            }
        }

        Ok(item)
    }
}

/// HTTP operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(
        rename = "operationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tags (for grouping)
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code
    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    #[serde(default)]
    pub deprecated: bool,
}

/// Parameter definition (or a reference to one)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in", default)]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
}

/// Request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
}

/// Response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,
}

/// Media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Value>,

    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, Value>,

    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, Value>,
}

impl OpenApiDocument {
    /// Get a schema by reference path
    /// e.g., "#/components/schemas/Pet" -> returns the Pet schema
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Value> {
        let schema_name = ref_path.strip_prefix("#/components/schemas/")?;
        self.components.schemas.get(schema_name)
    }

    /// Tag names in this document: declared tags first, then tags only
    /// referenced by operations, in first-reference order
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let declared = self.tags.iter().map(|t| &t.name);
        let referenced = self
            .paths
            .values()
            .flat_map(|item| item.ordered_operations())
            .flat_map(|(_, op)| op.tags.iter());

        for name in declared.chain(referenced) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Description of a declared tag
    pub fn tag_description(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .and_then(|t| t.description.as_deref())
    }

    /// Whether a tag appears in the top-level `tags` list
    pub fn declares_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_item_orders_methods() {
        let item: PathItem = serde_json::from_str(
            r#"{
                "parameters": [{"name": "id", "in": "path", "required": true}],
                "x-internal": true,
                "search": {"summary": "Search"},
                "post": {"summary": "Create"},
                "get": {"summary": "Fetch"}
            }"#,
        )
        .unwrap();

        let methods: Vec<&str> = item.ordered_operations().iter().map(|(m, _)| *m).collect();
        assert_eq!(methods, vec!["get", "post", "search"]);
        assert_eq!(item.parameters.len(), 1);
    }

    #[test]
    fn test_tag_names_union_declared_and_referenced() {
        let doc: OpenApiDocument = serde_json::from_str(
            r#"{
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "version": "1.0.0"},
                "tags": [{"name": "store", "description": "Orders"}],
                "paths": {
                    "/pets": {"get": {"summary": "List", "tags": ["pets", "store"]}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(doc.tag_names(), vec!["store", "pets"]);
        assert_eq!(doc.tag_description("store"), Some("Orders"));
        assert!(!doc.declares_tag("pets"));
    }

    #[test]
    fn test_resolve_schema_ref() {
        let doc: OpenApiDocument = serde_json::from_str(
            r#"{
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "version": "1.0.0"},
                "components": {"schemas": {"Pet": {"type": "object"}}}
            }"#,
        )
        .unwrap();

        assert!(doc.resolve_schema_ref("#/components/schemas/Pet").is_some());
        assert!(doc.resolve_schema_ref("#/definitions/Pet").is_none());
    }
}
