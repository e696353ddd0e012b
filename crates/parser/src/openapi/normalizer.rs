//! Flattens merged OpenAPI documents into page records

use crate::slug::IdResolver;
use openapi_docs_gen_common::{
    ApiRecord, InfoRecord, NormalizedDocs, NormalizedRecord, OpenApiDocument, TagRecord,
};

/// Normalize documents into one record list with run-wide unique ids
///
/// Per document the emission order is: the info record, one api record per
/// operation (path declaration order, then fixed method precedence), then
/// one tag record per tag.
pub fn normalize(documents: &[OpenApiDocument]) -> NormalizedDocs {
    let mut resolver = IdResolver::new();
    let mut output = NormalizedDocs::default();

    for doc in documents {
        normalize_document(doc, &mut resolver, &mut output);
    }

    tracing::debug!(
        records = output.records.len(),
        tags = output.tags.len(),
        "normalized documents"
    );
    output
}

fn normalize_document(
    doc: &OpenApiDocument,
    resolver: &mut IdResolver,
    output: &mut NormalizedDocs,
) {
    let tag_names = doc.tag_names();
    let info_id = resolver.resolve(&doc.info.title);

    output.records.push(NormalizedRecord::Info(InfoRecord {
        id: info_id.clone(),
        title: doc.info.title.clone(),
        description: doc.info.description.clone().unwrap_or_default(),
        info: doc.info.clone(),
        tags: tag_names.clone(),
        tag_groups: doc.tag_groups.clone(),
        external_docs: doc.external_docs.clone(),
    }));

    let mut api_records = Vec::new();
    for (path, item) in &doc.paths {
        for (method, operation) in item.ordered_operations() {
            let title = non_blank(operation.summary.as_deref())
                .or_else(|| non_blank(operation.operation_id.as_deref()))
                .unwrap_or_default()
                .to_string();

            let mut tags: Vec<String> = Vec::with_capacity(operation.tags.len());
            for tag in &operation.tags {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }

            // path-level parameters apply to every operation below the path
            let mut operation = operation.clone();
            for param in &item.parameters {
                let overridden = operation
                    .parameters
                    .iter()
                    .any(|p| p.name == param.name && p.location == param.location);
                if !overridden {
                    operation.parameters.push(param.clone());
                }
            }

            api_records.push(ApiRecord {
                id: resolver.resolve(&title),
                description: operation.description.clone().unwrap_or_default(),
                title,
                method: method.to_string(),
                path: path.clone(),
                deprecated: operation.deprecated,
                tags,
                info_id: info_id.clone(),
                sort_key: format!("{} {}", method, path),
                operation,
            });
        }
    }

    let mut tag_records = Vec::with_capacity(tag_names.len());
    for name in &tag_names {
        let api_ids = api_records
            .iter()
            .filter(|api| api.tags.contains(name) && !api.id.is_empty())
            .map(|api| api.id.clone())
            .collect();

        tag_records.push(TagRecord {
            id: resolver.resolve(name),
            title: name.clone(),
            description: doc.tag_description(name).unwrap_or_default().to_string(),
            name: name.clone(),
            declared: doc.declares_tag(name),
            info_id: info_id.clone(),
            api_ids,
        });

        if !output.tags.contains(name) {
            output.tags.push(name.clone());
        }
    }

    output
        .records
        .extend(api_records.into_iter().map(NormalizedRecord::Api));
    output
        .records
        .extend(tag_records.into_iter().map(NormalizedRecord::Tag));
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_docs_gen_common::RecordKind;

    fn doc(json: &str) -> OpenApiDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_info_record_for_empty_paths() {
        let docs = normalize(&[doc(
            r#"{"openapi": "3.0.0", "info": {"title": "Empty API", "version": "1"}}"#,
        )]);

        assert_eq!(docs.records.len(), 1);
        assert_eq!(docs.records[0].kind(), RecordKind::Info);
        assert_eq!(docs.records[0].id(), "empty-api");
        assert!(docs.tags.is_empty());
    }

    #[test]
    fn test_get_before_post() {
        let docs = normalize(&[doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "paths": {
                "/pets": {
                    "post": {"summary": "Add pet"},
                    "get": {"summary": "List pets"}
                },
                "/pets/{id}": {
                    "delete": {"operationId": "deletePet"}
                }
            }
        }"#)]);

        let ids: Vec<&str> = docs.api_records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["list-pets", "add-pet", "deletepet"]);

        let first = docs.api_records().next().unwrap();
        assert_eq!(first.info_id, "petstore");
        assert_eq!(first.sort_key, "get /pets");
    }

    #[test]
    fn test_duplicate_summaries() {
        let docs = normalize(&[doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "paths": {
                "/pets/{id}": {"get": {"summary": "Get Pet"}},
                "/v2/pets/{id}": {"get": {"summary": "Get Pet"}}
            }
        }"#)]);

        let ids: Vec<&str> = docs.api_records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["get-pet", "get-pet-2"]);
    }

    #[test]
    fn test_tag_records_union_sources() {
        let docs = normalize(&[doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "tags": [{"name": "store", "description": "Access to orders"}, {"name": "user"}],
            "paths": {
                "/pets": {"get": {"summary": "List pets", "tags": ["pets", "store"]}}
            }
        }"#)]);

        assert_eq!(docs.tags, vec!["store", "user", "pets"]);

        let tags: Vec<&TagRecord> = docs.tag_records().collect();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].description, "Access to orders");
        assert!(tags[0].declared);
        assert_eq!(tags[0].api_ids, vec!["list-pets"]);
        assert!(tags[1].api_ids.is_empty());
        assert_eq!(tags[2].description, "");
        assert!(!tags[2].declared);
    }

    #[test]
    fn test_unnamed_operation_keeps_empty_id() {
        let docs = normalize(&[doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "paths": {
                "/a": {"get": {"tags": ["x"]}},
                "/b": {"get": {"summary": "  "}},
                "/c": {"get": {"summary": "Named"}}
            }
        }"#)]);

        let ids: Vec<&str> = docs.api_records().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["", "", "named"]);
        assert!(docs.tag_records().next().unwrap().api_ids.is_empty());
    }

    #[test]
    fn test_deprecated_flag_and_path_parameters() {
        let docs = normalize(&[doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "paths": {
                "/pets/{id}": {
                    "parameters": [{"name": "id", "in": "path", "required": true}],
                    "get": {"summary": "Old get", "deprecated": true}
                }
            }
        }"#)]);

        let api = docs.api_records().next().unwrap();
        assert!(api.deprecated);
        assert_eq!(api.operation.parameters.len(), 1);
    }

    #[test]
    fn test_ids_unique_across_documents() {
        let first = doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Pets", "version": "1"},
            "paths": {"/pets": {"get": {"summary": "List", "tags": ["pets"]}}}
        }"#);
        let second = doc(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Store", "version": "1"},
            "paths": {"/orders": {"get": {"summary": "List", "tags": ["pets"]}}}
        }"#);

        let docs = normalize(&[first, second]);
        let ids: Vec<&str> = docs.records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["pets", "list", "pets-2", "store", "list-2", "pets-3"]);
        assert_eq!(docs.tags, vec!["pets"]);
    }
}
