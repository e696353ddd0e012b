//! Combining spec files that describe the same API
//!
//! Documents are folded in load order. On key collisions the later
//! document wins; insertion position stays where the key first appeared.

use indexmap::IndexMap;
use openapi_docs_gen_common::OpenApiDocument;

/// Fold an ordered sequence of documents into one
///
/// Returns `None` for an empty sequence.
pub fn merge_documents<I>(documents: I) -> Option<OpenApiDocument>
where
    I: IntoIterator<Item = OpenApiDocument>,
{
    documents.into_iter().reduce(merge_pair)
}

/// Group documents by logical API and merge each group
///
/// Documents are grouped by `info.title` unless `group_key` is given, in
/// which case every document lands in that single group. Groups keep the
/// order in which their first document was loaded.
pub fn group_and_merge(
    documents: Vec<OpenApiDocument>,
    group_key: Option<&str>,
) -> Vec<OpenApiDocument> {
    let mut groups: IndexMap<String, Vec<OpenApiDocument>> = IndexMap::new();

    for doc in documents {
        let key = group_key
            .map(String::from)
            .unwrap_or_else(|| doc.info.title.clone());
        groups.entry(key).or_default().push(doc);
    }

    groups
        .into_values()
        .filter_map(merge_documents)
        .collect()
}

fn merge_pair(mut base: OpenApiDocument, next: OpenApiDocument) -> OpenApiDocument {
    for (path, item) in next.paths {
        let target = base.paths.entry(path.clone()).or_default();

        if !item.parameters.is_empty() {
            target.parameters = item.parameters;
        }
        if item.summary.is_some() {
            target.summary = item.summary;
        }
        if item.description.is_some() {
            target.description = item.description;
        }

        for (method, operation) in item.operations {
            if target.operations.insert(method.clone(), operation).is_some() {
                tracing::debug!(%path, %method, "operation replaced by later spec file");
            }
        }
    }

    let components = next.components;
    merge_map(&mut base.components.schemas, components.schemas);
    merge_map(&mut base.components.parameters, components.parameters);
    merge_map(&mut base.components.responses, components.responses);
    merge_map(&mut base.components.request_bodies, components.request_bodies);
    merge_map(
        &mut base.components.security_schemes,
        components.security_schemes,
    );

    for tag in next.tags {
        match base.tags.iter_mut().find(|t| t.name == tag.name) {
            Some(existing) => {
                if tag.description.as_deref().is_some_and(|d| !d.is_empty()) {
                    existing.description = tag.description;
                }
            }
            None => base.tags.push(tag),
        }
    }

    for group in next.tag_groups {
        match base.tag_groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => {
                for tag in group.tags {
                    if !existing.tags.contains(&tag) {
                        existing.tags.push(tag);
                    }
                }
            }
            None => base.tag_groups.push(group),
        }
    }

    if base.external_docs.is_none() {
        base.external_docs = next.external_docs;
    }

    base
}

fn merge_map<V>(target: &mut IndexMap<String, V>, source: IndexMap<String, V>) {
    for (key, value) in source {
        target.insert(key, value);
    }
}
