//! Page rendering contexts

use crate::templates::{API_TEMPLATE, INFO_TEMPLATE, TAG_TEMPLATE};
use openapi_docs_gen_common::{
    ApiRecord, DocsError, InfoRecord, NormalizedDocs, NormalizedRecord, Result, TagRecord,
};
use serde::Serialize;
use tera::{Context, Tera};

#[derive(Debug, Serialize)]
struct ParameterRow {
    name: String,
    location: String,
    required: bool,
    description: String,
}

#[derive(Debug, Serialize)]
struct RequestBodyView {
    required: bool,
    description: String,
    media_types: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ResponseRow {
    status: String,
    description: String,
    media_types: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TagRow {
    id: String,
    title: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct OperationRow {
    id: String,
    title: String,
    method: String,
}

/// Render the page body of a record
pub(crate) fn render_page(
    tera: &Tera,
    docs: &NormalizedDocs,
    record: &NormalizedRecord,
) -> Result<String> {
    let (template, context) = match record {
        NormalizedRecord::Api(api) => (API_TEMPLATE, api_context(docs, api)),
        NormalizedRecord::Info(info) => (INFO_TEMPLATE, info_context(docs, info)),
        NormalizedRecord::Tag(tag) => (TAG_TEMPLATE, tag_context(docs, tag)),
    };

    tera.render(template, &context).map_err(|e| {
        DocsError::Template(format!(
            "Failed to render {} for \"{}\": {}",
            template,
            record.label(),
            e
        ))
    })
}

fn api_context(docs: &NormalizedDocs, api: &ApiRecord) -> Context {
    let mut context = Context::new();
    context.insert("record", api);

    let info_path = docs
        .find(&api.info_id)
        .and_then(NormalizedRecord::as_info)
        .map(|info| info.id.clone());
    context.insert("info_path", &info_path);

    let parameters: Vec<ParameterRow> = api
        .operation
        .parameters
        .iter()
        .map(|p| ParameterRow {
            name: if p.name.is_empty() {
                p.ref_path
                    .as_deref()
                    .and_then(|r| r.rsplit('/').next())
                    .unwrap_or_default()
                    .to_string()
            } else {
                p.name.clone()
            },
            location: p.location.clone(),
            required: p.required,
            description: table_cell(p.description.as_deref().unwrap_or_default()),
        })
        .collect();
    context.insert("parameters", &parameters);

    let request_body = api.operation.request_body.as_ref().map(|body| RequestBodyView {
        required: body.required,
        description: body.description.clone().unwrap_or_default(),
        media_types: body.content.keys().cloned().collect(),
    });
    context.insert("request_body", &request_body);

    let responses: Vec<ResponseRow> = api
        .operation
        .responses
        .iter()
        .map(|(status, response)| ResponseRow {
            status: status.clone(),
            description: table_cell(&response.description),
            media_types: response.content.keys().cloned().collect(),
        })
        .collect();
    context.insert("responses", &responses);

    context
}

fn info_context(docs: &NormalizedDocs, info: &InfoRecord) -> Context {
    let mut context = Context::new();
    context.insert("record", info);

    let tags: Vec<TagRow> = docs
        .tag_records()
        .filter(|tag| tag.info_id == info.id && !tag.id.is_empty())
        .map(|tag| TagRow {
            id: tag.id.clone(),
            title: tag.title.clone(),
            description: first_line(&tag.description),
        })
        .collect();
    context.insert("tags", &tags);

    context
}

fn tag_context(docs: &NormalizedDocs, tag: &TagRecord) -> Context {
    let mut context = Context::new();
    context.insert("record", tag);

    let operations: Vec<OperationRow> = tag
        .api_ids
        .iter()
        .filter_map(|id| docs.find(id).and_then(NormalizedRecord::as_api))
        .map(|api| OperationRow {
            id: api.id.clone(),
            title: api.title.clone(),
            method: api.method.clone(),
        })
        .collect();
    context.insert("operations", &operations);

    context
}

/// Flatten text for a markdown table cell
fn table_cell(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim().to_string()
}
