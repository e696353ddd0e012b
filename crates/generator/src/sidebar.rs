//! Sidebar slice generation
//!
//! Turns normalized records into a navigation tree: intro entries for each
//! API, then one category per tag (optionally grouped by `x-tagGroups` and
//! nested by path segments), then an `Untagged` bucket.

use indexmap::IndexMap;
use openapi_docs_gen_common::{
    ApiRecord, CategoryLinkSource, CategoryOrder, DocsError, GroupPathsBy, NormalizedDocs,
    OrderMode, Result, SidebarOptions,
};
use serde::Serialize;
use serde_json::Value;
use std::path::{Component, Path};

/// Label of the category collecting operations without tags
pub const UNTAGGED_LABEL: &str = "Untagged";

/// A node of the navigation tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarNode {
    Category(SidebarCategory),
    Doc(SidebarDoc),
    Link(SidebarLink),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCategory {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    pub collapsible: bool,
    pub collapsed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Map<String, Value>>,
    pub items: Vec<SidebarNode>,
}

/// Page a category label links to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CategoryLink {
    Doc { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarDoc {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarLink {
    pub label: String,
    pub href: String,
}

impl SidebarNode {
    pub fn label(&self) -> &str {
        match self {
            SidebarNode::Category(c) => &c.label,
            SidebarNode::Doc(d) => &d.label,
            SidebarNode::Link(l) => &l.label,
        }
    }

    pub fn as_category(&self) -> Option<&SidebarCategory> {
        match self {
            SidebarNode::Category(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_doc(&self) -> Option<&SidebarDoc> {
        match self {
            SidebarNode::Doc(d) => Some(d),
            _ => None,
        }
    }
}

/// Navigation tree contributed by one configuration unit
#[derive(Debug, Default)]
pub struct SidebarSlice {
    pub items: Vec<SidebarNode>,
    /// Misconfigurations that were worked around
    pub diagnostics: Vec<DocsError>,
}

impl SidebarSlice {
    /// Top-level category with the given label
    pub fn category(&self, label: &str) -> Option<&SidebarCategory> {
        self.items
            .iter()
            .filter_map(SidebarNode::as_category)
            .find(|c| c.label == label)
    }

    /// Render as a CommonJS module exporting the tree
    pub fn to_module(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.items)?;
        Ok(format!("module.exports = {};\n", json))
    }
}

/// Builds the sidebar slice for one generation run
pub struct SidebarBuilder<'a> {
    docs: &'a NormalizedDocs,
    options: &'a SidebarOptions,
    base_path: String,
}

impl<'a> SidebarBuilder<'a> {
    pub fn new(docs: &'a NormalizedDocs, options: &'a SidebarOptions) -> Self {
        Self {
            docs,
            options,
            base_path: String::new(),
        }
    }

    /// Prefix doc ids with a docs-relative directory, e.g. `petstore`
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into().trim_matches('/').to_string();
        self
    }

    pub fn build(&self) -> SidebarSlice {
        let mut slice = SidebarSlice::default();
        slice.items.extend(self.intro_items());

        let apis: Vec<&ApiRecord> = self
            .docs
            .api_records()
            .filter(|api| {
                if api.id.is_empty() {
                    tracing::debug!(
                        method = %api.method,
                        path = %api.path,
                        "unnamed operation left out of sidebar"
                    );
                }
                !api.id.is_empty()
            })
            .collect();

        match self.options.group_paths_by {
            GroupPathsBy::Flat => slice.items.extend(self.flat_items(apis)),
            GroupPathsBy::Tag => {
                let (tags, unknown) = self.ordered_tags(&mut slice.diagnostics);
                slice
                    .items
                    .extend(tags.iter().filter_map(|tag| self.tag_category(tag, &apis)));
                slice.items.extend(self.unknown_categories(&unknown));
                slice.items.extend(self.untagged_category(&apis));
            }
            GroupPathsBy::TagGroup => {
                let (tags, unknown) = self.ordered_tags(&mut slice.diagnostics);
                slice.items.extend(self.tag_group_items(&tags, &apis));
                slice.items.extend(self.unknown_categories(&unknown));
                slice.items.extend(self.untagged_category(&apis));
            }
        }

        slice
    }

    fn intro_items(&self) -> Vec<SidebarNode> {
        let mut items = Vec::new();
        for info in self.docs.info_records().filter(|i| !i.id.is_empty()) {
            items.push(SidebarNode::Doc(SidebarDoc {
                id: self.doc_id(&info.id),
                label: info.title.clone(),
                class_name: None,
            }));

            if let Some(external) = &info.external_docs {
                items.push(SidebarNode::Link(SidebarLink {
                    label: external
                        .description
                        .clone()
                        .unwrap_or_else(|| "External documentation".to_string()),
                    href: external.url.clone(),
                }));
            }
        }
        items
    }

    fn flat_items(&self, mut apis: Vec<&ApiRecord>) -> Vec<SidebarNode> {
        if self.options.category_order == CategoryOrder::Mode(OrderMode::Alphabetical) {
            apis.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
        }
        apis.into_iter().map(|api| self.doc_node(api)).collect()
    }

    /// Tag names in category order
    ///
    /// Known tags missing from an explicit order follow it in tag-list order.
    /// Names that are not known tags are reported and returned separately,
    /// in list order.
    fn ordered_tags(&self, diagnostics: &mut Vec<DocsError>) -> (Vec<String>, Vec<String>) {
        let known = &self.docs.tags;
        match &self.options.category_order {
            CategoryOrder::Mode(OrderMode::Spec) => (known.clone(), Vec::new()),
            CategoryOrder::Mode(OrderMode::Alphabetical) => {
                let mut sorted = known.clone();
                sorted.sort_by_key(|name| name.to_lowercase());
                (sorted, Vec::new())
            }
            CategoryOrder::Explicit(order) => {
                let mut ordered: Vec<String> = Vec::with_capacity(known.len());
                let mut unknown: Vec<String> = Vec::new();
                for name in order {
                    if name == UNTAGGED_LABEL && !known.contains(name) {
                        continue;
                    }
                    if !known.contains(name) {
                        tracing::warn!(tag = %name, "categoryOrder references an unknown tag");
                        diagnostics.push(DocsError::Config(format!(
                            "categoryOrder references unknown tag \"{}\", \
                             appended as an empty category",
                            name
                        )));
                        if !unknown.contains(name) {
                            unknown.push(name.clone());
                        }
                    } else if !ordered.contains(name) {
                        ordered.push(name.clone());
                    }
                }
                for name in known {
                    if !ordered.contains(name) {
                        ordered.push(name.clone());
                    }
                }
                (ordered, unknown)
            }
        }
    }

    fn tag_group_items(&self, ordered_tags: &[String], apis: &[&ApiRecord]) -> Vec<SidebarNode> {
        let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for info in self.docs.info_records() {
            for group in &info.tag_groups {
                let members = groups.entry(group.name.as_str()).or_default();
                for tag in &group.tags {
                    if !members.contains(&tag.as_str()) {
                        members.push(tag.as_str());
                    }
                }
            }
        }

        let mut group_names: Vec<&str> = groups.keys().copied().collect();
        if self.options.category_order == CategoryOrder::Mode(OrderMode::Alphabetical) {
            group_names.sort_by_key(|name| name.to_lowercase());
        }

        let mut items = Vec::new();
        for name in group_names {
            let members = &groups[name];
            let tags: Vec<&str> = match self.options.category_order {
                CategoryOrder::Mode(OrderMode::Spec) => members.clone(),
                _ => ordered_tags
                    .iter()
                    .map(String::as_str)
                    .filter(|tag| members.contains(tag))
                    .collect(),
            };

            let children: Vec<SidebarNode> = tags
                .iter()
                .filter_map(|tag| self.tag_category(tag, apis))
                .collect();
            if !children.is_empty() {
                items.push(self.category(name, None, children));
            }
        }

        let grouped: Vec<&str> = groups.values().flatten().copied().collect();
        items.extend(
            ordered_tags
                .iter()
                .filter(|tag| !grouped.contains(&tag.as_str()))
                .filter_map(|tag| self.tag_category(tag, apis)),
        );
        items
    }

    /// Empty trailing categories for order names that match no tag
    fn unknown_categories(&self, names: &[String]) -> Vec<SidebarNode> {
        names
            .iter()
            .map(|name| self.category(name, self.category_link(name), Vec::new()))
            .collect()
    }

    /// A real tag named like the untagged bucket absorbs the untagged operations
    fn tag_category(&self, tag: &str, apis: &[&ApiRecord]) -> Option<SidebarNode> {
        let members: Vec<&ApiRecord> = apis
            .iter()
            .copied()
            .filter(|api| {
                api.tags.iter().any(|t| t == tag)
                    || (tag == UNTAGGED_LABEL && api.tags.is_empty())
            })
            .collect();
        if members.is_empty() {
            return None;
        }

        let items = self.member_items(&members);
        Some(self.category(tag, self.category_link(tag), items))
    }

    fn untagged_category(&self, apis: &[&ApiRecord]) -> Option<SidebarNode> {
        if self.docs.tags.iter().any(|t| t == UNTAGGED_LABEL) {
            return None;
        }

        let members: Vec<&ApiRecord> = apis
            .iter()
            .copied()
            .filter(|api| api.tags.is_empty())
            .collect();
        if members.is_empty() {
            return None;
        }

        let items = self.member_items(&members);
        Some(self.category(UNTAGGED_LABEL, None, items))
    }

    fn member_items(&self, members: &[&ApiRecord]) -> Vec<SidebarNode> {
        if self.options.nest_paths {
            self.nest_by_path(members, 0)
        } else {
            members.iter().map(|api| self.doc_node(api)).collect()
        }
    }

    /// Group operations by the path segment at `depth`, recursively
    ///
    /// A level where every operation shares one segment adds no category.
    /// A segment shared by a single operation yields a plain doc entry.
    fn nest_by_path(&self, records: &[&ApiRecord], depth: usize) -> Vec<SidebarNode> {
        enum Slot<'r> {
            Leaf(&'r ApiRecord),
            Group(&'r str),
        }

        let mut slots: Vec<Slot> = Vec::new();
        let mut groups: IndexMap<&str, Vec<&ApiRecord>> = IndexMap::new();

        for record in records.iter().copied() {
            match path_segments(&record.path).nth(depth) {
                Some(segment) => {
                    if !groups.contains_key(segment) {
                        slots.push(Slot::Group(segment));
                    }
                    groups.entry(segment).or_default().push(record);
                }
                None => slots.push(Slot::Leaf(record)),
            }
        }

        if let [Slot::Group(only)] = slots.as_slice() {
            if groups[*only].len() > 1 {
                return self.nest_by_path(&groups[*only], depth + 1);
            }
        }

        slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Leaf(record) => self.doc_node(record),
                Slot::Group(segment) => match groups[segment].as_slice() {
                    [single] => self.doc_node(single),
                    members => {
                        let items = self.nest_by_path(members, depth + 1);
                        self.category(segment, None, items)
                    }
                },
            })
            .collect()
    }

    fn category_link(&self, tag: &str) -> Option<CategoryLink> {
        let source = self.options.category_link_source?;
        let mut records = self.docs.tag_records().filter(|r| r.name == tag);

        let id = match source {
            CategoryLinkSource::Tag => records.find(|r| r.declared).map(|r| r.id.as_str()),
            CategoryLinkSource::Info => records.next().map(|r| r.info_id.as_str()),
        }?;

        if id.is_empty() {
            return None;
        }
        Some(CategoryLink::Doc {
            id: self.doc_id(id),
        })
    }

    fn category(
        &self,
        label: &str,
        link: Option<CategoryLink>,
        items: Vec<SidebarNode>,
    ) -> SidebarNode {
        SidebarNode::Category(SidebarCategory {
            label: label.to_string(),
            link,
            collapsible: self.options.sidebar_collapsible,
            collapsed: self.options.sidebar_collapsed,
            custom_props: self.options.custom_props.clone(),
            items,
        })
    }

    fn doc_node(&self, api: &ApiRecord) -> SidebarNode {
        let mut class_name = format!("api-method {}", api.method);
        if api.deprecated {
            class_name.push_str(" menu__list-item--deprecated");
        }

        SidebarNode::Doc(SidebarDoc {
            id: self.doc_id(&api.id),
            label: api.title.clone(),
            class_name: Some(class_name),
        })
    }

    fn doc_id(&self, id: &str) -> String {
        if self.base_path.is_empty() {
            id.to_string()
        } else {
            format!("{}/{}", self.base_path, id)
        }
    }
}

/// Docs-relative directory of an output directory
///
/// Everything after the last `docs` component, joined with `/`;
/// empty when the path has no `docs` component.
pub fn doc_base_path(output_dir: &Path) -> String {
    let parts: Vec<String> = output_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    match parts.iter().rposition(|p| p == "docs") {
        Some(index) => parts[index + 1..].join("/"),
        None => String::new(),
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openapi_docs_gen_common::OpenApiDocument;
    use openapi_docs_gen_parser::normalize;

    fn docs(json: &str) -> NormalizedDocs {
        let doc: OpenApiDocument = serde_json::from_str(json).unwrap();
        normalize(&[doc])
    }

    fn petstore() -> NormalizedDocs {
        docs(r#"{
            "openapi": "3.0.0",
            "info": {"title": "Petstore", "version": "1"},
            "tags": [{"name": "pets", "description": "Pets"}],
            "paths": {
                "/pets": {
                    "get": {"summary": "List Pets", "tags": ["pets"]},
                    "post": {"summary": "Add Pet", "tags": ["pets", "store"]}
                },
                "/pets/{id}": {
                    "get": {"summary": "Get Pet", "tags": ["pets"], "deprecated": true}
                },
                "/health": {"get": {"summary": "Health"}},
                "/store/order": {"post": {"summary": "Place Order", "tags": ["store"]}}
            }
        }"#)
    }

    fn labels(items: &[SidebarNode]) -> Vec<&str> {
        items.iter().map(SidebarNode::label).collect()
    }

    #[test]
    fn test_tag_grouped_default() {
        let docs = petstore();
        let options = SidebarOptions::default();
        let slice = SidebarBuilder::new(&docs, &options).build();

        assert_eq!(labels(&slice.items), vec!["Petstore", "pets", "store", "Untagged"]);
        assert!(slice.diagnostics.is_empty());

        let pets = slice.category("pets").unwrap();
        assert_eq!(labels(&pets.items), vec!["List Pets", "Add Pet", "Get Pet"]);
        assert!(pets.link.is_none());
        assert!(pets.collapsible && pets.collapsed);
    }

    #[test]
    fn test_multi_tag_fan_out() {
        let docs = petstore();
        let options = SidebarOptions::default();
        let slice = SidebarBuilder::new(&docs, &options).build();

        let contains = |label: &str| {
            slice
                .category(label)
                .unwrap()
                .items
                .iter()
                .any(|n| n.label() == "Add Pet")
        };
        let (in_pets, in_store) = (contains("pets"), contains("store"));
        assert!(in_pets && in_store);
    }

    #[test]
    fn test_doc_class_names() {
        let docs = petstore();
        let options = SidebarOptions::default();
        let slice = SidebarBuilder::new(&docs, &options)
            .with_base_path("petstore")
            .build();

        let pets = slice.category("pets").unwrap();
        let get_pet = pets.items[2].as_doc().unwrap();
        assert_eq!(get_pet.id, "petstore/get-pet");
        assert_eq!(
            get_pet.class_name.as_deref(),
            Some("api-method get menu__list-item--deprecated")
        );
    }

    #[test]
    fn test_explicit_order_with_unknown_tag() {
        let docs = petstore();
        let options = SidebarOptions {
            category_order: CategoryOrder::Explicit(vec![
                "store".to_string(),
                "billing".to_string(),
            ]),
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &options).build();

        assert_eq!(
            labels(&slice.items),
            vec!["Petstore", "store", "pets", "billing", "Untagged"]
        );
        assert!(slice.category("billing").unwrap().items.is_empty());
        assert_eq!(slice.diagnostics.len(), 1);
        assert!(matches!(slice.diagnostics[0], DocsError::Config(_)));
        assert!(slice.diagnostics[0].to_string().contains("billing"));
    }

    #[test]
    fn test_alphabetical_order() {
        let docs = docs(r#"{
            "openapi": "3.0.0",
            "info": {"title": "API", "version": "1"},
            "paths": {
                "/z": {"get": {"summary": "Z", "tags": ["zebra"]}},
                "/a": {"get": {"summary": "A", "tags": ["Aardvark"]}}
            }
        }"#);
        let options = SidebarOptions {
            category_order: CategoryOrder::Mode(OrderMode::Alphabetical),
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &options).build();
        assert_eq!(labels(&slice.items), vec!["API", "Aardvark", "zebra"]);
    }

    #[test]
    fn test_category_links() {
        let docs = petstore();

        let tag_options = SidebarOptions {
            category_link_source: Some(CategoryLinkSource::Tag),
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &tag_options).build();
        assert_eq!(
            slice.category("pets").unwrap().link,
            Some(CategoryLink::Doc { id: "pets".to_string() })
        );
        // store is only referenced, never declared
        assert!(slice.category("store").unwrap().link.is_none());
        assert!(slice.category(UNTAGGED_LABEL).unwrap().link.is_none());

        let info_options = SidebarOptions {
            category_link_source: Some(CategoryLinkSource::Info),
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &info_options).build();
        assert_eq!(
            slice.category("store").unwrap().link,
            Some(CategoryLink::Doc { id: "petstore".to_string() })
        );
    }

    #[test]
    fn test_flat_mode() {
        let docs = petstore();
        let options = SidebarOptions {
            group_paths_by: GroupPathsBy::Flat,
            category_order: CategoryOrder::Mode(OrderMode::Alphabetical),
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &options).build();
        assert_eq!(
            labels(&slice.items),
            vec!["Petstore", "Health", "List Pets", "Get Pet", "Add Pet", "Place Order"]
        );
    }

    #[test]
    fn test_nest_paths() {
        let docs = docs(r#"{
            "openapi": "3.0.0",
            "info": {"title": "API", "version": "1"},
            "paths": {
                "/v1/pets": {
                    "get": {"summary": "List", "tags": ["pets"]},
                    "post": {"summary": "Create", "tags": ["pets"]}
                },
                "/v1/pets/{id}": {"get": {"summary": "Fetch", "tags": ["pets"]}},
                "/v1/pets/{id}/photos": {
                    "get": {"summary": "Photos", "tags": ["pets"]},
                    "put": {"summary": "Upload", "tags": ["pets"]}
                },
                "/v1/owners": {"get": {"summary": "Owners", "tags": ["pets"]}}
            }
        }"#);
        let options = SidebarOptions {
            nest_paths: true,
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &options).build();

        // "v1" is shared by everything and adds no level
        let pets = slice.category("pets").unwrap();
        assert_eq!(labels(&pets.items), vec!["pets", "Owners"]);

        let nested = pets.items[0].as_category().unwrap();
        assert_eq!(labels(&nested.items), vec!["List", "Create", "{id}"]);

        let by_id = nested.items[2].as_category().unwrap();
        assert_eq!(labels(&by_id.items), vec!["Fetch", "photos"]);

        let photos = by_id.items[1].as_category().unwrap();
        assert_eq!(labels(&photos.items), vec!["Photos", "Upload"]);
    }

    #[test]
    fn test_tag_groups() {
        let docs = docs(r#"{
            "openapi": "3.0.0",
            "info": {"title": "API", "version": "1"},
            "x-tagGroups": [{"name": "Animals", "tags": ["pets", "vets"]}],
            "paths": {
                "/pets": {"get": {"summary": "Pets", "tags": ["pets"]}},
                "/orders": {"get": {"summary": "Orders", "tags": ["store"]}},
                "/ping": {"get": {"summary": "Ping"}}
            }
        }"#);
        let options = SidebarOptions {
            group_paths_by: GroupPathsBy::TagGroup,
            ..SidebarOptions::default()
        };
        let slice = SidebarBuilder::new(&docs, &options).build();

        assert_eq!(labels(&slice.items), vec!["API", "Animals", "store", "Untagged"]);
        let animals = slice.category("Animals").unwrap();
        assert_eq!(labels(&animals.items), vec!["pets"]);
    }

    #[test]
    fn test_external_docs_link_and_module() {
        let docs = docs(r#"{
            "openapi": "3.0.0",
            "info": {"title": "API", "version": "1"},
            "externalDocs": {"url": "https://example.com/guide", "description": "Guide"},
            "paths": {}
        }"#);
        let options = SidebarOptions::default();
        let slice = SidebarBuilder::new(&docs, &options).build();

        assert_eq!(
            slice.items[1],
            SidebarNode::Link(SidebarLink {
                label: "Guide".to_string(),
                href: "https://example.com/guide".to_string(),
            })
        );

        let module = slice.to_module().unwrap();
        assert!(module.starts_with("module.exports = ["));
        assert!(module.contains("\"type\": \"link\""));
        assert!(module.trim_end().ends_with("];"));
    }

    #[test]
    fn test_unnamed_operations_skipped() {
        let docs = docs(r#"{
            "openapi": "3.0.0",
            "info": {"title": "API", "version": "1"},
            "paths": {"/a": {"get": {}}, "/b": {"get": {"summary": "B"}}}
        }"#);
        let options = SidebarOptions::default();
        let slice = SidebarBuilder::new(&docs, &options).build();

        let untagged = slice.category(UNTAGGED_LABEL).unwrap();
        assert_eq!(labels(&untagged.items), vec!["B"]);
    }

    #[test]
    fn test_doc_base_path() {
        assert_eq!(doc_base_path(Path::new("docs/petstore")), "petstore");
        assert_eq!(doc_base_path(Path::new("/site/docs/api/v1")), "api/v1");
        assert_eq!(doc_base_path(Path::new("out/api")), "");
    }

    #[test]
    fn test_doc_base_path_uses_last_docs_component() {
        assert_eq!(
            doc_base_path(Path::new("/home/u/docs/mysite/docs/petstore")),
            "petstore"
        );
        assert_eq!(doc_base_path(Path::new("docs/site/docs/api/v1")), "api/v1");
    }

    #[test]
    fn test_real_untagged_tag_merges_with_bucket() {
        let docs = docs(
            r#"{
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "version": "1.0.0"},
                "tags": [{"name": "pets"}, {"name": "Untagged"}],
                "paths": {
                    "/pets": {"get": {"summary": "List Pets", "tags": ["pets"]}},
                    "/legacy": {"get": {"summary": "Legacy", "tags": ["Untagged"]}},
                    "/health": {"get": {"summary": "Health"}}
                }
            }"#,
        );
        let options = SidebarOptions::default();
        let slice = SidebarBuilder::new(&docs, &options).build();

        let untagged: Vec<&SidebarNode> = slice
            .items
            .iter()
            .filter(|node| node.label() == UNTAGGED_LABEL)
            .collect();
        assert_eq!(untagged.len(), 1);

        let ids: Vec<&str> = untagged[0]
            .as_category()
            .unwrap()
            .items
            .iter()
            .filter_map(SidebarNode::as_doc)
            .map(|doc| doc.id.as_str())
            .collect();
        assert_eq!(ids, vec!["legacy", "health"]);
    }
}
