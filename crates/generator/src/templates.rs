//! Template loading and management

use openapi_docs_gen_common::{DocsError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::{Tera, Value};

pub const API_TEMPLATE: &str = "api.mdx";
pub const INFO_TEMPLATE: &str = "info.mdx";
pub const TAG_TEMPLATE: &str = "tag.mdx";

/// Load the built-in page templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    // Register custom filters
    tera.register_filter("frontmatter_escape", frontmatter_escape_filter);
    tera.register_filter("mdx_escape", mdx_escape_filter);

    tera.add_raw_template(API_TEMPLATE, include_str!("../templates/api.mdx.tera"))
        .map_err(|e| DocsError::Template(format!("Failed to load api.mdx template: {}", e)))?;

    tera.add_raw_template(INFO_TEMPLATE, include_str!("../templates/info.mdx.tera"))
        .map_err(|e| DocsError::Template(format!("Failed to load info.mdx template: {}", e)))?;

    tera.add_raw_template(TAG_TEMPLATE, include_str!("../templates/tag.mdx.tera"))
        .map_err(|e| DocsError::Template(format!("Failed to load tag.mdx template: {}", e)))?;

    Ok(tera)
}

/// Replace the api page template with the contents of a user file
pub fn override_api_template(tera: &mut Tera, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| {
        DocsError::Template(format!(
            "Failed to read template {}: {}",
            path.display(),
            e
        ))
    })?;

    tera.add_raw_template(API_TEMPLATE, &content).map_err(|e| {
        DocsError::Template(format!(
            "Failed to parse template {}: {}",
            path.display(),
            e
        ))
    })
}

/// Filter to make a string safe inside a double-quoted YAML scalar
fn frontmatter_escape_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("frontmatter_escape filter expects a string"))?;

    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Value::String(escaped))
}

/// Filter to escape characters MDX would parse as JSX or expressions
fn mdx_escape_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = match value {
        Value::Null => return Ok(Value::String(String::new())),
        Value::String(s) => s,
        _ => return Err(tera::Error::msg("mdx_escape filter expects a string")),
    };

    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            '<' => escaped.push_str("&lt;"),
            _ => escaped.push(ch),
        }
    }

    Ok(Value::String(escaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(
        filter: fn(&Value, &HashMap<String, Value>) -> tera::Result<Value>,
        input: &str,
    ) -> String {
        filter(&Value::String(input.to_string()), &HashMap::new())
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_frontmatter_escape() {
        assert_eq!(
            apply(frontmatter_escape_filter, "Say \"hi\"\nto C:\\pets"),
            "Say \\\"hi\\\" to C:\\\\pets"
        );
    }

    #[test]
    fn test_mdx_escape() {
        assert_eq!(
            apply(mdx_escape_filter, "Returns <Pet> for {id}"),
            "Returns &lt;Pet> for \\{id\\}"
        );
    }

    #[test]
    fn test_builtin_templates_load() {
        let tera = load_templates().unwrap();
        let names: Vec<&str> = tera.get_template_names().collect();
        assert!(names.contains(&API_TEMPLATE));
        assert!(names.contains(&INFO_TEMPLATE));
        assert!(names.contains(&TAG_TEMPLATE));
    }

    #[test]
    fn test_invalid_override_is_template_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("api.mdx.tera");
        fs::write(&path, "{% if %}").unwrap();

        let mut tera = load_templates().unwrap();
        let err = override_api_template(&mut tera, &path).unwrap_err();
        assert!(matches!(err, DocsError::Template(_)));
    }
}
