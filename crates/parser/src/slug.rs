//! Record identifiers
//!
//! Ids are lowercase slugs of a record's human-readable name. Collisions
//! within one generation run get a numeric suffix in emission order.

use openapi_docs_gen_common::{DocsError, NormalizedRecord, Result};
use std::collections::{HashMap, HashSet};

/// Convert text into a URL- and filename-safe slug
///
/// Runs of non-alphanumeric characters collapse to a single hyphen;
/// leading and trailing hyphens are dropped.
///
/// # Examples
/// ```
/// use openapi_docs_gen_parser::slugify;
///
/// assert_eq!(slugify("Get Pet"), "get-pet");
/// assert_eq!(slugify("  Find pets -- by  status! "), "find-pets-by-status");
/// assert_eq!(slugify("???"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Assigns unique ids within one generation run
#[derive(Debug, Default)]
pub struct IdResolver {
    taken: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl IdResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and make it unique
    ///
    /// An empty slug is returned as-is and never reserved; it is reported
    /// when the record is emitted.
    pub fn resolve(&mut self, text: &str) -> String {
        let base = slugify(text);
        if base.is_empty() {
            return base;
        }

        if self.taken.insert(base.clone()) {
            return base;
        }

        let counter = self.next_suffix.entry(base.clone()).or_insert(2);
        loop {
            let candidate = format!("{}-{}", base, counter);
            *counter += 1;
            if self.taken.insert(candidate.clone()) {
                tracing::debug!(%base, id = %candidate, "id collision resolved");
                return candidate;
            }
        }
    }
}

/// Id of a record that is about to be emitted
///
/// Fails with [`DocsError::InvalidId`] when the record resolved to an empty slug.
pub fn checked_id(record: &NormalizedRecord) -> Result<&str> {
    let id = record.id();
    if id.is_empty() {
        return Err(DocsError::InvalidId {
            kind: record.kind(),
            label: record.label(),
        });
    }
    Ok(id)
}
