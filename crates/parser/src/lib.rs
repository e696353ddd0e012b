//! OpenAPI parsing for documentation generation
//!
//! This crate turns spec locations into normalized page records:
//!
//! 1. [`SpecLoader`] reads a file, a directory or a URL and merges files
//!    that describe the same API
//! 2. [`normalize`] flattens the merged documents into info, api and tag
//!    records
//! 3. [`IdResolver`] gives every record a unique slug along the way

pub mod openapi;
mod slug;

pub use openapi::{normalize, LoadOptions, SpecFetcher, SpecLoader};
pub use slug::{checked_id, slugify, IdResolver};

use openapi_docs_gen_common::{NormalizedDocs, Result};

/// Load the spec at `location` and normalize it
///
/// # Arguments
/// * `loader` - Loader to read with; its cache is reused across calls
/// * `location` - File path, directory, or http(s) URL
pub fn load_and_normalize(loader: &mut SpecLoader, location: &str) -> Result<NormalizedDocs> {
    let documents = loader.load(location)?;
    Ok(normalize(&documents))
}
