//! OpenAPI 3.x loading and normalization
//!
//! ## Spec Sources
//! - **File**: a single `.json`, `.yaml` or `.yml` document
//! - **Directory**: every spec file below it; files sharing an `info.title`
//!   are merged into one logical API
//! - **URL**: any `http://` or `https://` location
//!
//! ## Usage
//! ```rust,ignore
//! use openapi_docs_gen_parser::openapi::{normalize, SpecLoader};
//!
//! let mut loader = SpecLoader::new()?;
//! let documents = loader.load("specs/petstore.yaml")?;
//! let docs = normalize(&documents);
//! ```

mod fetch;
mod loader;
mod merge;
mod normalizer;

pub use fetch::{HttpFetcher, SpecFetcher};
pub use loader::{
    load_file, parse_document, LoadOptions, SpecFormat, SpecLoader, SPEC_EXTENSIONS,
};
pub use merge::{group_and_merge, merge_documents};
pub use normalizer::normalize;
