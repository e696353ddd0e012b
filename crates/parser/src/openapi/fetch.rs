//! Remote spec retrieval

use openapi_docs_gen_common::{DocsError, Result};
use std::time::Duration;

/// Fetches the text of a remote spec document
#[cfg_attr(test, mockall::automock)]
pub trait SpecFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher
///
/// No timeout is applied unless one is configured with [`HttpFetcher::with_timeout`];
/// a hung server blocks the calling unit.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("openapi-docs-gen/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| DocsError::load("http client", e))?;

        Ok(Self { client })
    }
}

impl SpecFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching remote spec");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DocsError::load(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocsError::load(url, format!("HTTP status {}", status)));
        }

        response.text().map_err(|e| DocsError::load(url, e))
    }
}
