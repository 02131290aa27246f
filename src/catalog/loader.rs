//! Catalog loader — one attempt against one configured source.
//!
//! DESIGN
//! ======
//! A source is either a local JSON file or a remote endpoint. Both may answer
//! with a bare array of records or a `{ "tools": [...] }` envelope. Callers
//! that only need "some catalog" use [`CatalogLoader::load_or_empty`], which
//! logs the failure and substitutes an empty catalog.
//!
//! ERROR HANDLING
//! ==============
//! No retries. Remote fetches carry explicit request and connect timeouts so
//! a hung upstream surfaces as `LoadError::Request` instead of stalling the
//! first render.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::Catalog;
use crate::config::FetchTimeouts;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("source returned status {status}")]
    Status { status: u16 },
    #[error("catalog parse failed: {0}")]
    Parse(String),
    #[error("catalog source returned no tools")]
    Empty,
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Remote(String),
}

impl CatalogSource {
    /// Short label for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Remote(url) => url.clone(),
        }
    }
}

/// Accepted document shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Envelope { tools: Vec<Value> },
    Bare(Vec<Value>),
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a catalog document in either accepted shape.
///
/// # Errors
///
/// Returns `LoadError::Parse` for malformed JSON or an unexpected top-level
/// shape, and `LoadError::Empty` when no usable record remains.
pub fn parse_document(text: &str) -> Result<Catalog, LoadError> {
    let document: Document = serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    let values = match document {
        Document::Envelope { tools } | Document::Bare(tools) => tools,
    };
    let catalog = Catalog::from_values(&values);
    if catalog.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(catalog)
}

// =============================================================================
// LOADER
// =============================================================================

pub struct CatalogLoader {
    source: CatalogSource,
    http: reqwest::Client,
}

impl CatalogLoader {
    /// Build a loader for `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(source: CatalogSource, timeouts: FetchTimeouts) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LoadError::HttpClientBuild(e.to_string()))?;
        Ok(Self { source, http })
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Load the catalog once.
    ///
    /// # Errors
    ///
    /// Returns the first failure: I/O, transport, non-OK status, parse, or an
    /// empty result.
    pub async fn load(&self) -> Result<Catalog, LoadError> {
        let text = match &self.source {
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::Io { path: path.clone(), message: e.to_string() })?,
            CatalogSource::Remote(url) => self.fetch_remote(url).await?,
        };
        parse_document(&text)
    }

    /// Load the catalog, substituting an empty one on any failure.
    pub async fn load_or_empty(&self) -> Catalog {
        match self.load().await {
            Ok(catalog) => {
                info!(source = %self.source.describe(), tools = catalog.len(), "catalog loaded");
                catalog
            }
            Err(e) => {
                warn!(source = %self.source.describe(), error = %e, "catalog unavailable");
                Catalog::default()
            }
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { status: status.as_u16() });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
