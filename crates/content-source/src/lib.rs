//! Typed client for the upstream content API.
//!
//! The upstream exposes three operations: resolve a content object by id,
//! resolve it by url alias, and resolve a license. Each call is a single
//! fire-once POST; retries are the caller's concern.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

mod http;
mod raw;

pub use http::HttpContentSource;
pub use raw::RawContent;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Network failure or a non-2xx upstream response.
    #[error("upstream request failed: {0}")]
    Unavailable(String),
    /// The upstream answered, but not with the shape it promised.
    #[error("unexpected upstream payload: {0}")]
    Malformed(String),
}

pub type SourceResult<T> = Result<T, UpstreamError>;

/// Language instance of the content, `de` or `en` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instance {
    De,
    En,
}

impl Instance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Instance::De => "de",
            Instance::En => "en",
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown instance `{0}`")]
pub struct UnknownInstance(String);

impl FromStr for Instance {
    type Err = UnknownInstance;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "de" => Ok(Instance::De),
            "en" => Ok(Instance::En),
            other => Err(UnknownInstance(other.to_owned())),
        }
    }
}

#[async_trait::async_trait]
pub trait ContentSourceInner: Send + Sync {
    async fn resolve_by_id(&self, id: i64) -> SourceResult<RawContent>;

    async fn resolve_by_alias(&self, instance: Instance, path: &str) -> SourceResult<RawContent>;

    async fn resolve_license(&self, id: i64) -> SourceResult<RawContent>;
}

/// Cheaply clonable handle to a content source implementation.
#[derive(Clone)]
pub struct ContentSource {
    inner: Arc<dyn ContentSourceInner>,
}

impl ContentSource {
    pub fn new(inner: impl ContentSourceInner + 'static) -> ContentSource {
        ContentSource {
            inner: Arc::new(inner),
        }
    }

    pub async fn resolve_by_id(&self, id: i64) -> SourceResult<RawContent> {
        self.inner.resolve_by_id(id).await
    }

    pub async fn resolve_by_alias(&self, instance: Instance, path: &str) -> SourceResult<RawContent> {
        self.inner.resolve_by_alias(instance, path).await
    }

    pub async fn resolve_license(&self, id: i64) -> SourceResult<RawContent> {
        self.inner.resolve_license(id).await
    }
}
