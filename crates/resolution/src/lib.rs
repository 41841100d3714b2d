//! Uuid/alias resolution: the field-selection-aware resolver behind the
//! gateway's `uuid` and `license` queries.
//!
//! The engine fetches a root object from the upstream content API,
//! discriminates its kind into a closed union, and descends into nested
//! resources (current revision, license) only as deep as the caller's
//! selection set asks for. Selections are reified once per query as a
//! [`FieldTree`], keeping the engine independent of any GraphQL library's
//! AST.

use content_source::UpstreamError;

mod content;
mod engine;
mod field_tree;
pub mod mapper;
mod request;

pub use content::{
    Article, ArticleRevision, ContentUnion, License, LicenseField, LicenseRef, Page, RevisionField,
    RevisionRef, UnknownUuid,
};
pub use engine::ResolutionEngine;
pub use field_tree::FieldTree;
pub use request::{Alias, ResolutionRequest};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The caller must set exactly one of `id` and `alias`.
    #[error("exactly one of `id` and `alias` must be provided")]
    InvalidRequest,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
