use content_source::{ContentSource, RawContent};

use crate::content::{
    Article, ArticleRevision, ContentUnion, License, LicenseField, LicenseRef, Page, RevisionField,
    RevisionRef,
};
use crate::field_tree::FieldTree;
use crate::request::{ResolutionRequest, Target};
use crate::{mapper, ResolveError};

/// The uuid resolution state machine.
///
/// Fetches the root object, discriminates its kind, and conditionally
/// descends into the article's license and current revision. The two nested
/// fetches hit disjoint upstream endpoints and are awaited concurrently.
/// Any upstream failure, root or nested, fails the whole resolution.
#[derive(Clone)]
pub struct ResolutionEngine {
    source: ContentSource,
}

impl ResolutionEngine {
    pub fn new(source: ContentSource) -> ResolutionEngine {
        ResolutionEngine { source }
    }

    pub async fn resolve(
        &self,
        request: &ResolutionRequest,
        requested: &FieldTree,
    ) -> Result<ContentUnion, ResolveError> {
        let raw = match request.target()? {
            Target::Id(id) => self.source.resolve_by_id(id).await?,
            Target::Alias(alias) => self.source.resolve_by_alias(alias.instance, &alias.path).await?,
        };
        tracing::debug!(
            discriminator = raw.str_field("discriminator"),
            "discriminating root object"
        );

        match (raw.str_field("discriminator"), raw.str_field("type")) {
            (Some("page"), _) => Ok(ContentUnion::Page(Page {
                id: raw.require_i64("id")?,
            })),
            (Some("entity"), Some("article")) => self.resolve_article(&raw, requested).await,
            (Some("entityRevision"), Some("article")) => Ok(ContentUnion::ArticleRevision(
                mapper::to_article_revision(&raw)?,
            )),
            _ => Ok(ContentUnion::Unknown(mapper::to_unknown(&raw)?)),
        }
    }

    pub async fn resolve_license(&self, id: i64) -> Result<License, ResolveError> {
        let raw = self.source.resolve_license(id).await?;
        Ok(mapper::to_license(&raw)?)
    }

    async fn resolve_article(
        &self,
        raw: &RawContent,
        requested: &FieldTree,
    ) -> Result<ContentUnion, ResolveError> {
        let id = raw.require_i64("id")?;
        let instance = mapper::parse_instance(raw)?;

        let (current_revision, license) = futures_util::try_join!(
            self.revision_field(raw, requested),
            self.license_field(raw, requested)
        )?;

        Ok(ContentUnion::Article(Article {
            id,
            instance,
            license,
            current_revision,
        }))
    }

    async fn revision_field(
        &self,
        raw: &RawContent,
        requested: &FieldTree,
    ) -> Result<Option<RevisionField>, ResolveError> {
        let Some(subtree) = requested.child("currentRevision") else {
            return Ok(None);
        };
        let revision_id = raw.require_i64("currentRevisionId")?;
        if subtree.deeper_than_id() {
            Ok(Some(RevisionField::Full(self.resolve_revision(revision_id).await?)))
        } else {
            Ok(Some(RevisionField::Ref(RevisionRef { id: revision_id })))
        }
    }

    async fn license_field(
        &self,
        raw: &RawContent,
        requested: &FieldTree,
    ) -> Result<Option<LicenseField>, ResolveError> {
        let Some(subtree) = requested.child("license") else {
            return Ok(None);
        };
        let license_id = raw.require_i64("licenseId")?;
        if subtree.deeper_than_id() {
            Ok(Some(LicenseField::Full(self.resolve_license(license_id).await?)))
        } else {
            Ok(Some(LicenseField::Ref(LicenseRef { id: license_id })))
        }
    }

    /// Revisions come back from the uuid endpoint in the entityRevision
    /// shape, so they map straight into [`ArticleRevision`] instead of going
    /// through the full union again.
    async fn resolve_revision(&self, id: i64) -> Result<ArticleRevision, ResolveError> {
        let raw = self.source.resolve_by_id(id).await?;
        Ok(mapper::to_article_revision(&raw)?)
    }
}
