use async_graphql::{Context, Enum, InputObject, Object, Result, SimpleObject, Union};
use resolution::{ContentUnion, FieldTree, ResolutionEngine, ResolutionRequest};

/// One content object, discriminated by the upstream.
#[derive(Debug, Union)]
pub enum Uuid {
    Article(Article),
    ArticleRevision(ArticleRevision),
    Page(Page),
    UnknownUuid(UnknownUuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(rename_items = "lowercase")]
pub enum Instance {
    De,
    En,
}

#[derive(Debug, SimpleObject)]
pub struct Article {
    pub id: i64,
    pub instance: Instance,
    /// Only the `id` is populated when nothing deeper was requested.
    pub license: Option<License>,
    /// Only the `id` is populated when nothing deeper was requested.
    pub current_revision: Option<ArticleRevision>,
}

#[derive(Debug, SimpleObject)]
pub struct ArticleRevision {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub changes: Option<String>,
}

#[derive(Debug, SimpleObject)]
pub struct Page {
    pub id: i64,
}

#[derive(Debug, SimpleObject)]
pub struct UnknownUuid {
    pub id: i64,
    pub discriminator: Option<String>,
}

#[derive(Debug, SimpleObject)]
pub struct License {
    pub id: i64,
    pub instance: Option<Instance>,
    pub default: Option<bool>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub agreement: Option<String>,
    pub icon_href: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct AliasInput {
    pub instance: Instance,
    pub path: String,
}

#[derive(Default)]
pub struct ContentQuery;

#[Object]
impl ContentQuery {
    /// Resolves an id or a url alias into the content object behind it.
    async fn uuid(
        &self,
        ctx: &Context<'_>,
        alias: Option<AliasInput>,
        id: Option<i64>,
    ) -> Result<Option<Uuid>> {
        let engine = ctx.data_unchecked::<ResolutionEngine>();
        let requested = requested_fields(ctx);
        let request = ResolutionRequest {
            id,
            alias: alias.map(|alias| resolution::Alias {
                instance: alias.instance.into(),
                path: alias.path,
            }),
        };
        let resolved = engine.resolve(&request, &requested).await?;
        Ok(Some(resolved.into()))
    }

    async fn license(&self, ctx: &Context<'_>, id: i64) -> Result<Option<License>> {
        let engine = ctx.data_unchecked::<ResolutionEngine>();
        let license = engine.resolve_license(id).await?;
        Ok(Some(license.into()))
    }
}

/// Reifies this field's selection set, with fragments expanded, so the
/// resolution engine can stay independent of the GraphQL library.
fn requested_fields(ctx: &Context<'_>) -> FieldTree {
    FieldTree::from_selection_set(&ctx.item.node.selection_set.node, &ctx.query_env.fragments)
}

impl From<content_source::Instance> for Instance {
    fn from(instance: content_source::Instance) -> Self {
        match instance {
            content_source::Instance::De => Instance::De,
            content_source::Instance::En => Instance::En,
        }
    }
}

impl From<Instance> for content_source::Instance {
    fn from(instance: Instance) -> Self {
        match instance {
            Instance::De => content_source::Instance::De,
            Instance::En => content_source::Instance::En,
        }
    }
}

impl From<ContentUnion> for Uuid {
    fn from(resolved: ContentUnion) -> Self {
        match resolved {
            ContentUnion::Article(article) => Uuid::Article(article.into()),
            ContentUnion::ArticleRevision(revision) => Uuid::ArticleRevision(revision.into()),
            ContentUnion::Page(page) => Uuid::Page(Page { id: page.id }),
            ContentUnion::Unknown(unknown) => Uuid::UnknownUuid(UnknownUuid {
                id: unknown.id,
                discriminator: unknown.discriminator,
            }),
        }
    }
}

impl From<resolution::Article> for Article {
    fn from(article: resolution::Article) -> Self {
        Article {
            id: article.id,
            instance: article.instance.into(),
            license: article.license.map(Into::into),
            current_revision: article.current_revision.map(Into::into),
        }
    }
}

impl From<resolution::ArticleRevision> for ArticleRevision {
    fn from(revision: resolution::ArticleRevision) -> Self {
        ArticleRevision {
            id: revision.id,
            title: Some(revision.title),
            content: Some(revision.content),
            changes: Some(revision.changes),
        }
    }
}

impl From<resolution::RevisionField> for ArticleRevision {
    fn from(field: resolution::RevisionField) -> Self {
        match field {
            resolution::RevisionField::Ref(stub) => ArticleRevision {
                id: stub.id,
                title: None,
                content: None,
                changes: None,
            },
            resolution::RevisionField::Full(revision) => revision.into(),
        }
    }
}

impl From<resolution::License> for License {
    fn from(license: resolution::License) -> Self {
        License {
            id: license.id,
            instance: Some(license.instance.into()),
            default: Some(license.default),
            title: Some(license.title),
            url: Some(license.url),
            content: Some(license.content),
            agreement: Some(license.agreement),
            icon_href: Some(license.icon_href),
        }
    }
}

impl From<resolution::LicenseField> for License {
    fn from(field: resolution::LicenseField) -> Self {
        match field {
            resolution::LicenseField::Ref(stub) => License {
                id: stub.id,
                instance: None,
                default: None,
                title: None,
                url: None,
                content: None,
                agreement: None,
                icon_href: None,
            },
            resolution::LicenseField::Full(license) => license.into(),
        }
    }
}
