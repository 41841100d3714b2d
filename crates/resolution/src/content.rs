use content_source::Instance;

/// One resolved content object. The variant is fully determined by the
/// upstream discriminator and type fields; anything unmodeled degrades to
/// [`UnknownUuid`] instead of failing the resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentUnion {
    Article(Article),
    ArticleRevision(ArticleRevision),
    Page(Page),
    Unknown(UnknownUuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: i64,
    pub instance: Instance,
    /// Absent when the caller did not select the field at all.
    pub license: Option<LicenseField>,
    /// Absent when the caller did not select the field at all.
    pub current_revision: Option<RevisionField>,
}

/// A license as seen by the caller: either the shallow stub carrying only the
/// id from the article payload, or the full record fetched from the license
/// endpoint. The stub is a first-class value, not a missing one.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseField {
    Ref(LicenseRef),
    Full(License),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevisionField {
    Ref(RevisionRef),
    Full(ArticleRevision),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseRef {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub id: i64,
    pub instance: Instance,
    pub default: bool,
    pub title: String,
    pub url: String,
    pub content: String,
    pub agreement: String,
    pub icon_href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRevision {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub changes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub id: i64,
}

/// Catch-all for discriminators the gateway does not model. Carries whatever
/// discriminator value the upstream sent, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUuid {
    pub id: i64,
    pub discriminator: Option<String>,
}
