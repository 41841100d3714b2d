//! Translation of raw upstream records into typed union variants.
//!
//! These are pure field renames for an already-determined discriminator;
//! a missing field on a recognized type is a malformed payload, never a
//! silent default.

use content_source::{Instance, RawContent, UpstreamError};

use crate::content::{ArticleRevision, License, UnknownUuid};

pub fn to_license(raw: &RawContent) -> Result<License, UpstreamError> {
    Ok(License {
        id: raw.require_i64("id")?,
        instance: parse_instance(raw)?,
        default: raw.require_bool("default")?,
        title: raw.require_str("title")?.to_owned(),
        url: raw.require_str("url")?.to_owned(),
        content: raw.require_str("content")?.to_owned(),
        agreement: raw.require_str("agreement")?.to_owned(),
        icon_href: raw.require_str("iconHref")?.to_owned(),
    })
}

/// Revisions carry their editable payload nested under `fields`.
pub fn to_article_revision(raw: &RawContent) -> Result<ArticleRevision, UpstreamError> {
    let fields = raw.require_object("fields")?;
    Ok(ArticleRevision {
        id: raw.require_i64("id")?,
        title: fields.require_str("title")?.to_owned(),
        content: fields.require_str("content")?.to_owned(),
        changes: fields.require_str("changes")?.to_owned(),
    })
}

pub fn to_unknown(raw: &RawContent) -> Result<UnknownUuid, UpstreamError> {
    Ok(UnknownUuid {
        id: raw.require_i64("id")?,
        discriminator: raw.str_field("discriminator").map(str::to_owned),
    })
}

pub(crate) fn parse_instance(raw: &RawContent) -> Result<Instance, UpstreamError> {
    let value = raw.require_str("instance")?;
    value
        .parse()
        .map_err(|_| UpstreamError::Malformed(format!("unknown instance `{value}`")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: serde_json::Value) -> RawContent {
        RawContent::from_value(value).unwrap()
    }

    #[test]
    fn maps_licenses_with_renamed_icon_field() {
        let license = to_license(&raw(json!({
            "id": 1,
            "instance": "de",
            "default": true,
            "title": "title",
            "url": "url",
            "content": "content",
            "agreement": "agreement",
            "iconHref": "iconHref"
        })))
        .unwrap();
        assert_eq!(license.icon_href, "iconHref");
        assert_eq!(license.instance, Instance::De);
        assert!(license.default);
    }

    #[test]
    fn license_missing_field_is_malformed() {
        let err = to_license(&raw(json!({ "id": 1, "instance": "de" }))).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)), "{err}");
    }

    #[test]
    fn maps_revisions_from_the_fields_object() {
        let revision = to_article_revision(&raw(json!({
            "id": 30674,
            "discriminator": "entityRevision",
            "type": "article",
            "fields": { "title": "title", "content": "content", "changes": "changes" }
        })))
        .unwrap();
        assert_eq!(revision.id, 30674);
        assert_eq!(revision.title, "title");
    }

    #[test]
    fn revision_without_fields_is_malformed() {
        let err = to_article_revision(&raw(json!({ "id": 30674 }))).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)), "{err}");
    }

    #[test]
    fn unknown_keeps_whatever_discriminator_was_sent() {
        let unknown = to_unknown(&raw(json!({ "id": 7, "discriminator": "widget" }))).unwrap();
        assert_eq!(unknown.discriminator.as_deref(), Some("widget"));

        let unknown = to_unknown(&raw(json!({ "id": 7 }))).unwrap();
        assert_eq!(unknown.discriminator, None);
    }

    #[test]
    fn unknown_without_id_is_malformed() {
        let err = to_unknown(&raw(json!({ "discriminator": "widget" }))).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)), "{err}");
    }

    #[test]
    fn unknown_instance_is_malformed() {
        let err = parse_instance(&raw(json!({ "instance": "fr" }))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected upstream payload: unknown instance `fr`"
        );
    }
}
