use serde_json::json;
use url::Url;

use crate::{ContentSource, ContentSourceInner, Instance, RawContent, SourceResult, UpstreamError};

/// Reqwest-backed implementation of the upstream contract.
///
/// One POST per operation against a fixed base address; no retries.
pub struct HttpContentSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpContentSource {
    pub fn new(base_url: Url) -> HttpContentSource {
        HttpContentSource {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn content_source(base_url: Url) -> ContentSource {
        ContentSource::new(Self::new(base_url))
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> SourceResult<RawContent> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| UpstreamError::Unavailable(format!("invalid upstream url: {err}")))?;
        tracing::debug!(%url, "upstream request");

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| UpstreamError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Unavailable(format!("upstream returned {status}")));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|err| UpstreamError::Malformed(err.to_string()))?;
        RawContent::from_value(value)
    }
}

#[async_trait::async_trait]
impl ContentSourceInner for HttpContentSource {
    async fn resolve_by_id(&self, id: i64) -> SourceResult<RawContent> {
        self.post("/api/uuid", json!({ "id": id })).await
    }

    async fn resolve_by_alias(&self, instance: Instance, path: &str) -> SourceResult<RawContent> {
        self.post("/api/url-alias", json!({ "instance": instance, "path": path }))
            .await
    }

    async fn resolve_license(&self, id: i64) -> SourceResult<RawContent> {
        self.post("/api/license", json!({ "id": id })).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn source_for(server: &MockServer) -> ContentSource {
        let base_url: Url = server.uri().parse().unwrap();
        HttpContentSource::content_source(base_url)
    }

    #[tokio::test]
    async fn resolves_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/uuid"))
            .and(body_json(json!({ "id": 19767 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 19767, "discriminator": "page" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let raw = source_for(&server).resolve_by_id(19767).await.unwrap();
        assert_eq!(raw.require_i64("id").unwrap(), 19767);
        assert_eq!(raw.str_field("discriminator"), Some("page"));
    }

    #[tokio::test]
    async fn resolves_by_alias() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/url-alias"))
            .and(body_json(json!({ "instance": "de", "path": "/mathe" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 19767, "discriminator": "page" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let raw = source_for(&server)
            .resolve_by_alias(Instance::De, "/mathe")
            .await
            .unwrap();
        assert_eq!(raw.require_i64("id").unwrap(), 19767);
    }

    #[tokio::test]
    async fn resolves_licenses_through_their_own_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/license"))
            .and(body_json(json!({ "id": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "title": "cc-by-sa" })))
            .expect(1)
            .mount(&server)
            .await;

        let raw = source_for(&server).resolve_license(1).await.unwrap();
        assert_eq!(raw.require_str("title").unwrap(), "cc-by-sa");
    }

    #[tokio::test]
    async fn non_2xx_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/uuid"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source_for(&server).resolve_by_id(1).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable(_)), "{err}");
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/uuid"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = source_for(&server).resolve_by_id(1).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)), "{err}");
    }

    #[tokio::test]
    async fn connection_failure_is_unavailable() {
        // Nothing listens on this port.
        let source = HttpContentSource::content_source("http://127.0.0.1:9".parse().unwrap());
        let err = source.resolve_by_id(1).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable(_)), "{err}");
    }
}
