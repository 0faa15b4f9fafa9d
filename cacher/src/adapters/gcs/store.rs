//! GCS snapshot store implementation
//!
//! Uploads the rendered page through the JSON API's multipart upload so the
//! object metadata (cache lifetime, gzip encoding) is set in the same request.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::Client;
use serde::Serialize;
use urlencoding::encode;

use crate::domain::ports::SnapshotStore;
use crate::error::StoreError;

const MULTIPART_BOUNDARY: &str = "rising_cache_snapshot_boundary";

/// Writes one object into a bucket
pub struct GcsSnapshotStore {
    http: Client,
    base_url: String,
    bucket: String,
    object: String,
    content_type: String,
    cache_control: String,
    access_token: Option<String>,
}

impl GcsSnapshotStore {
    pub fn new(
        base_url: String,
        bucket: String,
        object: String,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket,
            object,
            content_type: "text/html; charset=utf-8".to_string(),
            cache_control: "public, max-age=30".to_string(),
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn with_content_type(mut self, content_type: String) -> Self {
        self.content_type = content_type;
        self
    }

    /// How long browsers and the CDN may keep the object
    pub fn with_cache_max_age(mut self, seconds: u64) -> Self {
        self.cache_control = format!("public, max-age={}", seconds);
        self
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=multipart",
            self.base_url,
            encode(&self.bucket)
        )
    }

    fn multipart_body(&self, compressed: &[u8]) -> Result<Vec<u8>, StoreError> {
        let metadata = serde_json::to_string(&ObjectMetadata {
            name: &self.object,
            cache_control: &self.cache_control,
            content_encoding: "gzip",
            content_type: &self.content_type,
        })?;

        let mut body = Vec::with_capacity(compressed.len() + metadata.len() + 256);
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{m}\r\n--{b}\r\nContent-Type: {ct}\r\n\r\n",
                b = MULTIPART_BOUNDARY,
                m = metadata,
                ct = self.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(compressed);
        body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        Ok(body)
    }
}

/// Request types for the GCS JSON API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ObjectMetadata<'a> {
    name: &'a str,
    cache_control: &'a str,
    content_encoding: &'a str,
    content_type: &'a str,
}

/// Gzip a payload for `Content-Encoding: gzip`
pub fn gzip(payload: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(payload)
        .map_err(|e| StoreError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| StoreError::Compression(e.to_string()))
}

#[async_trait]
impl SnapshotStore for GcsSnapshotStore {
    async fn commit(&self, payload: &[u8]) -> Result<(), StoreError> {
        let compressed = gzip(payload)?;
        let body = self.multipart_body(&compressed)?;

        let mut request = self
            .http
            .post(self.upload_url())
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(
            bucket = %self.bucket,
            object = %self.object,
            raw_bytes = payload.len(),
            gzip_bytes = compressed.len(),
            "Uploaded snapshot"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BUCKET: &str = "www.f6oclock.com";

    fn store_for(server: &MockServer) -> GcsSnapshotStore {
        GcsSnapshotStore::new(
            format!("{}/", server.uri()),
            BUCKET.to_string(),
            "index.html".to_string(),
            None,
        )
        .unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn gzip_round_trips() {
        let payload = b"<html>cached</html>".repeat(20);
        let compressed = gzip(&payload).unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoded = Vec::new();
        GzDecoder::new(&compressed[..])
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[tokio::test]
    async fn commit_uploads_gzipped_object_with_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/upload/storage/v1/b/{}/o", BUCKET)))
            .and(query_param("uploadType", "multipart"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server)
            .with_access_token(Some("test-token".to_string()))
            .with_cache_max_age(30);
        let payload = b"<html>posts</html>";

        store.commit(payload).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = &requests[0].body;
        let text = String::from_utf8_lossy(body);
        assert!(text.contains(r#""name":"index.html""#));
        assert!(text.contains(r#""cacheControl":"public, max-age=30""#));
        assert!(text.contains(r#""contentEncoding":"gzip""#));
        assert!(text.contains(r#""contentType":"text/html; charset=utf-8""#));
        assert!(contains(body, &gzip(payload).unwrap()));

        let content_type = requests[0]
            .headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(
            content_type,
            format!("multipart/related; boundary={}", MULTIPART_BOUNDARY)
        );
    }

    #[tokio::test]
    async fn commit_surfaces_rejected_writes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let result = store_for(&server).commit(b"x").await;

        match result {
            Err(StoreError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }
}
