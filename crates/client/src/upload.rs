//! Uploads
//!
//! An upload needs a grant from `b2_get_upload_url`. The client keeps only
//! the most recent one: each successful upload replies with the grant to use
//! next, which replaces the cached one. Interleaving uploads to different
//! buckets therefore means fetching a grant before each switch.

use b2_core::{
    AUTO_CONTENT_TYPE, Error, GetUploadUrl, HttpRequest, MAX_PART_NUMBER, PartInfo, Result,
    UploadContent, UploadGrant, UploadPartGrant,
};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::Method;

use crate::client::B2Client;
use crate::dispatch::decode;
use crate::hash::hex_digest;

/// Percent-encode a file name for the `X-Bz-File-Name` header, keeping `/`
pub(crate) fn encode_file_name(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reject caller-supplied header parts the transport could not send
fn check_headers(content_type: &str, content: &UploadContent) -> Result<()> {
    HeaderValue::from_str(content_type).map_err(|_| {
        Error::InvalidInput(format!(
            "contentType is not a valid header value: {content_type:?}"
        ))
    })?;
    for key in content.info.keys() {
        HeaderName::from_bytes(format!("X-Bz-Info-{key}").as_bytes()).map_err(|_| {
            Error::InvalidInput(format!("fileInfo key is not a valid header name: {key:?}"))
        })?;
    }
    Ok(())
}

impl B2Client {
    /// Fetch an upload grant for `bucket_id` and cache it (`b2_get_upload_url`)
    ///
    /// Must be called before [`upload_file`](Self::upload_file); the cached
    /// grant is replaced, whatever bucket it belonged to.
    pub async fn get_upload_url(&self, bucket_id: &str) -> Result<UploadGrant> {
        let params = GetUploadUrl {
            bucket_id: bucket_id.to_string(),
        };
        let grant: UploadGrant = self.post("b2_get_upload_url", &params).await?;
        tracing::debug!(bucket_id = %grant.bucket_id, "Cached upload URL");
        self.state.set_upload_grant(grant.clone()).await;
        Ok(grant)
    }

    /// Currently cached upload grant
    pub async fn upload_grant(&self) -> Result<UploadGrant> {
        self.state.upload_grant().await
    }

    /// Upload `content` as one file using the cached upload grant
    ///
    /// `file_name` overrides the content's own name. Exactly one request is
    /// made; there is no chunking or resumption. The reply replaces the
    /// cached upload grant and is returned.
    ///
    /// The reply is decoded as an [`UploadGrant`]. A server that answers
    /// with a file description instead still stored the file, but the call
    /// fails with a "Malformed response body" [`Error::Api`] carrying the
    /// 2xx status. That error is not retryable; retrying it would upload
    /// the file again. The cached grant is left unchanged in that case.
    ///
    /// Content type and `X-Bz-Info-*` keys are checked locally and rejected
    /// with [`Error::InvalidInput`] before any request is made.
    pub async fn upload_file(
        &self,
        content: &UploadContent,
        file_name: Option<&str>,
    ) -> Result<UploadGrant> {
        if content.is_empty() {
            return Err(Error::Precondition("No file content provided".into()));
        }
        let grant = self.state.upload_grant().await?;

        let name = file_name.unwrap_or(&content.name);
        if name.is_empty() {
            return Err(Error::InvalidInput("file name is required".into()));
        }

        let content_type = content.content_type.as_deref().unwrap_or(AUTO_CONTENT_TYPE);
        check_headers(content_type, content)?;

        let sha1 = hex_digest(self.hasher.as_ref(), &content.data);
        let mut request = HttpRequest::new(Method::POST, &grant.upload_url)
            .header("Authorization", &grant.authorization_token)
            .header("X-Bz-File-Name", encode_file_name(name))
            .header("Content-Type", content_type)
            .header("Content-Length", content.len().to_string())
            .header("X-Bz-Content-Sha1", sha1)
            .body(content.data.clone());
        for (key, value) in &content.info {
            request = request.header(format!("X-Bz-Info-{key}"), urlencoding::encode(value));
        }

        let response = self.dispatcher.execute(request).await?;
        let next: UploadGrant = decode(&response)?;
        tracing::debug!(file_name = %name, bytes = content.len(), "Uploaded file");

        self.state.set_upload_grant(next.clone()).await;
        Ok(next)
    }

    /// Upload one part of a large file (`b2_upload_part`)
    ///
    /// The part grant comes from
    /// [`get_upload_part_url`](Self::get_upload_part_url) and is passed in
    /// explicitly; it is not cached.
    pub async fn upload_part(
        &self,
        grant: &UploadPartGrant,
        part_number: u32,
        data: Bytes,
    ) -> Result<PartInfo> {
        if data.is_empty() {
            return Err(Error::Precondition("No part content provided".into()));
        }
        if !(1..=MAX_PART_NUMBER).contains(&part_number) {
            return Err(Error::InvalidInput(format!(
                "partNumber must be between 1 and {MAX_PART_NUMBER}, got {part_number}"
            )));
        }

        let sha1 = hex_digest(self.hasher.as_ref(), &data);
        let request = HttpRequest::new(Method::POST, &grant.upload_url)
            .header("Authorization", &grant.authorization_token)
            .header("X-Bz-Part-Number", part_number.to_string())
            .header("Content-Length", data.len().to_string())
            .header("X-Bz-Content-Sha1", sha1)
            .body(data);

        let response = self.dispatcher.execute(request).await?;
        decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, authorized_client, client, expect_operation};
    use b2_core::HttpResponse;

    const SHA1_ABC: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";

    const GRANT_1: &str = r#"{"authorizationToken":"up-token-1","bucketId":"bucket1","uploadUrl":"https://pod-1.example.com/b2api/v2/b2_upload_file/bucket1/c001"}"#;
    const GRANT_2: &str = r#"{"authorizationToken":"up-token-2","bucketId":"bucket1","uploadUrl":"https://pod-2.example.com/b2api/v2/b2_upload_file/bucket1/c002"}"#;
    const GRANT_3: &str = r#"{"authorizationToken":"up-token-3","bucketId":"bucket1","uploadUrl":"https://pod-3.example.com/b2api/v2/b2_upload_file/bucket1/c003"}"#;

    #[test]
    fn test_encode_file_name() {
        assert_eq!(encode_file_name("photos/cat.jpg"), "photos/cat.jpg");
        assert_eq!(
            encode_file_name("my docs/résumé 1.pdf"),
            "my%20docs/r%C3%A9sum%C3%A9%201.pdf"
        );
    }

    #[tokio::test]
    async fn test_get_upload_url_caches_grant() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.url.ends_with("/b2api/v2/b2_get_upload_url")
                    && req.body.as_ref() == br#"{"bucketId":"bucket1"}"#
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, GRANT_1)));

        let client = authorized_client(transport).await;
        let grant = client.get_upload_url("bucket1").await.unwrap();
        assert_eq!(grant.authorization_token, "up-token-1");
        assert_eq!(client.upload_grant().await.unwrap(), grant);
    }

    #[tokio::test]
    async fn test_get_upload_url_requires_authorization() {
        let client = client(MockTransport::new());
        let err = client.get_upload_url("bucket1").await.unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[tokio::test]
    async fn test_upload_before_get_upload_url_fails() {
        let client = authorized_client(MockTransport::new()).await;
        let err = client
            .upload_file(&UploadContent::new("a.txt", "abc"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(msg) if msg.contains("get_upload_url")));
    }

    #[tokio::test]
    async fn test_upload_empty_content_fails() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);

        let client = authorized_client(transport).await;
        client.get_upload_url("bucket1").await.unwrap();

        let err = client
            .upload_file(&UploadContent::new("a.txt", Bytes::new()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[tokio::test]
    async fn test_upload_file_headers_and_grant_rotation() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);
        transport
            .expect_send()
            .withf(|req| {
                req.url == "https://pod-1.example.com/b2api/v2/b2_upload_file/bucket1/c001"
                    && req.header_value("Authorization") == Some("up-token-1")
                    && req.header_value("X-Bz-File-Name") == Some("notes/renamed%20file.txt")
                    && req.header_value("Content-Type") == Some("text/plain")
                    && req.header_value("Content-Length") == Some("3")
                    && req.header_value("X-Bz-Content-Sha1") == Some(SHA1_ABC)
                    && req.header_value("X-Bz-Info-author") == Some("unit%20test")
                    && req.body.as_ref() == b"abc"
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, GRANT_2)));

        let client = authorized_client(transport).await;
        client.get_upload_url("bucket1").await.unwrap();

        let content = UploadContent::new("original.txt", "abc")
            .with_content_type("text/plain")
            .with_info("author", "unit test");
        let next = client
            .upload_file(&content, Some("notes/renamed file.txt"))
            .await
            .unwrap();

        assert_eq!(next.authorization_token, "up-token-2");
        assert_eq!(client.upload_grant().await.unwrap(), next);
    }

    #[tokio::test]
    async fn test_upload_uses_content_name_and_auto_type() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);
        transport
            .expect_send()
            .withf(|req| {
                req.url.starts_with("https://pod-1.example.com")
                    && req.header_value("X-Bz-File-Name") == Some("original.txt")
                    && req.header_value("Content-Type") == Some("b2/x-auto")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, GRANT_2)));

        let client = authorized_client(transport).await;
        client.get_upload_url("bucket1").await.unwrap();
        client
            .upload_file(&UploadContent::new("original.txt", "abc"), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_second_get_upload_url_wins() {
        let mut transport = MockTransport::new();
        let mut calls = 0;
        transport
            .expect_send()
            .withf(|req| req.url.ends_with("/b2_get_upload_url"))
            .times(2)
            .returning(move |_| {
                calls += 1;
                let body = if calls == 1 { GRANT_1 } else { GRANT_2 };
                Ok(HttpResponse::new(200, body))
            });
        transport
            .expect_send()
            .withf(|req| req.url.starts_with("https://pod-2.example.com"))
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, GRANT_3)));

        let client = authorized_client(transport).await;
        client.get_upload_url("bucket1").await.unwrap();
        let second = client.get_upload_url("bucket1").await.unwrap();
        assert_eq!(client.upload_grant().await.unwrap(), second);

        let next = client
            .upload_file(&UploadContent::new("a.txt", "abc"), None)
            .await
            .unwrap();
        assert_eq!(next.authorization_token, "up-token-3");
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_grant() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);
        transport
            .expect_send()
            .withf(|req| req.url.starts_with("https://pod-1.example.com"))
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    503,
                    r#"{"code":"service_unavailable","message":"no tomes available","status":503}"#,
                ))
            });

        let client = authorized_client(transport).await;
        let grant = client.get_upload_url("bucket1").await.unwrap();
        let err = client
            .upload_file(&UploadContent::new("a.txt", "abc"), None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some("service_unavailable"));
        assert!(b2_core::is_retryable_error(&err));
        assert_eq!(client.upload_grant().await.unwrap(), grant);
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_info_key_without_sending() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);

        let client = authorized_client(transport).await;
        let grant = client.get_upload_url("bucket1").await.unwrap();

        let content = UploadContent::new("a.txt", "abc").with_info("bad key", "x");
        let err = client.upload_file(&content, None).await.unwrap_err();

        assert!(matches!(&err, Error::InvalidInput(msg) if msg.contains("bad key")));
        assert!(!b2_core::is_retryable_error(&err));
        assert_eq!(client.upload_grant().await.unwrap(), grant);
    }

    #[tokio::test]
    async fn test_upload_rejects_content_type_with_line_break() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);

        let client = authorized_client(transport).await;
        client.get_upload_url("bucket1").await.unwrap();

        let content =
            UploadContent::new("a.txt", "abc").with_content_type("text/plain\r\nX-Injected: y");
        let err = client.upload_file(&content, None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.starts_with("contentType")));
    }

    #[tokio::test]
    async fn test_upload_reply_with_file_description_is_not_retryable() {
        let mut transport = MockTransport::new();
        expect_operation(&mut transport, "b2_get_upload_url", 200, GRANT_1);
        transport
            .expect_send()
            .withf(|req| req.url.starts_with("https://pod-1.example.com"))
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"action":"upload","bucketId":"bucket1","fileName":"a.txt","fileId":"4_z_a","contentLength":3,"contentSha1":"a9993e364706816aba3e25717850c26c9cd0d89d"}"#,
                ))
            });

        let client = authorized_client(transport).await;
        let grant = client.get_upload_url("bucket1").await.unwrap();
        let err = client
            .upload_file(&UploadContent::new("a.txt", "abc"), None)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().starts_with("Malformed response body"));
        assert!(!b2_core::is_retryable_error(&err));
        assert_eq!(client.upload_grant().await.unwrap(), grant);
    }

    #[tokio::test]
    async fn test_upload_part() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.url == "https://pod-9.example.com/b2api/v2/b2_upload_part/large1/c009"
                    && req.header_value("Authorization") == Some("part-token")
                    && req.header_value("X-Bz-Part-Number") == Some("2")
                    && req.header_value("X-Bz-Content-Sha1") == Some(SHA1_ABC)
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    format!(
                        r#"{{"fileId":"large1","partNumber":2,"contentLength":3,"contentSha1":"{SHA1_ABC}","uploadTimestamp":1700000000000}}"#
                    ),
                ))
            });

        let client = client(transport);
        let grant = UploadPartGrant {
            authorization_token: "part-token".into(),
            file_id: "large1".into(),
            upload_url: "https://pod-9.example.com/b2api/v2/b2_upload_part/large1/c009".into(),
        };
        let part = client
            .upload_part(&grant, 2, Bytes::from_static(b"abc"))
            .await
            .unwrap();
        assert_eq!(part.part_number, 2);
        assert_eq!(part.content_sha1, SHA1_ABC);
    }

    #[tokio::test]
    async fn test_upload_part_rejects_bad_input() {
        let client = client(MockTransport::new());
        let grant = UploadPartGrant {
            authorization_token: "part-token".into(),
            file_id: "large1".into(),
            upload_url: "https://pod-9.example.com".into(),
        };
        assert!(matches!(
            client.upload_part(&grant, 1, Bytes::new()).await,
            Err(Error::Precondition(_))
        ));
        assert!(matches!(
            client.upload_part(&grant, 0, Bytes::from_static(b"x")).await,
            Err(Error::InvalidInput(_))
        ));
    }
}
