//! Downloads
//!
//! Downloads go to the download URL of the live grant rather than the API
//! URL. File metadata comes back in `X-Bz-*` headers next to the raw body.

use b2_core::{
    DownloadAuthorization, DownloadedFile, Error, GetDownloadAuthorization, HttpRequest,
    HttpResponse, Result,
};
use http::Method;
use url::Url;

use crate::client::B2Client;
use crate::upload::encode_file_name;

const INFO_HEADER_PREFIX: &str = "x-bz-info-";

fn decoded(value: &str) -> String {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// Collect file metadata from download response headers
fn downloaded_file(response: HttpResponse) -> DownloadedFile {
    let header = |name: &str| response.header_value(name).map(str::to_string);

    let file_info = response
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let lower = name.to_ascii_lowercase();
            lower
                .strip_prefix(INFO_HEADER_PREFIX)
                .map(|key| (key.to_string(), decoded(value)))
        })
        .collect();

    DownloadedFile {
        file_id: header("x-bz-file-id"),
        file_name: response.header_value("x-bz-file-name").map(decoded),
        content_type: header("content-type"),
        content_sha1: header("x-bz-content-sha1"),
        content_length: response
            .header_value("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(response.body.len() as u64),
        upload_timestamp: response
            .header_value("x-bz-upload-timestamp")
            .and_then(|v| v.parse().ok()),
        file_info,
        body: response.body,
    }
}

impl B2Client {
    /// Create a token that lets others download files under a prefix
    pub async fn get_download_authorization(
        &self,
        params: &GetDownloadAuthorization,
    ) -> Result<DownloadAuthorization> {
        self.post("b2_get_download_authorization", params).await
    }

    /// Download a file by ID (`b2_download_file_by_id`)
    pub async fn download_file_by_id(&self, file_id: &str) -> Result<DownloadedFile> {
        if file_id.trim().is_empty() {
            return Err(Error::InvalidInput("fileId is required".into()));
        }
        let grant = self.state.grant().await?;
        let endpoint = self
            .dispatcher
            .endpoint(&grant.download_url, "b2_download_file_by_id");
        let url = Url::parse_with_params(&endpoint, &[("fileId", file_id)])
            .map_err(|e| Error::InvalidInput(format!("Invalid download URL {endpoint}: {e}")))?;

        let request = HttpRequest::new(Method::GET, url.as_str())
            .header("Authorization", &grant.authorization_token);
        let response = self.dispatcher.execute(request).await?;
        Ok(downloaded_file(response))
    }

    /// Download the latest version of a file by bucket and name
    pub async fn download_file_by_name(
        &self,
        bucket_name: &str,
        file_name: &str,
    ) -> Result<DownloadedFile> {
        if bucket_name.trim().is_empty() || file_name.is_empty() {
            return Err(Error::InvalidInput(
                "bucket name and file name are required".into(),
            ));
        }
        let grant = self.state.grant().await?;
        let url = format!(
            "{}/file/{}/{}",
            grant.download_url.trim_end_matches('/'),
            urlencoding::encode(bucket_name),
            encode_file_name(file_name)
        );

        let request =
            HttpRequest::new(Method::GET, url).header("Authorization", &grant.authorization_token);
        let response = self.dispatcher.execute(request).await?;
        Ok(downloaded_file(response))
    }
}
