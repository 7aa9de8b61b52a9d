//! Authorization and grant types

use serde::{Deserialize, Serialize};

use super::{Validate, check_range, require};
use crate::error::Result;

/// Account-level authorization returned by `b2_authorize_account`
///
/// Replaced as a whole on every login; never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationGrant {
    /// Account identifier
    pub account_id: String,

    /// Token sent in the `Authorization` header of account-level calls
    pub authorization_token: String,

    /// Base URL for every subsequent API call
    pub api_url: String,

    /// Base URL for downloads
    pub download_url: String,

    /// S3-compatible endpoint for the account
    #[serde(default)]
    pub s3_api_url: String,

    /// Smallest part size the service accepts for large files
    #[serde(default)]
    pub absolute_minimum_part_size: u64,

    /// Part size the service recommends for large files
    #[serde(default)]
    pub recommended_part_size: u64,

    /// What the application key may do
    #[serde(default)]
    pub allowed: Allowed,
}

/// Capabilities and restrictions attached to an application key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowed {
    /// Capability names (e.g. `listFiles`, `writeFiles`)
    #[serde(default)]
    pub capabilities: Vec<String>,

    /// Bucket the key is restricted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,

    /// Name of the restricted bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,

    /// File name prefix the key is restricted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
}

impl Allowed {
    /// Check whether a capability was granted
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Upload endpoint and token scoped to one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    pub authorization_token: String,
    pub bucket_id: String,
    pub upload_url: String,
}

/// Parameters for `b2_get_upload_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUploadUrl {
    pub bucket_id: String,
}

impl Validate for GetUploadUrl {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)
    }
}

/// Upload endpoint and token scoped to one unfinished large file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPartGrant {
    pub authorization_token: String,
    pub file_id: String,
    pub upload_url: String,
}

/// Parameters for `b2_get_download_authorization`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDownloadAuthorization {
    /// Bucket containing the files
    pub bucket_id: String,

    /// Only file names starting with this prefix are authorized
    pub file_name_prefix: String,

    /// Token lifetime, 1 second to 7 days
    pub valid_duration_in_seconds: u64,

    /// Content-Disposition the download must carry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b2_content_disposition: Option<String>,
}

impl GetDownloadAuthorization {
    pub fn new(
        bucket_id: impl Into<String>,
        file_name_prefix: impl Into<String>,
        valid_duration_in_seconds: u64,
    ) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            file_name_prefix: file_name_prefix.into(),
            valid_duration_in_seconds,
            b2_content_disposition: None,
        }
    }
}

impl Validate for GetDownloadAuthorization {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)?;
        check_range(
            "validDurationInSeconds",
            self.valid_duration_in_seconds,
            1,
            604_800,
        )
    }
}

/// Token granting download access to a set of files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAuthorization {
    pub bucket_id: String,
    pub file_name_prefix: String,
    pub authorization_token: String,
}
