//! File-level request and response types

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{MAX_PART_NUMBER, Validate, check_range, require};
use crate::error::{Error, Result};

/// What a file version represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    /// A regular uploaded file
    Upload,
    /// An unfinished large file
    Start,
    /// A hide marker
    Hide,
    /// A virtual folder in a delimited listing
    Folder,
    /// A file created by copying another
    Copy,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileAction::Upload => write!(f, "upload"),
            FileAction::Start => write!(f, "start"),
            FileAction::Hide => write!(f, "hide"),
            FileAction::Folder => write!(f, "folder"),
            FileAction::Copy => write!(f, "copy"),
        }
    }
}

/// A file version as described by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Account that owns the file
    #[serde(default)]
    pub account_id: String,

    /// What this version represents
    pub action: FileAction,

    /// Bucket the file is stored in
    #[serde(default)]
    pub bucket_id: String,

    /// Size in bytes
    #[serde(default)]
    pub content_length: u64,

    /// Hex SHA-1 of the content, `none` for large files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_sha1: Option<String>,

    /// Hex MD5 of the content, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_md5: Option<String>,

    /// MIME type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Unique version identifier, absent for folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,

    /// Custom metadata
    #[serde(default)]
    pub file_info: BTreeMap<String, String>,

    /// Full file name
    pub file_name: String,

    /// Upload time in milliseconds since the epoch
    #[serde(default)]
    pub upload_timestamp: i64,

    /// Object lock retention settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_retention: Option<serde_json::Value>,

    /// Object lock legal hold setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_hold: Option<serde_json::Value>,

    /// Server-side encryption settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<serde_json::Value>,
}

impl FileInfo {
    /// Upload time as a timestamp
    pub fn uploaded_at(&self) -> Option<jiff::Timestamp> {
        jiff::Timestamp::from_millisecond(self.upload_timestamp).ok()
    }
}

/// Content to upload as a single file
#[derive(Debug, Clone)]
pub struct UploadContent {
    /// Name the content carries by itself
    pub name: String,

    /// MIME type; the service infers one when absent
    pub content_type: Option<String>,

    /// Custom metadata sent as `X-Bz-Info-*` headers
    pub info: BTreeMap<String, String>,

    /// Raw bytes
    pub data: Bytes,
}

impl UploadContent {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            info: BTreeMap::new(),
            data: data.into(),
        }
    }

    /// Set the MIME type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Attach a metadata entry
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Whether a copy keeps or replaces the source metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetadataDirective {
    #[default]
    Copy,
    Replace,
}

/// Parameters for `b2_copy_file`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFile {
    /// File version to copy
    pub source_file_id: String,

    /// Name of the new file
    pub file_name: String,

    /// Target bucket, defaults to the source bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_bucket_id: Option<String>,

    /// Byte range to copy, e.g. `bytes=0-99`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_directive: Option<MetadataDirective>,

    /// Required with `REPLACE`, forbidden with `COPY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Required with `REPLACE`, forbidden with `COPY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_info: Option<BTreeMap<String, String>>,
}

impl CopyFile {
    pub fn new(source_file_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            source_file_id: source_file_id.into(),
            file_name: file_name.into(),
            ..Default::default()
        }
    }
}

impl Validate for CopyFile {
    fn validate(&self) -> Result<()> {
        require("sourceFileId", &self.source_file_id)?;
        require("fileName", &self.file_name)?;
        let has_metadata = self.content_type.is_some() || self.file_info.is_some();
        match self.metadata_directive.unwrap_or_default() {
            MetadataDirective::Copy if has_metadata => Err(Error::InvalidInput(
                "contentType and fileInfo must not be set with metadataDirective COPY".into(),
            )),
            MetadataDirective::Replace if self.content_type.is_none() => Err(Error::InvalidInput(
                "contentType is required with metadataDirective REPLACE".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Parameters for `b2_copy_part`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyPart {
    pub source_file_id: String,
    pub large_file_id: String,
    pub part_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl CopyPart {
    pub fn new(
        source_file_id: impl Into<String>,
        large_file_id: impl Into<String>,
        part_number: u32,
    ) -> Self {
        Self {
            source_file_id: source_file_id.into(),
            large_file_id: large_file_id.into(),
            part_number,
            range: None,
        }
    }
}

impl Validate for CopyPart {
    fn validate(&self) -> Result<()> {
        require("sourceFileId", &self.source_file_id)?;
        require("largeFileId", &self.large_file_id)?;
        check_range("partNumber", self.part_number.into(), 1, MAX_PART_NUMBER.into())
    }
}

/// One stored part of a large file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartInfo {
    pub file_id: String,
    pub part_number: u32,
    pub content_length: u64,
    pub content_sha1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_md5: Option<String>,
    #[serde(default)]
    pub upload_timestamp: i64,
}

/// Parameters for `b2_list_file_names`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFileNames {
    pub bucket_id: String,

    /// First file name to return
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_file_name: Option<String>,

    /// Page size, 1 to 10000
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Collapse names past this character into folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl ListFileNames {
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            ..Default::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn max_file_count(mut self, count: u32) -> Self {
        self.max_file_count = Some(count);
        self
    }

    pub fn start_file_name(mut self, name: impl Into<String>) -> Self {
        self.start_file_name = Some(name.into());
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }
}

impl Validate for ListFileNames {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)?;
        if let Some(count) = self.max_file_count {
            check_range("maxFileCount", count.into(), 1, 10_000)?;
        }
        Ok(())
    }
}

/// One page of `b2_list_file_names`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNameListing {
    pub files: Vec<FileInfo>,

    /// Pass as `startFileName` to fetch the next page
    #[serde(default)]
    pub next_file_name: Option<String>,
}

/// Parameters for `b2_list_file_versions`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFileVersions {
    pub bucket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_file_name: Option<String>,
    /// Only valid together with `start_file_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

impl ListFileVersions {
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            ..Default::default()
        }
    }
}

impl Validate for ListFileVersions {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)?;
        if self.start_file_id.is_some() && self.start_file_name.is_none() {
            return Err(Error::InvalidInput(
                "startFileId requires startFileName".into(),
            ));
        }
        if let Some(count) = self.max_file_count {
            check_range("maxFileCount", count.into(), 1, 10_000)?;
        }
        Ok(())
    }
}

/// One page of `b2_list_file_versions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersionListing {
    pub files: Vec<FileInfo>,
    #[serde(default)]
    pub next_file_name: Option<String>,
    #[serde(default)]
    pub next_file_id: Option<String>,
}

/// Parameters for `b2_get_file_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFileInfo {
    pub file_id: String,
}

impl Validate for GetFileInfo {
    fn validate(&self) -> Result<()> {
        require("fileId", &self.file_id)
    }
}

/// Parameters for `b2_hide_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideFile {
    pub bucket_id: String,
    pub file_name: String,
}

impl Validate for HideFile {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)?;
        require("fileName", &self.file_name)
    }
}

/// Parameters for `b2_delete_file_version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileVersion {
    pub file_name: String,
    pub file_id: String,
    /// Delete despite governance-mode retention
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_governance: Option<bool>,
}

impl Validate for DeleteFileVersion {
    fn validate(&self) -> Result<()> {
        require("fileName", &self.file_name)?;
        require("fileId", &self.file_id)
    }
}

/// Result of `b2_delete_file_version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedFileVersion {
    pub file_id: String,
    pub file_name: String,
}

/// Legal hold state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalHold {
    On,
    Off,
}

/// Parameters for `b2_update_file_legal_hold`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileLegalHold {
    pub file_name: String,
    pub file_id: String,
    pub legal_hold: LegalHold,
}

impl Validate for UpdateFileLegalHold {
    fn validate(&self) -> Result<()> {
        require("fileName", &self.file_name)?;
        require("fileId", &self.file_id)
    }
}

/// Result of `b2_update_file_legal_hold`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalHoldUpdate {
    pub file_id: String,
    pub file_name: String,
    pub legal_hold: Option<LegalHold>,
}

/// Object lock retention mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionMode {
    Governance,
    Compliance,
}

/// Retention setting for a file version
///
/// Both fields unset clears retention.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRetention {
    pub mode: Option<RetentionMode>,
    /// Milliseconds since the epoch
    pub retain_until_timestamp: Option<i64>,
}

/// Parameters for `b2_update_file_retention`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRetention {
    pub file_name: String,
    pub file_id: String,
    pub file_retention: FileRetention,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_governance: Option<bool>,
}

impl Validate for UpdateFileRetention {
    fn validate(&self) -> Result<()> {
        require("fileName", &self.file_name)?;
        require("fileId", &self.file_id)?;
        let retention = &self.file_retention;
        if retention.mode.is_some() != retention.retain_until_timestamp.is_some() {
            return Err(Error::InvalidInput(
                "fileRetention mode and retainUntilTimestamp must be set together".into(),
            ));
        }
        Ok(())
    }
}

/// Result of `b2_update_file_retention`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionUpdate {
    pub file_id: String,
    pub file_name: String,
    pub file_retention: FileRetention,
}

/// A downloaded file: body plus the metadata carried in response headers
#[derive(Debug, Clone, Default)]
pub struct DownloadedFile {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content_sha1: Option<String>,
    pub content_length: u64,
    pub upload_timestamp: Option<i64>,
    /// Custom metadata from `X-Bz-Info-*` headers
    pub file_info: BTreeMap<String, String>,
    pub body: Bytes,
}
