//! Large file primitives
//!
//! Only the individual calls are modelled. Splitting content into parts and
//! driving the upload is left to the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AUTO_CONTENT_TYPE, MAX_PART_NUMBER, Validate, check_range, check_sha1, require};
use crate::error::{Error, Result};

use super::{FileInfo, PartInfo};

/// Parameters for `b2_start_large_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLargeFile {
    pub bucket_id: String,
    pub file_name: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_info: Option<BTreeMap<String, String>>,
}

impl StartLargeFile {
    /// Start a large file whose content type the service infers
    pub fn new(bucket_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            file_name: file_name.into(),
            content_type: AUTO_CONTENT_TYPE.to_string(),
            file_info: None,
        }
    }
}

impl Validate for StartLargeFile {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)?;
        require("fileName", &self.file_name)?;
        require("contentType", &self.content_type)
    }
}

/// Parameters for `b2_cancel_large_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelLargeFile {
    pub file_id: String,
}

impl Validate for CancelLargeFile {
    fn validate(&self) -> Result<()> {
        require("fileId", &self.file_id)
    }
}

/// Result of `b2_cancel_large_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelledLargeFile {
    pub file_id: String,
    pub account_id: String,
    pub bucket_id: String,
    pub file_name: String,
}

/// Parameters for `b2_get_upload_part_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUploadPartUrl {
    pub file_id: String,
}

impl Validate for GetUploadPartUrl {
    fn validate(&self) -> Result<()> {
        require("fileId", &self.file_id)
    }
}

/// Parameters for `b2_finish_large_file`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLargeFile {
    pub file_id: String,
    /// SHA-1 of each part, in part-number order
    pub part_sha1_array: Vec<String>,
}

impl Validate for FinishLargeFile {
    fn validate(&self) -> Result<()> {
        require("fileId", &self.file_id)?;
        if self.part_sha1_array.is_empty() {
            return Err(Error::InvalidInput(
                "partSha1Array must list at least one part".into(),
            ));
        }
        if self.part_sha1_array.len() > MAX_PART_NUMBER as usize {
            return Err(Error::InvalidInput(format!(
                "a large file has at most {MAX_PART_NUMBER} parts"
            )));
        }
        for sha1 in &self.part_sha1_array {
            check_sha1("partSha1Array", sha1)?;
        }
        Ok(())
    }
}

/// Parameters for `b2_list_parts`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParts {
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_part_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_part_count: Option<u32>,
}

impl ListParts {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            ..Default::default()
        }
    }
}

impl Validate for ListParts {
    fn validate(&self) -> Result<()> {
        require("fileId", &self.file_id)?;
        if let Some(start) = self.start_part_number {
            check_range("startPartNumber", start.into(), 1, MAX_PART_NUMBER.into())?;
        }
        if let Some(count) = self.max_part_count {
            check_range("maxPartCount", count.into(), 1, 1000)?;
        }
        Ok(())
    }
}

/// One page of `b2_list_parts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartListing {
    pub parts: Vec<PartInfo>,
    #[serde(default)]
    pub next_part_number: Option<u32>,
}

/// Parameters for `b2_list_unfinished_large_files`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUnfinishedLargeFiles {
    pub bucket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_count: Option<u32>,
}

impl ListUnfinishedLargeFiles {
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            ..Default::default()
        }
    }
}

impl Validate for ListUnfinishedLargeFiles {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)?;
        if let Some(count) = self.max_file_count {
            check_range("maxFileCount", count.into(), 1, 100)?;
        }
        Ok(())
    }
}

/// One page of `b2_list_unfinished_large_files`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfinishedLargeFiles {
    pub files: Vec<FileInfo>,
    #[serde(default)]
    pub next_file_id: Option<String>,
}
