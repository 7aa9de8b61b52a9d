//! B2 API type definitions
//!
//! Request parameter structures serialize to the JSON bodies the service
//! expects; response structures deserialize from its replies. Every
//! parameter structure implements [`Validate`] so bad input is rejected
//! before a request is issued.

mod auth;
mod bucket;
mod file;
mod key;
mod large_file;

pub use auth::{
    Allowed, AuthorizationGrant, DownloadAuthorization, GetDownloadAuthorization, GetUploadUrl,
    UploadGrant, UploadPartGrant,
};
pub use bucket::{
    Bucket, BucketList, BucketType, CreateBucket, DeleteBucket, LifecycleRule, ListBuckets,
    UpdateBucket,
};
pub use file::{
    CopyFile, CopyPart, DeleteFileVersion, DeletedFileVersion, DownloadedFile, FileAction,
    FileInfo, FileNameListing, FileRetention, FileVersionListing, GetFileInfo, HideFile, LegalHold,
    LegalHoldUpdate, ListFileNames, ListFileVersions, MetadataDirective, PartInfo,
    RetentionMode, RetentionUpdate, UpdateFileLegalHold, UpdateFileRetention, UploadContent,
};
pub use key::{ApplicationKey, Capability, CreateKey, DeleteKey, KeyList, ListKeys};
pub use large_file::{
    CancelLargeFile, CancelledLargeFile, FinishLargeFile, GetUploadPartUrl, ListParts,
    ListUnfinishedLargeFiles, PartListing, StartLargeFile, UnfinishedLargeFiles,
};

use crate::error::{Error, Result};

/// Content type that lets the service pick one from the file name
pub const AUTO_CONTENT_TYPE: &str = "b2/x-auto";

/// Largest number of parts in a large file
pub const MAX_PART_NUMBER: u32 = 10_000;

/// Parameter validation performed before a request is dispatched
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reject an empty required string
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

/// Reject a value outside `min..=max`
pub(crate) fn check_range(field: &str, value: u64, min: u64, max: u64) -> Result<()> {
    if value < min || value > max {
        return Err(Error::InvalidInput(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Reject a string that is not a 40-character hex SHA-1
pub(crate) fn check_sha1(field: &str, value: &str) -> Result<()> {
    if value.len() != 40 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidInput(format!(
            "{field} must be a 40-character hex SHA-1, got '{value}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("bucketId", "abc").is_ok());
        assert!(matches!(
            require("bucketId", ""),
            Err(Error::InvalidInput(msg)) if msg.contains("bucketId")
        ));
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("n", 1, 1, 10).is_ok());
        assert!(check_range("n", 10, 1, 10).is_ok());
        assert!(check_range("n", 0, 1, 10).is_err());
        assert!(check_range("n", 11, 1, 10).is_err());
    }

    #[test]
    fn test_check_sha1() {
        assert!(check_sha1("sha1", "a9993e364706816aba3e25717850c26c9cd0d89d").is_ok());
        assert!(check_sha1("sha1", "A9993E364706816ABA3E25717850C26C9CD0D89D").is_ok());
        assert!(check_sha1("sha1", "a9993e").is_err());
        assert!(check_sha1("sha1", "zz993e364706816aba3e25717850c26c9cd0d89d").is_err());
    }
}
