//! Bucket request and response types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Validate, require};
use crate::error::{Error, Result};

/// Bucket visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketType {
    /// Anyone can download files
    AllPublic,
    /// Downloads require authorization
    AllPrivate,
    /// Bucket holding snapshot files
    Snapshot,
    /// Shared via a cross-account policy
    Shared,
    /// Restricted bucket
    Restricted,
}

impl std::fmt::Display for BucketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketType::AllPublic => write!(f, "allPublic"),
            BucketType::AllPrivate => write!(f, "allPrivate"),
            BucketType::Snapshot => write!(f, "snapshot"),
            BucketType::Shared => write!(f, "shared"),
            BucketType::Restricted => write!(f, "restricted"),
        }
    }
}

impl std::str::FromStr for BucketType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "allPublic" => Ok(BucketType::AllPublic),
            "allPrivate" => Ok(BucketType::AllPrivate),
            "snapshot" => Ok(BucketType::Snapshot),
            "shared" => Ok(BucketType::Shared),
            "restricted" => Ok(BucketType::Restricted),
            _ => Err(format!("Invalid bucket type: {s}")),
        }
    }
}

/// Automatic hide/delete rule for files under a prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRule {
    pub file_name_prefix: String,
    pub days_from_uploading_to_hiding: Option<u32>,
    pub days_from_hiding_to_deleting: Option<u32>,
}

/// A bucket as described by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub account_id: String,
    pub bucket_id: String,
    pub bucket_name: String,
    pub bucket_type: BucketType,
    #[serde(default)]
    pub bucket_info: BTreeMap<String, String>,
    #[serde(default)]
    pub lifecycle_rules: Vec<LifecycleRule>,
    #[serde(default)]
    pub options: Vec<String>,
    /// Incremented on every update
    #[serde(default)]
    pub revision: u64,
}

/// Parameters for `b2_list_buckets`
///
/// The account ID is taken from the live authorization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBuckets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_types: Option<Vec<BucketType>>,
}

impl Validate for ListBuckets {
    fn validate(&self) -> Result<()> {
        if let Some(types) = &self.bucket_types
            && types.is_empty()
        {
            return Err(Error::InvalidInput(
                "bucketTypes must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

/// Result of `b2_list_buckets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketList {
    pub buckets: Vec<Bucket>,
}

/// Parameters for `b2_create_bucket`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucket {
    pub bucket_name: String,
    pub bucket_type: BucketType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_info: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_rules: Option<Vec<LifecycleRule>>,
}

impl CreateBucket {
    pub fn new(bucket_name: impl Into<String>, bucket_type: BucketType) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            bucket_type,
            bucket_info: None,
            lifecycle_rules: None,
        }
    }
}

impl Validate for CreateBucket {
    fn validate(&self) -> Result<()> {
        let name = &self.bucket_name;
        if !(6..=63).contains(&name.len()) {
            return Err(Error::InvalidInput(format!(
                "bucketName must be 6 to 63 characters, got '{name}'"
            )));
        }
        if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
            return Err(Error::InvalidInput(format!(
                "bucketName may only contain letters, digits and '-', got '{name}'"
            )));
        }
        if name.to_ascii_lowercase().starts_with("b2-") {
            return Err(Error::InvalidInput(
                "bucketName must not start with 'b2-'".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters for `b2_update_bucket`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBucket {
    pub bucket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_type: Option<BucketType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_info: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_rules: Option<Vec<LifecycleRule>>,
    /// Only apply if the bucket is still at this revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_revision_is: Option<u64>,
}

impl Validate for UpdateBucket {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)
    }
}

/// Parameters for `b2_delete_bucket`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBucket {
    pub bucket_id: String,
}

impl Validate for DeleteBucket {
    fn validate(&self) -> Result<()> {
        require("bucketId", &self.bucket_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_type_display() {
        assert_eq!(BucketType::AllPublic.to_string(), "allPublic");
        assert_eq!(BucketType::AllPrivate.to_string(), "allPrivate");
    }

    #[test]
    fn test_bucket_type_from_str() {
        assert_eq!(
            "allPrivate".parse::<BucketType>().unwrap(),
            BucketType::AllPrivate
        );
        assert!("private".parse::<BucketType>().is_err());
    }

    #[test]
    fn test_bucket_deserialize() {
        let json = r#"{
            "accountId": "acct",
            "bucketId": "b1",
            "bucketName": "my-bucket",
            "bucketType": "allPrivate",
            "bucketInfo": {},
            "lifecycleRules": [
                {"fileNamePrefix": "logs/", "daysFromUploadingToHiding": 30, "daysFromHidingToDeleting": 1}
            ],
            "revision": 3
        }"#;
        let bucket: Bucket = serde_json::from_str(json).unwrap();
        assert_eq!(bucket.bucket_type, BucketType::AllPrivate);
        assert_eq!(bucket.lifecycle_rules.len(), 1);
        assert_eq!(bucket.lifecycle_rules[0].days_from_uploading_to_hiding, Some(30));
        assert_eq!(bucket.revision, 3);
    }

    #[test]
    fn test_create_bucket_validation() {
        assert!(CreateBucket::new("my-bucket", BucketType::AllPrivate)
            .validate()
            .is_ok());
        assert!(CreateBucket::new("short", BucketType::AllPrivate)
            .validate()
            .is_err());
        assert!(CreateBucket::new("bad_name!", BucketType::AllPrivate)
            .validate()
            .is_err());
        assert!(CreateBucket::new("b2-reserved", BucketType::AllPrivate)
            .validate()
            .is_err());
    }

    #[test]
    fn test_list_buckets_serializes_only_set_fields() {
        let params = ListBuckets {
            bucket_name: Some("my-bucket".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"bucketName": "my-bucket"}));
    }
}
