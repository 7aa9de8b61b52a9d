//! Application key types

use serde::{Deserialize, Serialize};

use super::{Validate, check_range, require};
use crate::error::{Error, Result};

/// A capability that can be granted to an application key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    ListKeys,
    WriteKeys,
    DeleteKeys,
    ListBuckets,
    ListAllBucketNames,
    ReadBuckets,
    WriteBuckets,
    DeleteBuckets,
    ReadBucketRetentions,
    WriteBucketRetentions,
    ReadBucketEncryption,
    WriteBucketEncryption,
    ListFiles,
    ReadFiles,
    ShareFiles,
    WriteFiles,
    DeleteFiles,
    ReadFileLegalHolds,
    WriteFileLegalHolds,
    ReadFileRetentions,
    WriteFileRetentions,
    BypassGovernance,
}

impl Capability {
    /// Wire name of the capability
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ListKeys => "listKeys",
            Capability::WriteKeys => "writeKeys",
            Capability::DeleteKeys => "deleteKeys",
            Capability::ListBuckets => "listBuckets",
            Capability::ListAllBucketNames => "listAllBucketNames",
            Capability::ReadBuckets => "readBuckets",
            Capability::WriteBuckets => "writeBuckets",
            Capability::DeleteBuckets => "deleteBuckets",
            Capability::ReadBucketRetentions => "readBucketRetentions",
            Capability::WriteBucketRetentions => "writeBucketRetentions",
            Capability::ReadBucketEncryption => "readBucketEncryption",
            Capability::WriteBucketEncryption => "writeBucketEncryption",
            Capability::ListFiles => "listFiles",
            Capability::ReadFiles => "readFiles",
            Capability::ShareFiles => "shareFiles",
            Capability::WriteFiles => "writeFiles",
            Capability::DeleteFiles => "deleteFiles",
            Capability::ReadFileLegalHolds => "readFileLegalHolds",
            Capability::WriteFileLegalHolds => "writeFileLegalHolds",
            Capability::ReadFileRetentions => "readFileRetentions",
            Capability::WriteFileRetentions => "writeFileRetentions",
            Capability::BypassGovernance => "bypassGovernance",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for `b2_create_key`
///
/// The account ID is taken from the live authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKey {
    pub capabilities: Vec<Capability>,
    pub key_name: String,
    /// Lifetime, up to 1000 days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_duration_in_seconds: Option<u64>,
    /// Restrict the key to one bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<String>,
    /// Restrict the key to names with this prefix; requires `bucket_id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
}

impl CreateKey {
    pub fn new(key_name: impl Into<String>, capabilities: Vec<Capability>) -> Self {
        Self {
            capabilities,
            key_name: key_name.into(),
            valid_duration_in_seconds: None,
            bucket_id: None,
            name_prefix: None,
        }
    }
}

impl Validate for CreateKey {
    fn validate(&self) -> Result<()> {
        require("keyName", &self.key_name)?;
        if self.key_name.len() > 100
            || !self
                .key_name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err(Error::InvalidInput(format!(
                "keyName must be at most 100 letters, digits or '-', got '{}'",
                self.key_name
            )));
        }
        if self.capabilities.is_empty() {
            return Err(Error::InvalidInput(
                "at least one capability is required".into(),
            ));
        }
        if let Some(secs) = self.valid_duration_in_seconds {
            check_range("validDurationInSeconds", secs, 1, 86_400_000)?;
        }
        if self.name_prefix.is_some() && self.bucket_id.is_none() {
            return Err(Error::InvalidInput("namePrefix requires bucketId".into()));
        }
        Ok(())
    }
}

/// An application key as described by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationKey {
    pub key_name: String,
    pub application_key_id: String,
    /// Secret, only returned by `b2_create_key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    pub account_id: String,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub expiration_timestamp: Option<i64>,
    #[serde(default)]
    pub bucket_id: Option<String>,
    #[serde(default)]
    pub name_prefix: Option<String>,
}

/// Parameters for `b2_delete_key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteKey {
    pub application_key_id: String,
}

impl Validate for DeleteKey {
    fn validate(&self) -> Result<()> {
        require("applicationKeyId", &self.application_key_id)
    }
}

/// Parameters for `b2_list_keys`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_key_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_application_key_id: Option<String>,
}

impl Validate for ListKeys {
    fn validate(&self) -> Result<()> {
        if let Some(count) = self.max_key_count {
            check_range("maxKeyCount", count.into(), 1, 10_000)?;
        }
        Ok(())
    }
}

/// One page of `b2_list_keys`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyList {
    pub keys: Vec<ApplicationKey>,
    #[serde(default)]
    pub next_application_key_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_wire_names() {
        let json = serde_json::to_string(&vec![
            Capability::ListFiles,
            Capability::WriteBucketEncryption,
        ])
        .unwrap();
        assert_eq!(json, r#"["listFiles","writeBucketEncryption"]"#);
        assert_eq!(Capability::ListAllBucketNames.to_string(), "listAllBucketNames");
    }

    #[test]
    fn test_create_key_validation() {
        let key = CreateKey::new("uploader", vec![Capability::WriteFiles]);
        assert!(key.validate().is_ok());

        assert!(CreateKey::new("uploader", vec![]).validate().is_err());
        assert!(CreateKey::new("bad key", vec![Capability::ReadFiles])
            .validate()
            .is_err());

        let mut prefixed = CreateKey::new("uploader", vec![Capability::WriteFiles]);
        prefixed.name_prefix = Some("photos/".into());
        assert!(prefixed.validate().is_err());
        prefixed.bucket_id = Some("bucket".into());
        assert!(prefixed.validate().is_ok());
    }

    #[test]
    fn test_application_key_secret_optional() {
        let json = r#"{
            "keyName": "uploader",
            "applicationKeyId": "key1",
            "capabilities": ["writeFiles"],
            "accountId": "acct",
            "expirationTimestamp": null,
            "bucketId": null,
            "namePrefix": null
        }"#;
        let key: ApplicationKey = serde_json::from_str(json).unwrap();
        assert!(key.application_key.is_none());
        assert_eq!(key.capabilities, vec!["writeFiles".to_string()]);
    }
}
