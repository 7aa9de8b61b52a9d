//! File operations

use b2_core::{
    CopyFile, CopyPart, DeleteFileVersion, DeletedFileVersion, FileInfo, FileNameListing,
    FileVersionListing, GetFileInfo, HideFile, LegalHoldUpdate, ListFileNames, ListFileVersions,
    PartInfo, Result, RetentionUpdate, UpdateFileLegalHold, UpdateFileRetention,
};

use crate::client::B2Client;

impl B2Client {
    /// Copy an existing file to a new name (`b2_copy_file`)
    pub async fn copy_file(&self, params: &CopyFile) -> Result<FileInfo> {
        self.post("b2_copy_file", params).await
    }

    /// Copy a range of an existing file into a large file part (`b2_copy_part`)
    pub async fn copy_part(&self, params: &CopyPart) -> Result<PartInfo> {
        self.post("b2_copy_part", params).await
    }

    /// List the latest version of each file (`b2_list_file_names`)
    ///
    /// Pass `next_file_name` from the reply as `start_file_name` to continue.
    pub async fn list_file_names(&self, params: &ListFileNames) -> Result<FileNameListing> {
        self.post("b2_list_file_names", params).await
    }

    /// List every version of every file (`b2_list_file_versions`)
    pub async fn list_file_versions(
        &self,
        params: &ListFileVersions,
    ) -> Result<FileVersionListing> {
        self.post("b2_list_file_versions", params).await
    }

    pub async fn get_file_info(&self, file_id: &str) -> Result<FileInfo> {
        let params = GetFileInfo {
            file_id: file_id.to_string(),
        };
        self.post("b2_get_file_info", &params).await
    }

    /// Hide a file so it no longer appears in name listings (`b2_hide_file`)
    pub async fn hide_file(&self, params: &HideFile) -> Result<FileInfo> {
        self.post("b2_hide_file", params).await
    }

    pub async fn delete_file_version(
        &self,
        params: &DeleteFileVersion,
    ) -> Result<DeletedFileVersion> {
        self.post("b2_delete_file_version", params).await
    }

    pub async fn update_file_legal_hold(
        &self,
        params: &UpdateFileLegalHold,
    ) -> Result<LegalHoldUpdate> {
        self.post("b2_update_file_legal_hold", params).await
    }

    pub async fn update_file_retention(
        &self,
        params: &UpdateFileRetention,
    ) -> Result<RetentionUpdate> {
        self.post("b2_update_file_retention", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, authorized_client, client, expect_operation};
    use b2_core::{
        Error, FileAction, FileRetention, HttpResponse, LegalHold, MetadataDirective,
        RetentionMode,
    };

    const FILE_JSON: &str = r#"{
        "accountId": "acct123",
        "action": "upload",
        "bucketId": "bucket1",
        "contentLength": 3,
        "contentSha1": "a9993e364706816aba3e25717850c26c9cd0d89d",
        "contentType": "text/plain",
        "fileId": "4_z_copy",
        "fileInfo": {},
        "fileName": "copy.txt",
        "uploadTimestamp": 1700000000000
    }"#;

    #[tokio::test]
    async fn test_copy_file() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.url.ends_with("/b2api/v2/b2_copy_file")
                    && serde_json::from_slice::<serde_json::Value>(&req.body).ok()
                        == Some(serde_json::json!({
                            "sourceFileId": "4_z_source",
                            "fileName": "copy.txt",
                            "metadataDirective": "REPLACE",
                            "contentType": "text/plain"
                        }))
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, FILE_JSON)));

        let client = authorized_client(transport).await;
        let mut params = CopyFile::new("4_z_source", "copy.txt");
        params.metadata_directive = Some(MetadataDirective::Replace);
        params.content_type = Some("text/plain".into());

        let file = client.copy_file(&params).await.unwrap();
        assert_eq!(file.file_id.as_deref(), Some("4_z_copy"));
        assert_eq!(file.action, FileAction::Upload);
    }

    #[tokio::test]
    async fn test_copy_file_invalid_params_make_no_request() {
        let client = authorized_client(MockTransport::new()).await;
        let mut params = CopyFile::new("4_z_source", "copy.txt");
        params.content_type = Some("text/plain".into());

        let err = client.copy_file(&params).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_copy_part() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_copy_part",
            200,
            r#"{"fileId":"large1","partNumber":1,"contentLength":3,"contentSha1":"a9993e364706816aba3e25717850c26c9cd0d89d"}"#,
        );

        let client = authorized_client(transport).await;
        let part = client
            .copy_part(&CopyPart::new("4_z_source", "large1", 1))
            .await
            .unwrap();
        assert_eq!(part.part_number, 1);
        assert_eq!(part.content_length, 3);
    }

    #[tokio::test]
    async fn test_list_file_names() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.url.ends_with("/b2_list_file_names")
                    && serde_json::from_slice::<serde_json::Value>(&req.body).ok()
                        == Some(serde_json::json!({
                            "bucketId": "bucket1",
                            "prefix": "docs/",
                            "delimiter": "/",
                            "maxFileCount": 100
                        }))
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"{
                        "files": [
                            {"action":"upload","fileName":"docs/a.txt","fileId":"4_z_a","contentLength":1},
                            {"action":"folder","fileName":"docs/sub/","fileId":null,"contentLength":0}
                        ],
                        "nextFileName": "docs/b.txt"
                    }"#,
                ))
            });

        let client = authorized_client(transport).await;
        let params = ListFileNames::new("bucket1")
            .prefix("docs/")
            .delimiter("/")
            .max_file_count(100);
        let listing = client.list_file_names(&params).await.unwrap();

        assert_eq!(listing.files.len(), 2);
        assert_eq!(listing.files[1].action, FileAction::Folder);
        assert_eq!(listing.next_file_name.as_deref(), Some("docs/b.txt"));
    }

    #[tokio::test]
    async fn test_list_file_names_requires_authorization() {
        let client = client(MockTransport::new());
        let err = client
            .list_file_names(&ListFileNames::new("bucket1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[tokio::test]
    async fn test_list_file_versions() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_list_file_versions",
            200,
            r#"{"files":[],"nextFileName":"b.txt","nextFileId":"4_z_b"}"#,
        );

        let client = authorized_client(transport).await;
        let listing = client
            .list_file_versions(&ListFileVersions::new("bucket1"))
            .await
            .unwrap();
        assert!(listing.files.is_empty());
        assert_eq!(listing.next_file_id.as_deref(), Some("4_z_b"));
    }

    #[tokio::test]
    async fn test_get_file_info() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.url.ends_with("/b2_get_file_info")
                    && req.body.as_ref() == br#"{"fileId":"4_z_copy"}"#
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, FILE_JSON)));

        let client = authorized_client(transport).await;
        let file = client.get_file_info("4_z_copy").await.unwrap();
        assert_eq!(file.file_name, "copy.txt");
    }

    #[tokio::test]
    async fn test_get_file_info_not_found() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_get_file_info",
            404,
            r#"{"code":"not_found","message":"File not present: 4_z_gone","status":404}"#,
        );

        let client = authorized_client(transport).await;
        let err = client.get_file_info("4_z_gone").await.unwrap_err();
        assert_eq!(err.code(), Some("not_found"));
        assert_eq!(err.status(), Some(404));
        assert!(!b2_core::is_retryable_error(&err));
    }

    #[tokio::test]
    async fn test_hide_file() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_hide_file",
            200,
            r#"{"action":"hide","fileName":"old.txt","fileId":"4_z_hide","contentLength":0}"#,
        );

        let client = authorized_client(transport).await;
        let file = client
            .hide_file(&HideFile {
                bucket_id: "bucket1".into(),
                file_name: "old.txt".into(),
            })
            .await
            .unwrap();
        assert_eq!(file.action, FileAction::Hide);
    }

    #[tokio::test]
    async fn test_delete_file_version() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_delete_file_version",
            200,
            r#"{"fileId":"4_z_old","fileName":"old.txt"}"#,
        );

        let client = authorized_client(transport).await;
        let deleted = client
            .delete_file_version(&DeleteFileVersion {
                file_name: "old.txt".into(),
                file_id: "4_z_old".into(),
                bypass_governance: None,
            })
            .await
            .unwrap();
        assert_eq!(deleted.file_id, "4_z_old");
    }

    #[tokio::test]
    async fn test_update_file_legal_hold() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_update_file_legal_hold",
            200,
            r#"{"fileId":"4_z_a","fileName":"a.txt","legalHold":"on"}"#,
        );

        let client = authorized_client(transport).await;
        let update = client
            .update_file_legal_hold(&UpdateFileLegalHold {
                file_name: "a.txt".into(),
                file_id: "4_z_a".into(),
                legal_hold: LegalHold::On,
            })
            .await
            .unwrap();
        assert_eq!(update.legal_hold, Some(LegalHold::On));
    }

    #[tokio::test]
    async fn test_update_file_retention() {
        let mut transport = MockTransport::new();
        expect_operation(
            &mut transport,
            "b2_update_file_retention",
            200,
            r#"{"fileId":"4_z_a","fileName":"a.txt","fileRetention":{"mode":"governance","retainUntilTimestamp":1800000000000}}"#,
        );

        let client = authorized_client(transport).await;
        let update = client
            .update_file_retention(&UpdateFileRetention {
                file_name: "a.txt".into(),
                file_id: "4_z_a".into(),
                file_retention: FileRetention {
                    mode: Some(RetentionMode::Governance),
                    retain_until_timestamp: Some(1_800_000_000_000),
                },
                bypass_governance: None,
            })
            .await
            .unwrap();
        assert_eq!(update.file_retention.mode, Some(RetentionMode::Governance));
    }
}
