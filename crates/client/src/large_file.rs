//! Large file calls
//!
//! A large file is started, filled part by part with
//! [`upload_part`](B2Client::upload_part) or [`copy_part`](B2Client::copy_part),
//! then finished with the SHA-1 of every part in order. Splitting the
//! content is up to the caller.

use b2_core::{
    CancelLargeFile, CancelledLargeFile, FileInfo, FinishLargeFile, GetUploadPartUrl, ListParts,
    ListUnfinishedLargeFiles, PartListing, Result, StartLargeFile, UnfinishedLargeFiles,
    UploadPartGrant,
};

use crate::client::B2Client;

impl B2Client {
    /// Start a large file (`b2_start_large_file`)
    pub async fn start_large_file(&self, params: &StartLargeFile) -> Result<FileInfo> {
        let file: FileInfo = self.post("b2_start_large_file", params).await?;
        tracing::debug!(file_name = %file.file_name, file_id = ?file.file_id, "Started large file");
        Ok(file)
    }

    /// Abandon an unfinished large file and drop its parts
    pub async fn cancel_large_file(&self, file_id: &str) -> Result<CancelledLargeFile> {
        let params = CancelLargeFile {
            file_id: file_id.to_string(),
        };
        self.post("b2_cancel_large_file", &params).await
    }

    /// Fetch an upload grant for the parts of one large file
    pub async fn get_upload_part_url(&self, file_id: &str) -> Result<UploadPartGrant> {
        let params = GetUploadPartUrl {
            file_id: file_id.to_string(),
        };
        self.post("b2_get_upload_part_url", &params).await
    }

    /// Assemble the uploaded parts into the final file (`b2_finish_large_file`)
    pub async fn finish_large_file(&self, params: &FinishLargeFile) -> Result<FileInfo> {
        self.post("b2_finish_large_file", params).await
    }

    pub async fn list_parts(&self, params: &ListParts) -> Result<PartListing> {
        self.post("b2_list_parts", params).await
    }

    pub async fn list_unfinished_large_files(
        &self,
        params: &ListUnfinishedLargeFiles,
    ) -> Result<UnfinishedLargeFiles> {
        self.post("b2_list_unfinished_large_files", params).await
    }
}
