//! Bucket operations
//!
//! Every bucket call is scoped to the account of the live authorization;
//! the account ID is filled in from the grant.

use b2_core::{Bucket, BucketList, CreateBucket, DeleteBucket, ListBuckets, Result, UpdateBucket};

use crate::client::B2Client;

impl B2Client {
    /// List buckets, optionally filtered by ID, name or type (`b2_list_buckets`)
    pub async fn list_buckets(&self, params: &ListBuckets) -> Result<BucketList> {
        self.post_for_account("b2_list_buckets", params).await
    }

    /// Create a bucket (`b2_create_bucket`)
    pub async fn create_bucket(&self, params: &CreateBucket) -> Result<Bucket> {
        let bucket: Bucket = self.post_for_account("b2_create_bucket", params).await?;
        tracing::info!(bucket = %bucket.bucket_name, bucket_id = %bucket.bucket_id, "Created bucket");
        Ok(bucket)
    }

    /// Change a bucket's type, info or lifecycle rules (`b2_update_bucket`)
    pub async fn update_bucket(&self, params: &UpdateBucket) -> Result<Bucket> {
        self.post_for_account("b2_update_bucket", params).await
    }

    /// Delete an empty bucket, returning its final description
    pub async fn delete_bucket(&self, bucket_id: &str) -> Result<Bucket> {
        let params = DeleteBucket {
            bucket_id: bucket_id.to_string(),
        };
        let bucket: Bucket = self.post_for_account("b2_delete_bucket", &params).await?;
        tracing::info!(bucket = %bucket.bucket_name, "Deleted bucket");
        Ok(bucket)
    }
}
