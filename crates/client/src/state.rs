//! Authorization state held by a client instance
//!
//! Two slots: the account-level grant from the last login and the most
//! recently issued upload grant. Each slot is replaced as a whole under a
//! write lock, so concurrent callers never observe a half-written grant.
//! Locks are only held for the copy in or out, never across a remote call;
//! concurrent replacements still resolve as last-writer-wins.

use b2_core::{AuthorizationGrant, Error, Result, UploadGrant};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub(crate) struct AuthState {
    grant: RwLock<Option<AuthorizationGrant>>,
    upload: RwLock<Option<UploadGrant>>,
}

impl AuthState {
    /// Replace the account grant
    pub async fn set_grant(&self, grant: AuthorizationGrant) {
        *self.grant.write().await = Some(grant);
    }

    /// Copy of the account grant, failing fast if none was established
    pub async fn grant(&self) -> Result<AuthorizationGrant> {
        self.grant.read().await.clone().ok_or_else(|| {
            Error::Auth("No authorization token found, call authorize() first".into())
        })
    }

    /// Whether an account grant is held
    pub async fn is_authorized(&self) -> bool {
        self.grant.read().await.is_some()
    }

    /// Replace the upload grant
    pub async fn set_upload_grant(&self, grant: UploadGrant) {
        *self.upload.write().await = Some(grant);
    }

    /// Copy of the upload grant, failing fast if none was fetched
    pub async fn upload_grant(&self) -> Result<UploadGrant> {
        self.upload.read().await.clone().ok_or_else(|| {
            Error::Precondition("No upload URL found, call get_upload_url() first".into())
        })
    }

    /// Drop both grants
    pub async fn clear(&self) {
        *self.grant.write().await = None;
        *self.upload.write().await = None;
    }
}
