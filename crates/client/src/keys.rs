//! Application key management

use b2_core::{ApplicationKey, CreateKey, DeleteKey, KeyList, ListKeys, Result};

use crate::client::B2Client;

impl B2Client {
    /// Create an application key (`b2_create_key`)
    ///
    /// The secret is only present in this reply; it cannot be fetched later.
    pub async fn create_key(&self, params: &CreateKey) -> Result<ApplicationKey> {
        let key: ApplicationKey = self.post_for_account("b2_create_key", params).await?;
        tracing::info!(key_name = %key.key_name, key_id = %key.application_key_id, "Created application key");
        Ok(key)
    }

    pub async fn delete_key(&self, application_key_id: &str) -> Result<ApplicationKey> {
        let params = DeleteKey {
            application_key_id: application_key_id.to_string(),
        };
        self.post("b2_delete_key", &params).await
    }

    /// List application keys of the account (`b2_list_keys`)
    pub async fn list_keys(&self, params: &ListKeys) -> Result<KeyList> {
        self.post_for_account("b2_list_keys", params).await
    }
}
