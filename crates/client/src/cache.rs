//! In-process key/value cache
//!
//! Useful when a single long-lived process wants `authorize_with_cache`
//! semantics without an external store. Entries expire after their TTL. An
//! expired entry is dropped when it is read or when any key is written.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use b2_core::{Error, KvCache, Result};
use jiff::Timestamp;
use tokio::sync::Mutex;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Timestamp,
}

/// A [`KvCache`] backed by a map in memory
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Timestamp::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KvCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Timestamp::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let now = Timestamp::now();
        let expires_at = now
            .checked_add(ttl)
            .map_err(|e| Error::Cache(format!("invalid ttl {ttl:?}: {e}")))?;
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(key.to_string(), Entry { value, expires_at });
        Ok(())
    }
}
