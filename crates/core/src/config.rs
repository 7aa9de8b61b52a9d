//! Client configuration
//!
//! Credentials have no defaults and must always be supplied. Everything else
//! falls back to the production B2 endpoints. Configuration can be built in
//! code, read from the environment, or parsed from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default discovery endpoint used by `b2_authorize_account`
pub const DEFAULT_API_BASE: &str = "https://api.backblazeb2.com";

/// API version segment inserted between the base URL and the operation name
pub const DEFAULT_API_VERSION: &str = "/b2api/v2";

/// Environment variable holding the application key ID
pub const ENV_KEY_ID: &str = "B2_APPLICATION_KEY_ID";

/// Environment variable holding the application key
pub const ENV_KEY: &str = "B2_APPLICATION_KEY";

/// Account credentials: an application key ID and its secret key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application key identifier
    pub application_key_id: String,

    /// Secret application key
    pub application_key: String,
}

impl Credentials {
    /// Create credentials, rejecting empty values
    pub fn new(key_id: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let creds = Self {
            application_key_id: key_id.into(),
            application_key: key.into(),
        };
        creds.validate()?;
        Ok(creds)
    }

    /// Read credentials from `B2_APPLICATION_KEY_ID` / `B2_APPLICATION_KEY`
    pub fn from_env() -> Result<Self> {
        let key_id = std::env::var(ENV_KEY_ID)
            .map_err(|_| Error::Config(format!("{ENV_KEY_ID} is not set")))?;
        let key =
            std::env::var(ENV_KEY).map_err(|_| Error::Config(format!("{ENV_KEY} is not set")))?;
        Self::new(key_id, key)
    }

    /// Check that both values are present
    pub fn validate(&self) -> Result<()> {
        if self.application_key_id.trim().is_empty() {
            return Err(Error::Config("application key ID is required".into()));
        }
        if self.application_key.trim().is_empty() {
            return Err(Error::Config("application key is required".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("application_key_id", &self.application_key_id)
            .field("application_key", &"<redacted>")
            .finish()
    }
}

/// Retry configuration for [`retry_with_backoff`](crate::retry_with_backoff)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,

    /// Backoff before the second attempt, in milliseconds
    pub initial_backoff_ms: u64,

    /// Upper bound for a single backoff, in milliseconds
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10000,
        }
    }
}

/// Client settings other than credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Discovery endpoint for account authorization
    pub api_base: String,

    /// Version segment prefixed to every operation path
    pub api_version: String,

    /// Caller-side retry settings
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Validate URLs and normalize trailing/leading slashes
    pub fn validate(mut self) -> Result<Self> {
        url::Url::parse(&self.api_base)
            .map_err(|e| Error::Config(format!("invalid api_base '{}': {e}", self.api_base)))?;
        self.api_base = self.api_base.trim_end_matches('/').to_string();

        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            return Err(Error::Config("api_version must not be empty".into()));
        }
        self.api_version = format!("/{version}");

        if self.retry.max_attempts == 0 {
            return Err(Error::Config("retry.max_attempts must be at least 1".into()));
        }
        if self.retry.initial_backoff_ms > self.retry.max_backoff_ms {
            return Err(Error::Config(format!(
                "retry.initial_backoff_ms ({}) exceeds retry.max_backoff_ms ({})",
                self.retry.initial_backoff_ms, self.retry.max_backoff_ms
            )));
        }
        Ok(self)
    }
}

/// Full configuration as read from a TOML document
///
/// ```toml
/// api_base = "https://api.backblazeb2.com"
///
/// [credentials]
/// application_key_id = "0012ab..."
/// application_key = "K001..."
///
/// [retry]
/// max_attempts = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Account credentials
    pub credentials: Credentials,

    /// Remaining client settings
    #[serde(flatten)]
    pub client: ClientConfig,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(s).map_err(|e| Error::Config(format!("invalid config: {e}")))?;
        config.credentials.validate()?;
        Ok(Self {
            credentials: config.credentials,
            client: config.client.validate()?,
        })
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }
}
