//! B2 client and account authorization
//!
//! [`B2Client`] owns the account credentials, the authorization state and
//! the dispatcher. Operations are spread over several modules as separate
//! `impl B2Client` blocks; this one holds construction and login.

use std::sync::Arc;
use std::time::Duration;

use b2_core::{
    AuthorizationGrant, ClientConfig, Config, ContentHasher, Credentials, HttpRequest, KvCache,
    Result, Transport, Validate,
};
use base64::Engine;
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::dispatch::{Dispatcher, decode};
use crate::hash::Sha1Hasher;
use crate::state::AuthState;
use crate::transport::ReqwestTransport;

/// Key under which the authorization snapshot is cached
pub const AUTH_CACHE_KEY: &str = "_b2Details";

/// Lifetime of a cached authorization snapshot
///
/// Account tokens are valid for 24 hours; the snapshot is dropped after 20.
pub const AUTH_CACHE_TTL: Duration = Duration::from_secs(72_000);

/// Client for the B2 native API
pub struct B2Client {
    credentials: Credentials,
    config: ClientConfig,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) hasher: Arc<dyn ContentHasher>,
    pub(crate) state: AuthState,
}

/// Builder for [`B2Client`]
pub struct B2ClientBuilder {
    credentials: Credentials,
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    hasher: Option<Arc<dyn ContentHasher>>,
}

impl B2ClientBuilder {
    /// Replace the client settings
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom transport instead of the reqwest default
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom content hasher instead of SHA-1
    pub fn hasher(mut self, hasher: Arc<dyn ContentHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Validate the configuration and build the client
    pub fn build(self) -> Result<B2Client> {
        self.credentials.validate()?;
        let config = self.config.validate()?;

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let hasher = self.hasher.unwrap_or_else(|| Arc::new(Sha1Hasher));

        Ok(B2Client {
            credentials: self.credentials,
            dispatcher: Dispatcher::new(transport, config.api_version.clone()),
            config,
            hasher,
            state: AuthState::default(),
        })
    }
}

impl B2Client {
    /// Create a client with default settings
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Create a client from a loaded configuration
    pub fn from_config(config: Config) -> Result<Self> {
        Self::builder(config.credentials).config(config.client).build()
    }

    /// Start building a client
    pub fn builder(credentials: Credentials) -> B2ClientBuilder {
        B2ClientBuilder {
            credentials,
            config: ClientConfig::default(),
            transport: None,
            hasher: None,
        }
    }

    /// Client settings in effect
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Application key ID this client logs in with
    pub fn key_id(&self) -> &str {
        &self.credentials.application_key_id
    }

    /// Copy of the live account grant
    pub async fn authorization(&self) -> Result<AuthorizationGrant> {
        self.state.grant().await
    }

    /// Whether a login has succeeded (or a cached grant was installed)
    pub async fn is_authorized(&self) -> bool {
        self.state.is_authorized().await
    }

    /// Forget the account grant and the upload grant
    pub async fn clear_authorization(&self) {
        self.state.clear().await;
    }

    fn basic_auth(&self) -> String {
        let pair = format!(
            "{}:{}",
            self.credentials.application_key_id, self.credentials.application_key
        );
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(pair)
        )
    }

    /// Log in with the account credentials (`b2_authorize_account`)
    ///
    /// Replaces any previous grant. Exactly one request is made; a failure
    /// is returned as-is without retrying.
    pub async fn authorize(&self) -> Result<AuthorizationGrant> {
        let url = self
            .dispatcher
            .endpoint(&self.config.api_base, "b2_authorize_account");
        let request = HttpRequest::new(Method::GET, url).header("Authorization", self.basic_auth());

        let response = self.dispatcher.execute(request).await?;
        let grant: AuthorizationGrant = decode(&response)?;

        tracing::info!(
            account_id = %grant.account_id,
            api_url = %grant.api_url,
            "Authorized account"
        );
        self.state.set_grant(grant.clone()).await;
        Ok(grant)
    }

    /// Log in, reusing a snapshot persisted in `cache` when one exists
    ///
    /// On a cache hit no request is made and the snapshot becomes the live
    /// grant. On a miss this calls [`authorize`](Self::authorize) and stores
    /// the new grant for [`AUTH_CACHE_TTL`]. A snapshot that cannot be
    /// decoded counts as a miss and is overwritten. Concurrent misses may
    /// each log in; nothing coordinates them.
    pub async fn authorize_with_cache<C>(&self, cache: &C) -> Result<AuthorizationGrant>
    where
        C: KvCache + ?Sized,
    {
        if let Some(snapshot) = cache.get(AUTH_CACHE_KEY).await? {
            match serde_json::from_str::<AuthorizationGrant>(&snapshot) {
                Ok(grant) => {
                    tracing::info!(account_id = %grant.account_id, "Using cached authorization");
                    self.state.set_grant(grant.clone()).await;
                    return Ok(grant);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding undecodable cached authorization");
                }
            }
        } else {
            tracing::debug!("No cached authorization");
        }

        let grant = self.authorize().await?;
        let snapshot = serde_json::to_string(&grant)?;
        cache.put(AUTH_CACHE_KEY, snapshot, AUTH_CACHE_TTL).await?;
        Ok(grant)
    }

    /// POST an account-authenticated JSON call after validating `params`
    pub(crate) async fn post<P, R>(&self, operation: &str, params: &P) -> Result<R>
    where
        P: Serialize + Validate,
        R: DeserializeOwned,
    {
        params.validate()?;
        let grant = self.state.grant().await?;
        let url = self.dispatcher.endpoint(&grant.api_url, operation);
        self.dispatcher
            .call(Method::POST, url, &grant.authorization_token, Some(params))
            .await
    }

    /// Like [`post`](Self::post), adding the account ID from the live grant
    pub(crate) async fn post_for_account<P, R>(&self, operation: &str, params: &P) -> Result<R>
    where
        P: Serialize + Validate,
        R: DeserializeOwned,
    {
        params.validate()?;
        let grant = self.state.grant().await?;
        let url = self.dispatcher.endpoint(&grant.api_url, operation);
        let body = AccountScoped {
            account_id: &grant.account_id,
            params,
        };
        self.dispatcher
            .call(Method::POST, url, &grant.authorization_token, Some(&body))
            .await
    }
}

/// Request body carrying the account ID next to the operation parameters
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountScoped<'a, P> {
    account_id: &'a str,
    #[serde(flatten)]
    params: &'a P,
}
