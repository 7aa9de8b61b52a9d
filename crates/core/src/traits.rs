//! Collaborator traits
//!
//! The client talks to the outside world through three seams: a
//! [`Transport`] that performs HTTP requests, a [`ContentHasher`] that
//! fingerprints upload bodies, and a [`KvCache`] that persists the account
//! authorization between process invocations. Implementations live in the
//! client crate; tests substitute mocks.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;

use crate::error::{Result, TransportError};

/// A single HTTP request as issued by the dispatcher
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpRequest {
    /// Create a request with no headers and an empty body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response as returned by a [`Transport`]
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Create a response with the given status and body
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Whether the status signals a failure
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Issues HTTP requests
///
/// Implementations return `Ok` for every response the server sent, whatever
/// its status; `Err` is reserved for failures where no response arrived.
/// Timeouts and connection reuse are the implementation's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for the response
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// Computes the 160-bit content digest sent with uploads
pub trait ContentHasher: Send + Sync {
    /// Digest the full content
    fn digest(&self, data: &[u8]) -> [u8; 20];
}

/// External key/value store used to persist authorization state
///
/// Expiry is the cache's job: an entry written with a TTL must read back as
/// absent once the TTL has elapsed.
#[async_trait]
pub trait KvCache: Send + Sync {
    /// Fetch a stored value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value that expires after `ttl`
    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}
