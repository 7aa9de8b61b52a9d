//! Error types for the B2 client
//!
//! Every failed remote call is normalized into a single [`ApiError`] shape
//! carrying a message, an optional machine-readable code and an optional
//! HTTP status. Local precondition failures get their own variants so
//! callers can tell them apart without inspecting status codes.

use serde::{Deserialize, Serialize};

/// Result type alias for B2 operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for B2 operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote API, transport or malformed-response failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No authorization grant has been established
    #[error("Authorization required: {0}")]
    Auth(String),

    /// A local precondition was not met before issuing a request
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Operation parameters failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache collaborator failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Local JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Machine-readable error code, when the failure came from the service
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Api(e) => e.code.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, when the failure came from the service
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => e.status,
            _ => None,
        }
    }

    /// Borrow the uniform remote error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Uniform error shape for every failed remote call
///
/// Structured error bodies returned by the service deserialize directly into
/// this type. Failures that never produced such a body (network errors,
/// undecodable responses) are wrapped with best-effort `code`/`status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description
    #[serde(default)]
    pub message: String,

    /// Machine-readable error code (e.g. `bad_request`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an error from its parts
    pub fn new(message: impl Into<String>, code: Option<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            code,
            status,
        }
    }

    /// Translate an error response (status >= 400)
    ///
    /// A body that already has the `{code, message, status}` shape is passed
    /// through unchanged; the HTTP status only fills in a missing `status`.
    /// Anything else is wrapped with the body text as the message.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiError>(body) {
            Ok(mut parsed) if !parsed.message.is_empty() || parsed.code.is_some() => {
                if parsed.status.is_none() {
                    parsed.status = Some(status);
                }
                parsed
            }
            _ => {
                let text = String::from_utf8_lossy(body).trim().to_string();
                let message = if text.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    text
                };
                Self::new(message, None, Some(status))
            }
        }
    }

    /// Wrap a failure that happened before a response was received
    pub fn from_transport(err: &TransportError) -> Self {
        Self::new(err.message.clone(), err.code.clone(), err.status)
    }

    /// Wrap a response body that could not be decoded
    pub fn malformed(status: u16, err: &serde_json::Error) -> Self {
        Self::new(
            format!("Malformed response body: {err}"),
            None,
            Some(status),
        )
    }

    /// Whether the service rejected the account token
    ///
    /// Callers react by calling `authorize()` again before retrying.
    pub fn requires_reauthorization(&self) -> bool {
        if self.status != Some(401) {
            return false;
        }
        match self.code.as_deref() {
            None => true,
            Some(code) => matches!(code, "expired_auth_token" | "bad_auth_token"),
        }
    }
}

/// Failure raised by a [`Transport`](crate::Transport) before a response arrived
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// Description of the failure
    pub message: String,

    /// Status code, if the transport observed one
    pub status: Option<u16>,

    /// Error code, set when the failure is known to be permanent
    pub code: Option<String>,
}

impl TransportError {
    /// Create a transport error without a status
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    /// Mark a request that could not be built; resending it cannot succeed
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: Some(INVALID_REQUEST_CODE.to_string()),
            ..Self::new(message)
        }
    }
}

/// Code carried by transport errors for requests that were never sent
pub const INVALID_REQUEST_CODE: &str = "invalid_request";
