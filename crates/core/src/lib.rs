//! b2-core: Core library for the B2 client
//!
//! This crate provides the transport-independent pieces of the client:
//! - The error type and the uniform remote error shape
//! - Credentials and client configuration
//! - Retry eligibility for failed calls
//! - Typed request/response structures for every API operation
//! - Collaborator traits for HTTP transport, hashing and caching
//!
//! Nothing here performs I/O on its own, so everything can be tested
//! without a network.

pub mod config;
pub mod error;
pub mod retry;
pub mod traits;
pub mod types;

pub use config::{ClientConfig, Config, Credentials, RetryConfig};
pub use error::{ApiError, Error, INVALID_REQUEST_CODE, Result, TransportError};
pub use retry::{RetryBuilder, is_retryable_api_error, is_retryable_error, retry_with_backoff};
pub use traits::{ContentHasher, HttpRequest, HttpResponse, KvCache, Transport};
pub use types::*;
