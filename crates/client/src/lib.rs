//! b2-client: Backblaze B2 native API client
//!
//! This crate implements the client on top of the `b2-core` types:
//! - Account authorization, optionally reusing a cached snapshot
//! - Request dispatch with uniform error translation
//! - Single-file uploads through a cached upload grant
//! - File, bucket, key, large file and download calls
//!
//! The HTTP transport, content hasher and key/value cache are collaborators
//! behind traits. [`ReqwestTransport`], [`Sha1Hasher`] and [`MemoryCache`]
//! are the bundled implementations.

mod buckets;
mod cache;
mod client;
mod dispatch;
mod download;
mod files;
mod hash;
mod keys;
mod large_file;
mod state;
mod transport;
mod upload;

#[cfg(test)]
mod testing;

pub use b2_core;
pub use cache::MemoryCache;
pub use client::{AUTH_CACHE_KEY, AUTH_CACHE_TTL, B2Client, B2ClientBuilder};
pub use hash::{Sha1Hasher, hex_digest};
pub use transport::ReqwestTransport;
