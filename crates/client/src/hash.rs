//! Content digests for upload integrity headers

use b2_core::ContentHasher;
use sha1::{Digest, Sha1};

/// SHA-1, the digest the service verifies uploads against
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1Hasher;

impl ContentHasher for Sha1Hasher {
    fn digest(&self, data: &[u8]) -> [u8; 20] {
        let mut out = [0u8; 20];
        out.copy_from_slice(&Sha1::digest(data));
        out
    }
}

/// Lowercase hex rendering of a digest, two characters per byte
pub fn hex_digest(hasher: &dyn ContentHasher, data: &[u8]) -> String {
    hex::encode(hasher.digest(data))
}
