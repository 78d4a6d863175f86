//! # Keccak-256 Hashing
//!
//! Every hash the registry stores or compares is keccak256: block header
//! hashes, node proof hashes, registration messages and convict commitments.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak256 over the tight concatenation of `parts`.
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
