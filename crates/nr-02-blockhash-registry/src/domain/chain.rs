//! # Header Chain Verification
//!
//! Backward walk over serialized headers supplied newest first.

use super::BlockhashError;
use nr_01_header_codec::parent_and_hash;
use shared_types::Hash;

/// Result of a verified backward walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainWalk {
    /// Hash of each supplied header, in input order.
    pub hashes: Vec<Hash>,
    /// Parent hash of the last (oldest) header.
    pub oldest_parent: Hash,
}

/// Verify that `headers` form a descending chain starting at `start_hash`.
///
/// # Checks
/// 1. `hash(headers[0]) == start_hash`
/// 2. `hash(headers[i]) == parent(headers[i - 1])` for every later header
///
/// An empty list is a mismatch at index 0.
pub fn verify_descending_chain(
    headers: &[Vec<u8>],
    start_hash: Hash,
) -> Result<ChainWalk, BlockhashError> {
    if headers.is_empty() {
        return Err(BlockhashError::ChainMismatch { index: 0 });
    }

    let mut expected = start_hash;
    let mut hashes = Vec::with_capacity(headers.len());

    for (index, bytes) in headers.iter().enumerate() {
        let (parent, hash) = parent_and_hash(bytes)
            .map_err(|source| BlockhashError::MalformedHeader { index, source })?;

        if hash != expected {
            return Err(BlockhashError::ChainMismatch { index });
        }

        hashes.push(hash);
        expected = parent;
    }

    Ok(ChainWalk {
        hashes,
        oldest_parent: expected,
    })
}

/// Parent hash of the oldest header in a verified descending chain.
pub fn recalculate_chain(headers: &[Vec<u8>], start_hash: Hash) -> Result<Hash, BlockhashError> {
    verify_descending_chain(headers, start_hash).map(|walk| walk.oldest_parent)
}
