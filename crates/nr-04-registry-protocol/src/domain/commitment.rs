//! Pending convict commitments.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// A pending accusation, keyed by its commitment hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvictCommitment {
    /// Block being built when the commitment was recorded.
    pub block_number: u64,
    /// Account that submitted it.
    pub convictor: Address,
}

impl ConvictCommitment {
    /// Whether more than `ttl_blocks` blocks passed since the commitment.
    pub fn is_expired(&self, current: u64, ttl_blocks: u64) -> bool {
        current.saturating_sub(self.block_number) > ttl_blocks
    }
}
