//! # Core Domain Entities
//!
//! Primitive types shared by every registry crate.
//!
//! ## Clusters
//!
//! - **Identity**: `Hash`, `Address`
//! - **Chain**: `BlockRecord`, `Timestamp`
//! - **Value**: `U256` amounts and unit helpers

use serde::{Deserialize, Serialize};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 32-byte hash (keccak256 throughout the registry).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// The all-zero hash. Stored hashes use it to mean "unknown".
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address. A signer record owned by it is unused.
pub const ZERO_ADDRESS: Address = [0u8; 20];

// =============================================================================
// CLUSTER B: THE CHAIN
// =============================================================================

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// A block as supplied by the block source.
///
/// `header` carries the canonical serialized header whose keccak256 equals
/// `hash`. Records are immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Block height in the chain.
    pub number: u64,
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Hash of this block.
    pub hash: Hash,
    /// Timestamp of this block.
    pub timestamp: Timestamp,
    /// Canonical header bytes.
    pub header: Vec<u8>,
}

// =============================================================================
// CLUSTER C: VALUE
// =============================================================================

/// Base units per whole token (10^18).
pub fn token_unit() -> U256 {
    U256::exp10(18)
}

/// `amount` whole tokens expressed in base units.
pub fn tokens(amount: u64) -> U256 {
    U256::from(amount) * token_unit()
}

/// Big-endian 32-byte encoding of a `U256`.
pub fn u256_to_be_bytes(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}

/// Whether a hash is the zero hash.
pub fn is_zero_hash(hash: &Hash) -> bool {
    hash.iter().all(|&b| b == 0)
}
