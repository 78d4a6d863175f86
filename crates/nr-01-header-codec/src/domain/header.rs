//! # Block Header
//!
//! The header fields hashed by the chain, in canonical RLP order.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Address, Hash, Timestamp, U256, ZERO_ADDRESS, ZERO_HASH};

/// Logs bloom filter length in bytes.
pub const BLOOM_LENGTH: usize = 256;

/// Proof-of-work nonce length in bytes.
pub const NONCE_LENGTH: usize = 8;

/// keccak256 of the RLP empty list, the ommers hash of a block without uncles.
pub const EMPTY_OMMERS_HASH: Hash = [
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a, 0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4, 0x1a,
    0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13, 0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4, 0x93, 0x47,
];

/// A block header.
///
/// `base_fee` is present only on headers produced after the fee-market fork;
/// it is the optional sixteenth field of the encoding.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Hash of the parent header.
    pub parent_hash: Hash,
    /// Hash of the ommers list.
    pub ommers_hash: Hash,
    /// Fee recipient.
    pub beneficiary: Address,
    /// State trie root.
    pub state_root: Hash,
    /// Transactions trie root.
    pub transactions_root: Hash,
    /// Receipts trie root.
    pub receipts_root: Hash,
    /// Logs bloom filter.
    #[serde_as(as = "Bytes")]
    pub logs_bloom: [u8; BLOOM_LENGTH],
    /// Block difficulty.
    pub difficulty: U256,
    /// Block number.
    pub number: u64,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas used.
    pub gas_used: u64,
    /// Block timestamp.
    pub timestamp: Timestamp,
    /// Arbitrary extra data.
    pub extra_data: Vec<u8>,
    /// Mix hash.
    pub mix_hash: Hash,
    /// Proof-of-work nonce.
    #[serde_as(as = "Bytes")]
    pub nonce: [u8; NONCE_LENGTH],
    /// Base fee per gas, if any.
    pub base_fee: Option<U256>,
}

impl Default for BlockHeader {
    fn default() -> Self {
        Self {
            parent_hash: ZERO_HASH,
            ommers_hash: EMPTY_OMMERS_HASH,
            beneficiary: ZERO_ADDRESS,
            state_root: ZERO_HASH,
            transactions_root: ZERO_HASH,
            receipts_root: ZERO_HASH,
            logs_bloom: [0u8; BLOOM_LENGTH],
            difficulty: U256::zero(),
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            timestamp: 0,
            extra_data: Vec::new(),
            mix_hash: ZERO_HASH,
            nonce: [0u8; NONCE_LENGTH],
            base_fee: None,
        }
    }
}

impl BlockHeader {
    /// Header with the chain-linking fields set and everything else default.
    pub fn new(number: u64, parent_hash: Hash, timestamp: Timestamp) -> Self {
        Self {
            number,
            parent_hash,
            timestamp,
            ..Default::default()
        }
    }
}
