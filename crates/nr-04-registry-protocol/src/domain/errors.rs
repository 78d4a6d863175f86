//! # Domain Errors

use nr_01_header_codec::HeaderCodecError;
use nr_02_blockhash_registry::BlockhashError;
use nr_03_node_ledger::LedgerError;
use shared_crypto::CryptoError;
use shared_types::{Address, U256};
use thiserror::Error;

/// Registry protocol error types.
///
/// All are recoverable; a failed operation leaves every table unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Signature components are malformed or non-canonical.
    #[error("Invalid signature: {0}")]
    InvalidSignature(CryptoError),

    /// Signature recovers to a different address.
    #[error("Signer mismatch: expected 0x{}, recovered 0x{}", hex::encode(.expected), hex::encode(.recovered))]
    SignerMismatch {
        /// Address the caller claimed
        expected: Address,
        /// Address the signature recovers to
        recovered: Address,
    },

    /// No canonical hash is known for this block.
    #[error("No ground truth for block {0}")]
    NoGroundTruth(u64),

    /// The signed hash is the canonical one.
    #[error("Signed hash matches the canonical chain")]
    NotFraudulent,

    /// Revealed block bytes are not the canonical block.
    #[error("Revealed header for block {number} is not canonical")]
    ChainMismatch {
        /// Decoded block number
        number: u64,
    },

    /// Revealed block bytes do not decode.
    #[error("Malformed header: {0}")]
    MalformedHeader(HeaderCodecError),

    /// No pending commitment for the revealed tuple.
    #[error("Unknown convict commitment")]
    UnknownCommitment,

    /// Commitment already pending.
    #[error("Duplicate convict commitment")]
    DuplicateCommitment,

    /// Reveal in the same block as its commitment.
    #[error("Reveal too early: committed at {committed_at}, current {current}")]
    TooEarly {
        /// Block number recorded at commit
        committed_at: u64,
        /// Block currently being built
        current: u64,
    },

    /// Reveal after the commitment outlived its time-to-live.
    #[error("Commitment expired: committed at {committed_at}, current {current}")]
    CommitmentExpired {
        /// Block number recorded at commit
        committed_at: u64,
        /// Block currently being built
        current: u64,
    },

    /// Deposit outside the accepted range.
    #[error("Deposit {deposit} out of bounds")]
    DepositOutOfBounds {
        /// Offered deposit
        deposit: U256,
    },

    /// Admin removal is only possible during the first year.
    #[error("Admin window expired")]
    AdminWindowExpired,

    /// Caller is not the admin key.
    #[error("Caller is not the admin")]
    NotAdmin,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Node ledger failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Blockhash registry failure.
    #[error(transparent)]
    Blockhash(#[from] BlockhashError),
}
