//! # Ledger Errors

use super::Stage;
use crate::ports::AssetError;
use shared_types::Timestamp;
use thiserror::Error;

/// Node ledger error types.
///
/// Every failing operation leaves the ledger and escrowed funds unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Another active node uses this url.
    #[error("Url already registered: {0}")]
    DuplicateUrl(String),

    /// Signer already has a non-unused record.
    #[error("Signer 0x{} already registered", hex::encode(.0))]
    DuplicateSigner([u8; 20]),

    /// Url must be non-empty.
    #[error("Url is empty")]
    EmptyUrl,

    /// Caller is not the owner of the signer record.
    #[error("Caller is not the node owner")]
    NotOwner,

    /// Operation not allowed in the signer's current stage.
    #[error("Wrong stage: expected {expected:?}, found {actual:?}")]
    WrongStage {
        /// Stage the operation requires
        expected: Stage,
        /// Current stage
        actual: Stage,
    },

    /// No record or node for this signer.
    #[error("Signer 0x{} not found", hex::encode(.0))]
    NotFound([u8; 20]),

    /// Signer was already slashed.
    #[error("Signer 0x{} already convicted", hex::encode(.0))]
    AlreadyConvicted([u8; 20]),

    /// Deposit still locked.
    #[error("Deposit locked until {locked_until}, now {now}")]
    LockNotElapsed {
        /// Earliest return time
        locked_until: Timestamp,
        /// Current time
        now: Timestamp,
    },

    /// Asset ledger refused a transfer.
    #[error("Transfer failed: {0}")]
    TransferFailed(#[from] AssetError),

    /// New owner is the zero address.
    #[error("Invalid owner address")]
    InvalidOwner,

    /// Amount or timestamp arithmetic overflowed.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}
