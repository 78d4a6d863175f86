//! # Outbound Ports (Driven Ports)
//!
//! The deposit token is an external fungible-asset ledger. Calls are
//! synchronous and all-or-nothing: an `Err` means no balance moved.

use shared_types::{Address, U256};
use thiserror::Error;

/// Asset ledger failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetError {
    /// Sender balance too low.
    #[error("Insufficient balance: have {available}, need {required}")]
    InsufficientBalance {
        /// Current balance
        available: U256,
        /// Requested amount
        required: U256,
    },

    /// Spender allowance too low.
    #[error("Insufficient allowance: have {available}, need {required}")]
    InsufficientAllowance {
        /// Current allowance
        available: U256,
        /// Requested amount
        required: U256,
    },

    /// Ledger unavailable or rejected the call.
    #[error("Asset ledger unavailable: {0}")]
    Unavailable(String),
}

/// Fungible-asset ledger holding node deposits.
///
/// Production: a token contract client
/// Testing: `InMemoryAssetLedger`
pub trait AssetLedger: Send + Sync {
    /// Balance of `account`.
    fn balance_of(&self, account: &Address) -> U256;

    /// Allowance granted by `owner` to `spender`.
    fn allowance(&self, owner: &Address, spender: &Address) -> U256;

    /// Move `amount` from `from` to `to`.
    fn transfer(&self, from: &Address, to: &Address, amount: U256) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to` using `spender`'s allowance.
    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AssetError>;

    /// Set `spender`'s allowance over `owner`'s balance.
    fn approve(&self, owner: &Address, spender: &Address, amount: U256) -> Result<(), AssetError>;
}
