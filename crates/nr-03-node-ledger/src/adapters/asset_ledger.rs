//! # In-Memory Asset Ledger
//!
//! Token balances and allowances for tests and local runs.

use crate::ports::{AssetError, AssetLedger};
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Debug, Default)]
struct Balances {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

/// In-memory fungible-asset ledger.
#[derive(Debug, Default)]
pub struct InMemoryAssetLedger {
    state: RwLock<Balances>,
    /// Reject every transfer when set.
    should_fail: AtomicBool,
}

impl InMemoryAssetLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air.
    pub fn mint(&self, account: &Address, amount: U256) {
        let mut state = self.state.write();
        let balance = state.balances.entry(*account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Make every subsequent transfer fail (or succeed again).
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AssetError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(AssetError::Unavailable("transfers disabled".to_string()));
        }
        Ok(())
    }

    fn move_balance(
        state: &mut Balances,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AssetError> {
        let available = state.balances.get(from).copied().unwrap_or_default();
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                available,
                required: amount,
            });
        }
        state.balances.insert(*from, available - amount);
        let to_balance = state.balances.entry(*to).or_default();
        *to_balance = to_balance.saturating_add(amount);
        Ok(())
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn balance_of(&self, account: &Address) -> U256 {
        self.state
            .read()
            .balances
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.state
            .read()
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&self, from: &Address, to: &Address, amount: U256) -> Result<(), AssetError> {
        self.check_available()?;
        let mut state = self.state.write();
        Self::move_balance(&mut state, from, to, amount)?;
        debug!("[nr-03] asset transfer of {}", amount);
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), AssetError> {
        self.check_available()?;
        let mut state = self.state.write();

        let key = (*from, *spender);
        let allowance = state.allowances.get(&key).copied().unwrap_or_default();
        if allowance < amount {
            return Err(AssetError::InsufficientAllowance {
                available: allowance,
                required: amount,
            });
        }

        Self::move_balance(&mut state, from, to, amount)?;
        state.allowances.insert(key, allowance - amount);
        debug!("[nr-03] asset transfer_from of {}", amount);
        Ok(())
    }

    fn approve(&self, owner: &Address, spender: &Address, amount: U256) -> Result<(), AssetError> {
        self.state
            .write()
            .allowances
            .insert((*owner, *spender), amount);
        Ok(())
    }
}
