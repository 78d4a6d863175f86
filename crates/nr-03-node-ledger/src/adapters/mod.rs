//! # Adapters Layer

pub mod asset_ledger;

pub use asset_ledger::InMemoryAssetLedger;
