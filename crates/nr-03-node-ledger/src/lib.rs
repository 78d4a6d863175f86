//! # NR-03 Node Ledger
//!
//! The authoritative set of registered nodes, their per-signer lifecycle
//! records and the deposit escrow held in an external asset ledger.
//!
//! **Component ID:** 03
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Signer Lifecycle
//!
//! ```text
//! Unused ──register──▶ Active ──unregister──▶ Unregistering ──return──▶ Unused
//!                        │                          │
//!                        └──────────slash───────────┴──────▶ Convicted
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! nr-03-node-ledger/
//! ├── domain/      # Node, SignerRecord, Stage, NodeSet, errors
//! ├── ports/       # AssetLedger
//! ├── adapters/    # InMemoryAssetLedger
//! └── service.rs   # NodeLedger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryAssetLedger;
pub use domain::{LedgerError, Node, NodeSet, SignerRecord, Stage};
pub use ports::{AssetError, AssetLedger};
pub use service::{NodeLedger, SlashOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
