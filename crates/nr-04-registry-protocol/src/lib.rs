//! # NR-04 Registry Protocol
//!
//! Deposit-backed node registration with commit/reveal slashing.
//!
//! **Component ID:** 04
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! Nodes register a url, capability bits and a weight, escrowing a deposit
//! with the registry. A signer that signs a hash which is not the canonical
//! hash of the block it claims can be convicted by anyone:
//!
//! 1. **Commit** `H(hash ‖ caller ‖ v ‖ r ‖ s)` with [`NodeRegistryApi::convict`]
//! 2. **Reveal** the accusation in a later block with
//!    [`NodeRegistryApi::reveal_convict`]
//!
//! The commitment hides the evidence until it is bound to the convictor, so
//! an observer cannot front-run the reward.
//!
//! ## Security Properties
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | No front-running | Commitment binds the convictor; reveal needs a later block |
//! | Ground truth | Canonical hash from the block source or stored table |
//! | Signature malleability | High-S signatures are rejected |
//! | Bounded stake | Deposit floor, plus a ceiling during the first year |
//!
//! ## Module Structure
//!
//! ```text
//! nr-04-registry-protocol/
//! ├── domain/      # Errors, events, commitments, signed messages
//! ├── ports/       # NodeRegistryApi, SignerRecovery
//! ├── adapters/    # Secp256k1Recovery
//! ├── service/     # NodeRegistryService
//! └── config.rs    # RegistryConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::Secp256k1Recovery;
pub use config::{
    default_max_deposit_first_year, default_min_deposit, RegistryConfig,
    COMMITMENT_TTL_BLOCKS, CONVICTOR_SHARE_PERCENT, UNREGISTER_LOCK_SECS,
};
pub use domain::{
    convict_commitment, registration_message, registry_id, ConvictCommitment, RegistryError,
    RegistryEvent, RemovalReason,
};
pub use ports::{NodeRegistryApi, SignerRecovery};
pub use service::NodeRegistryService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
