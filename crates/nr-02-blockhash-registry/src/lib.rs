//! # NR-02 Blockhash Registry
//!
//! Verifiable store of historical block hashes.
//!
//! **Component ID:** 02
//! **Architecture:** Hexagonal (Domain + Ports/Adapters)
//!
//! ## Purpose
//!
//! The block source only serves hashes for a bounded window of recent
//! blocks. This registry keeps hashes beyond that window:
//!
//! - **Direct save** of blocks still inside the window
//! - **Reconstruction** of older hashes by replaying a header chain backward
//!   from a stored anchor
//!
//! ## Security Properties
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Write-once | Stored hashes are never replaced with a different value |
//! | Atomic reconstruction | One `put_batch` per reconstruction, validated first |
//! | Checked decoding | Malformed headers surface as `MalformedHeader` |
//!
//! ## Module Structure
//!
//! ```text
//! nr-02-blockhash-registry/
//! ├── domain/      # Chain walk, errors, events
//! ├── ports/       # BlockSource, HashStorage
//! ├── adapters/    # InMemoryChain, InMemoryHashStorage
//! ├── service.rs   # BlockhashRegistry
//! └── config.rs    # BlockhashConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryChain, InMemoryHashStorage, DEFAULT_BLOCK_TIME_SECS};
pub use config::{BlockhashConfig, DIRECT_WINDOW};
pub use domain::{
    recalculate_chain, verify_descending_chain, BlockhashError, BlockhashEvent, ChainWalk,
};
pub use ports::{BlockSource, HashStorage};
pub use service::BlockhashRegistry;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
