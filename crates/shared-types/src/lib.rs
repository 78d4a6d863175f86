//! # Shared Types Crate
//!
//! This crate contains the primitive entities shared by the header codec,
//! the blockhash registry, the node ledger and the registry protocol.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `Address` and `U256` are defined
//!   once and re-exported everywhere.
//! - **Plain Data**: nothing here performs I/O or holds locks.

pub mod entities;

pub use entities::*;
