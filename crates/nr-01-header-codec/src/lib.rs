//! # NR-01 Header Codec
//!
//! Canonical block header serialization and hashing.
//!
//! **Component ID:** 01
//! **Architecture:** Pure domain crate (no ports, no state)
//!
//! ## Purpose
//!
//! Reproduce exactly the bytes whose keccak256 is the chain's block hash, and
//! decode untrusted header bytes far enough to walk a header chain backward.
//! Decoding is fully checked: malformed bytes produce a [`HeaderCodecError`],
//! never a panic.
//!
//! ## Module Structure
//!
//! ```text
//! nr-01-header-codec/
//! ├── domain/     # BlockHeader, RLP encoders, errors
//! └── codec.rs    # serialize / decode / parent_and_hash
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod domain;

// Re-exports
pub use codec::{
    block_hash, decode, hash_bytes, number_and_hash, parent_and_hash, serialize,
    BASE_FEE_FIELD_COUNT, LEGACY_FIELD_COUNT,
};
pub use domain::{BlockHeader, HeaderCodecError, BLOOM_LENGTH, EMPTY_OMMERS_HASH, NONCE_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
