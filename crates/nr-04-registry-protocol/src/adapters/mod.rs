//! # Adapters Layer

pub mod recovery;

pub use recovery::Secp256k1Recovery;
