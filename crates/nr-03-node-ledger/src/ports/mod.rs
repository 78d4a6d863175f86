//! # Ports Layer

pub mod outbound;

pub use outbound::{AssetError, AssetLedger};
