//! # Ports Layer

pub mod outbound;

pub use outbound::{BlockSource, HashStorage};
