//! # Domain Layer

pub mod chain;
pub mod errors;
pub mod events;

pub use chain::{recalculate_chain, verify_descending_chain, ChainWalk};
pub use errors::BlockhashError;
pub use events::BlockhashEvent;
