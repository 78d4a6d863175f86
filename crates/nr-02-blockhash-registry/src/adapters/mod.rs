//! # Adapters Layer
//!
//! In-memory implementations of the outbound ports.

pub mod chain;
pub mod storage;

pub use chain::{InMemoryChain, DEFAULT_BLOCK_TIME_SECS};
pub use storage::InMemoryHashStorage;
