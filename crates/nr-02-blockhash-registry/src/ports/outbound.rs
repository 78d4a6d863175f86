//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the blockhash registry requires from its host.

use crate::domain::BlockhashError;
use shared_types::{BlockRecord, Hash};

/// Opaque clock and block source.
///
/// Production: a chain client
/// Testing: `InMemoryChain`
pub trait BlockSource: Send + Sync {
    /// Most recently sealed block.
    fn latest_block(&self) -> BlockRecord;

    /// Block by number, if the source still serves it.
    fn block(&self, number: u64) -> Option<BlockRecord>;

    /// Number of the block currently being built (`latest + 1`).
    fn current_number(&self) -> u64 {
        self.latest_block().number.saturating_add(1)
    }
}

/// Storage for verified block hashes.
///
/// ## Write-once
///
/// A stored hash is never replaced by a different value.
///
/// ## Atomicity
///
/// `put_batch` applies either every entry or none of them.
pub trait HashStorage: Send + Sync {
    /// Stored hash for `number`, if any.
    fn get(&self, number: u64) -> Result<Option<Hash>, BlockhashError>;

    /// Store all entries atomically.
    ///
    /// Re-storing an identical hash is a no-op; a different hash fails the
    /// whole batch with `ConflictingHash`.
    fn put_batch(&self, entries: &[(u64, Hash)]) -> Result<(), BlockhashError>;
}
