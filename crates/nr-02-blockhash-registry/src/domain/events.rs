//! Blockhash registry events.

use serde::{Deserialize, Serialize};
use shared_types::Hash;

/// Events emitted when the stored-hash table grows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockhashEvent {
    /// A hash was stored for a block number.
    BlockhashAdded {
        /// Block number
        number: u64,
        /// Stored hash
        hash: Hash,
    },
}
