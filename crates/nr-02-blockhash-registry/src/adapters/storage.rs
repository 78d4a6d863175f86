//! # In-Memory Hash Storage

use crate::domain::BlockhashError;
use crate::ports::HashStorage;
use parking_lot::RwLock;
use shared_types::{is_zero_hash, Hash};
use std::collections::BTreeMap;

/// In-memory stored-hash table.
#[derive(Debug, Default)]
pub struct InMemoryHashStorage {
    hashes: RwLock<BTreeMap<u64, Hash>>,
}

impl InMemoryHashStorage {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored hashes.
    pub fn len(&self) -> usize {
        self.hashes.read().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.hashes.read().is_empty()
    }
}

impl HashStorage for InMemoryHashStorage {
    fn get(&self, number: u64) -> Result<Option<Hash>, BlockhashError> {
        Ok(self.hashes.read().get(&number).copied())
    }

    fn put_batch(&self, entries: &[(u64, Hash)]) -> Result<(), BlockhashError> {
        let mut hashes = self.hashes.write();

        // Validate the whole batch before the first write
        for (number, hash) in entries {
            if let Some(existing) = hashes.get(number) {
                if existing != hash {
                    return Err(BlockhashError::ConflictingHash(*number));
                }
            }
        }

        for (number, hash) in entries {
            if !is_zero_hash(hash) {
                hashes.insert(*number, *hash);
            }
        }
        Ok(())
    }
}
