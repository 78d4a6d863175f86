//! # Blockhash Registry Service
//!
//! Owns the stored-hash table. Hashes enter it in two ways:
//!
//! 1. **Direct save** of a block still served by the block source
//!    (`save_block_number`, `snapshot`).
//! 2. **Reconstruction** below a stored anchor by replaying serialized
//!    headers newest first (`recreate_blockheaders`).
//!
//! Reconstruction writes go through a single atomic `put_batch`, so a
//! concurrent reader never sees a half-rebuilt chain.

use std::sync::Arc;

use nr_01_header_codec::parent_and_hash;
use parking_lot::Mutex;
use shared_types::Hash;
use tracing::{debug, info};

use crate::adapters::InMemoryHashStorage;
use crate::config::BlockhashConfig;
use crate::domain::{recalculate_chain, verify_descending_chain, BlockhashError, BlockhashEvent};
use crate::ports::{BlockSource, HashStorage};

/// Verified historical block-hash registry.
pub struct BlockhashRegistry<B: BlockSource, S: HashStorage = InMemoryHashStorage> {
    config: BlockhashConfig,
    source: Arc<B>,
    storage: S,
    events: Mutex<Vec<BlockhashEvent>>,
}

impl<B: BlockSource> BlockhashRegistry<B, InMemoryHashStorage> {
    /// Registry backed by an empty in-memory table.
    pub fn new_in_memory(config: BlockhashConfig, source: Arc<B>) -> Self {
        Self::new(config, source, InMemoryHashStorage::new())
    }
}

impl<B: BlockSource, S: HashStorage> BlockhashRegistry<B, S> {
    /// Create a registry over `source` and `storage`.
    pub fn new(config: BlockhashConfig, source: Arc<B>, storage: S) -> Self {
        Self {
            config,
            source,
            storage,
            events: Mutex::new(Vec::new()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &BlockhashConfig {
        &self.config
    }

    /// Underlying block source.
    pub fn source(&self) -> &Arc<B> {
        &self.source
    }

    /// Underlying hash storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Number of the block currently being built.
    pub fn current_number(&self) -> u64 {
        self.source.current_number()
    }

    /// Whether the block source still serves the hash of `number`.
    pub fn is_directly_available(&self, number: u64) -> bool {
        let current = self.source.current_number();
        number < current && current - number < self.config.direct_window
    }

    /// Store the hash of a block inside the direct window.
    pub fn save_block_number(&self, number: u64) -> Result<Hash, BlockhashError> {
        if !self.is_directly_available(number) {
            return Err(BlockhashError::OutOfWindow {
                number,
                current: self.source.current_number(),
            });
        }

        let record = self
            .source
            .block(number)
            .ok_or(BlockhashError::BlockNotFound(number))?;

        let is_new = self.storage.get(number)?.is_none();
        self.storage.put_batch(&[(number, record.hash)])?;

        if is_new {
            info!("[nr-02] saved blockhash for block {}", number);
            self.events.lock().push(BlockhashEvent::BlockhashAdded {
                number,
                hash: record.hash,
            });
        }
        Ok(record.hash)
    }

    /// Store the hash of the latest sealed block.
    pub fn snapshot(&self) -> Result<(u64, Hash), BlockhashError> {
        let current = self.source.current_number();
        let number = current
            .checked_sub(1)
            .ok_or(BlockhashError::OutOfWindow { number: 0, current })?;
        let hash = self.save_block_number(number)?;
        Ok((number, hash))
    }

    /// Verify a descending header chain starting at `start_hash`.
    ///
    /// Returns the parent hash of the oldest header. Persists nothing.
    pub fn re_calculate_blockheaders(
        &self,
        headers: &[Vec<u8>],
        start_hash: Hash,
    ) -> Result<Hash, BlockhashError> {
        recalculate_chain(headers, start_hash)
    }

    /// Extend the stored table below an anchor at `start_number`.
    ///
    /// `headers[0]` must hash to the stored anchor and each later header must
    /// be the parent of the one before it. On success the hashes of
    /// `start_number - 1 ..= start_number - len` are stored in one batch and
    /// the oldest of them is returned.
    pub fn recreate_blockheaders(
        &self,
        start_number: u64,
        headers: &[Vec<u8>],
    ) -> Result<Hash, BlockhashError> {
        let anchor = self
            .storage
            .get(start_number)?
            .ok_or(BlockhashError::NoSnapshotAnchor(start_number))?;

        let walk = verify_descending_chain(headers, anchor)?;

        let len = headers.len();
        let depth = u64::try_from(len).map_err(|_| BlockhashError::NumberOutOfRange {
            start: start_number,
            len,
        })?;
        if depth > start_number {
            return Err(BlockhashError::NumberOutOfRange {
                start: start_number,
                len,
            });
        }

        let mut entries: Vec<(u64, Hash)> = walk
            .hashes
            .iter()
            .zip(0u64..)
            .skip(1)
            .map(|(hash, offset)| (start_number - offset, *hash))
            .collect();
        entries.push((start_number - depth, walk.oldest_parent));

        let mut added = Vec::new();
        for (number, hash) in &entries {
            match self.storage.get(*number)? {
                Some(existing) if existing != *hash => {
                    let index = usize::try_from(start_number - number)
                        .unwrap_or(len)
                        .min(len - 1);
                    return Err(BlockhashError::ChainMismatch { index });
                }
                Some(_) => {}
                None => added.push((*number, *hash)),
            }
        }

        self.storage.put_batch(&entries)?;

        info!(
            "[nr-02] recreated {} blockhashes below block {} ({} new)",
            entries.len(),
            start_number,
            added.len()
        );
        let mut events = self.events.lock();
        for (number, hash) in added {
            events.push(BlockhashEvent::BlockhashAdded { number, hash });
        }

        Ok(walk.oldest_parent)
    }

    /// First stored block number in `[start, start + range)`, or `0`.
    pub fn search_for_available_block(&self, start: u64, range: u64) -> Result<u64, BlockhashError> {
        let end = start.saturating_add(range);
        for number in start..end {
            if self.storage.get(number)?.is_some() {
                debug!("[nr-02] found stored blockhash at {}", number);
                return Ok(number);
            }
        }
        Ok(0)
    }

    /// Parent hash and own hash of serialized header bytes.
    pub fn get_parent_and_blockhash(&self, header: &[u8]) -> Result<(Hash, Hash), BlockhashError> {
        parent_and_hash(header).map_err(|source| BlockhashError::MalformedHeader { index: 0, source })
    }

    /// Stored hash of `number`.
    pub fn blockhash(&self, number: u64) -> Result<Option<Hash>, BlockhashError> {
        self.storage.get(number)
    }

    /// Canonical hash of `number`: from the block source inside the direct
    /// window, from the stored table outside it.
    pub fn canonical_hash(&self, number: u64) -> Result<Option<Hash>, BlockhashError> {
        if self.is_directly_available(number) {
            return Ok(self.source.block(number).map(|record| record.hash));
        }
        self.storage.get(number)
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&self) -> Vec<BlockhashEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}
