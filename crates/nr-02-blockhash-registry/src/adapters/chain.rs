//! # In-Memory Chain
//!
//! A block source that mines real headers, so every `BlockRecord` carries
//! canonical header bytes whose hash matches `BlockRecord::hash`.

use crate::ports::BlockSource;
use nr_01_header_codec::{hash_bytes, serialize, BlockHeader};
use parking_lot::RwLock;
use shared_crypto::keccak256;
use shared_types::{BlockRecord, Timestamp, ZERO_HASH};
use tracing::debug;

/// Seconds between consecutively mined blocks.
pub const DEFAULT_BLOCK_TIME_SECS: u64 = 15;

const GAS_LIMIT: u64 = 30_000_000;

/// Deterministic in-memory chain starting from a genesis block.
pub struct InMemoryChain {
    blocks: RwLock<Vec<(BlockHeader, BlockRecord)>>,
    block_time: u64,
}

impl InMemoryChain {
    /// Chain holding only a genesis block at `genesis_timestamp`.
    pub fn new(genesis_timestamp: Timestamp) -> Self {
        let genesis = BlockHeader::new(0, ZERO_HASH, genesis_timestamp);
        let record = Self::record_for(&genesis);
        Self {
            blocks: RwLock::new(vec![(genesis, record)]),
            block_time: DEFAULT_BLOCK_TIME_SECS,
        }
    }

    /// Chain with `count` blocks mined on top of genesis.
    pub fn with_blocks(genesis_timestamp: Timestamp, count: u64) -> Self {
        let chain = Self::new(genesis_timestamp);
        chain.mine_blocks(count);
        chain
    }

    /// Mine one block at the regular block interval.
    pub fn mine(&self) -> BlockRecord {
        self.mine_after(self.block_time)
    }

    /// Mine `count` blocks; returns the last one.
    pub fn mine_blocks(&self, count: u64) -> BlockRecord {
        let mut last = self.latest_block();
        for _ in 0..count {
            last = self.mine();
        }
        last
    }

    /// Mine one block `secs` after the latest block.
    pub fn advance_time(&self, secs: u64) -> BlockRecord {
        self.mine_after(secs)
    }

    fn mine_after(&self, secs: u64) -> BlockRecord {
        let mut blocks = self.blocks.write();
        let (parent_number, parent_hash, parent_time) = match blocks.last() {
            Some((_, record)) => (record.number, record.hash, record.timestamp),
            None => (0, ZERO_HASH, 0),
        };

        let number = parent_number + 1;
        let mut header = BlockHeader::new(number, parent_hash, parent_time.saturating_add(secs));
        header.gas_limit = GAS_LIMIT;
        header.difficulty = 1u64.into();
        header.state_root = keccak256(&number.to_be_bytes());
        header.extra_data = b"nr-chain".to_vec();

        let record = Self::record_for(&header);
        debug!("[nr-02] mined block {} at {}", number, record.timestamp);
        blocks.push((header, record.clone()));
        record
    }

    fn record_for(header: &BlockHeader) -> BlockRecord {
        let bytes = serialize(header);
        BlockRecord {
            number: header.number,
            parent_hash: header.parent_hash,
            hash: hash_bytes(&bytes),
            timestamp: header.timestamp,
            header: bytes,
        }
    }

    /// Decoded header of block `number`.
    pub fn header(&self, number: u64) -> Option<BlockHeader> {
        let index = usize::try_from(number).ok()?;
        self.blocks.read().get(index).map(|(header, _)| header.clone())
    }

    /// Serialized header of block `number`.
    pub fn raw_header(&self, number: u64) -> Option<Vec<u8>> {
        self.block(number).map(|record| record.header)
    }

    /// Serialized headers from `from` downward, newest first, at most `count`.
    pub fn headers_descending(&self, from: u64, count: usize) -> Vec<Vec<u8>> {
        (0..=from)
            .rev()
            .take(count)
            .filter_map(|number| self.raw_header(number))
            .collect()
    }
}

impl BlockSource for InMemoryChain {
    fn latest_block(&self) -> BlockRecord {
        let blocks = self.blocks.read();
        match blocks.last() {
            Some((_, record)) => record.clone(),
            None => Self::record_for(&BlockHeader::default()),
        }
    }

    fn block(&self, number: u64) -> Option<BlockRecord> {
        let index = usize::try_from(number).ok()?;
        self.blocks.read().get(index).map(|(_, record)| record.clone())
    }

    fn current_number(&self) -> u64 {
        self.blocks.read().len() as u64
    }
}
