//! # Ledger Entities
//!
//! `Node` is the live registration; `SignerRecord` outlives it and tracks
//! the signer through `Unregistering` and `Convicted`.

use serde::{Deserialize, Serialize};
use shared_crypto::keccak256_concat;
use shared_types::{u256_to_be_bytes, Address, Hash, Timestamp, U256, ZERO_ADDRESS};

/// Lifecycle stage of a signer.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Never registered, or deposit fully returned.
    #[default]
    Unused = 0,
    /// Has a live node entry.
    Active = 1,
    /// Slashed; cannot register again.
    Convicted = 2,
    /// Node removed, deposit escrowed until `locked_time`.
    Unregistering = 3,
}

/// A registered node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique endpoint URL.
    pub url: String,
    /// Attestation signing address.
    pub signer: Address,
    /// Staked deposit.
    pub deposit: U256,
    /// Capability bitmask.
    pub props: u64,
    /// Registration timestamp.
    pub register_time: Timestamp,
    /// Relative capacity weight.
    pub weight: u32,
    /// Commitment over the node's attributes.
    pub proof_hash: Hash,
}

impl Node {
    /// Create a node and compute its proof hash.
    pub fn new(
        url: String,
        signer: Address,
        deposit: U256,
        props: u64,
        weight: u32,
        register_time: Timestamp,
    ) -> Self {
        let mut node = Self {
            url,
            signer,
            deposit,
            props,
            register_time,
            weight,
            proof_hash: [0u8; 32],
        };
        node.refresh_proof_hash();
        node
    }

    /// `keccak256(deposit ‖ register_time ‖ props ‖ signer ‖ url)` with
    /// big-endian fixed-width integers.
    pub fn compute_proof_hash(&self) -> Hash {
        keccak256_concat(&[
            &u256_to_be_bytes(&self.deposit)[..],
            &self.register_time.to_be_bytes()[..],
            &self.props.to_be_bytes()[..],
            &self.signer[..],
            self.url.as_bytes(),
        ])
    }

    /// Recompute `proof_hash` after a mutation.
    pub fn refresh_proof_hash(&mut self) {
        self.proof_hash = self.compute_proof_hash();
    }
}

/// Per-signer lifecycle record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerRecord {
    /// Administrator of the registration.
    pub owner: Address,
    /// Lifecycle stage.
    pub stage: Stage,
    /// Escrowed deposit while not active.
    pub deposit_amount: U256,
    /// Earliest return time while unregistering.
    pub locked_time: Timestamp,
}

impl SignerRecord {
    /// Record of a freshly registered signer.
    pub fn active(owner: Address) -> Self {
        Self {
            owner,
            stage: Stage::Active,
            deposit_amount: U256::zero(),
            locked_time: 0,
        }
    }

    /// Whether the record is in its reset state.
    pub fn is_unused(&self) -> bool {
        self.stage == Stage::Unused && self.owner == ZERO_ADDRESS
    }
}
