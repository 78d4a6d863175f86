//! # Registry Events

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// Why a node left the active set without being slashed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Owner unregistered it.
    Owner,
    /// Admin removed it during the admin window.
    Admin,
}

/// Events recorded by the registry, drained by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A node was registered.
    NodeRegistered {
        /// Node url
        url: String,
        /// Signer address
        signer: Address,
        /// Owner address
        owner: Address,
        /// Deposit pulled
        deposit: U256,
        /// Capability bitmask
        props: u64,
        /// Capacity weight
        weight: u32,
    },
    /// A node's attributes changed.
    NodeUpdated {
        /// New url
        url: String,
        /// Signer address
        signer: Address,
        /// Total deposit after the update
        deposit: U256,
        /// Capability bitmask
        props: u64,
        /// Capacity weight
        weight: u32,
    },
    /// A node moved to unregistering.
    NodeRemoved {
        /// Signer address
        signer: Address,
        /// Who removed it
        reason: RemovalReason,
        /// Earliest deposit return
        locked_until: u64,
    },
    /// A signer was slashed.
    NodeConvicted {
        /// Slashed signer
        signer: Address,
        /// Account paid the reward
        convictor: Address,
        /// Reward paid
        reward: U256,
    },
    /// Registration handed to a new owner.
    OwnershipChanged {
        /// Signer address
        signer: Address,
        /// Previous owner
        old_owner: Address,
        /// New owner
        new_owner: Address,
    },
    /// Escrowed deposit paid back.
    DepositReturned {
        /// Signer address
        signer: Address,
        /// Receiving owner
        owner: Address,
        /// Amount returned
        amount: U256,
    },
    /// A convict commitment was recorded.
    ConvictCommitted {
        /// Commitment hash
        commitment: Hash,
        /// Block being built at commit
        block_number: u64,
    },
    /// A stale commitment was dropped without a conviction.
    ConvictExpired {
        /// Commitment hash
        commitment: Hash,
        /// Account that had submitted it
        convictor: Address,
        /// Block being built at commit
        block_number: u64,
    },
}
