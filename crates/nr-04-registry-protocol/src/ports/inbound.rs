//! # Inbound Ports (Driving Ports)
//!
//! The state-changing surface of the registry. Every call names its
//! `caller` explicitly; time and block number come from the block source.

use crate::domain::RegistryError;
use nr_03_node_ledger::SlashOutcome;
use shared_crypto::RecoverableSignature;
use shared_types::{Address, Hash, Timestamp, U256};

/// Node registry operations.
pub trait NodeRegistryApi {
    /// Register a node signed by the caller itself. Returns the node index.
    fn register_node(
        &self,
        caller: Address,
        url: &str,
        props: u64,
        weight: u32,
        deposit: U256,
    ) -> Result<usize, RegistryError>;

    /// Register a node on behalf of `signer`, authorized by its signature
    /// over `(url, props, weight, caller)`. The caller becomes owner.
    #[allow(clippy::too_many_arguments)]
    fn register_node_for(
        &self,
        caller: Address,
        url: &str,
        props: u64,
        signer: Address,
        weight: u32,
        deposit: U256,
        signature: &RecoverableSignature,
    ) -> Result<usize, RegistryError>;

    /// Change url, props and weight; add `additional_deposit`. Returns the
    /// new proof hash.
    fn update_node(
        &self,
        caller: Address,
        signer: Address,
        url: &str,
        props: u64,
        weight: u32,
        additional_deposit: U256,
    ) -> Result<Hash, RegistryError>;

    /// Hand the registration to `new_owner`.
    fn transfer_ownership(
        &self,
        caller: Address,
        signer: Address,
        new_owner: Address,
    ) -> Result<(), RegistryError>;

    /// Owner-initiated removal. Returns the unlock time.
    fn unregistering_node(&self, caller: Address, signer: Address)
        -> Result<Timestamp, RegistryError>;

    /// Admin removal during the admin window. Returns the unlock time.
    fn admin_remove_node_from_registry(
        &self,
        caller: Address,
        signer: Address,
    ) -> Result<Timestamp, RegistryError>;

    /// Pay back an unlocked escrow. Returns the amount.
    fn return_deposit(&self, caller: Address, signer: Address) -> Result<U256, RegistryError>;

    /// Record a convict commitment. Returns the block number recorded.
    ///
    /// A pending duplicate is rejected unless it has expired, in which case
    /// it is replaced.
    fn convict(&self, caller: Address, commitment: Hash) -> Result<u64, RegistryError>;

    /// Reveal a committed accusation and slash on proven fraud.
    ///
    /// An expired commitment is dropped and the reveal fails.
    fn reveal_convict(
        &self,
        caller: Address,
        signer: Address,
        signed_block_hash: Hash,
        block_header: &[u8],
        signature: &RecoverableSignature,
    ) -> Result<SlashOutcome, RegistryError>;

    /// Identifier fixed at construction.
    fn registry_id(&self) -> Hash;
}
