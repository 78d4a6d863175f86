//! # Node Registry Service
//!
//! Orchestrates the node ledger and the blockhash registry.
//!
//! ## Concurrency
//!
//! The ledger and the commitment map sit behind one `RwLock`. Every
//! mutating operation holds the write lock for its whole duration, so
//! operations are serialized and never observe each other half-applied.
//!
//! ## Convict / Reveal
//!
//! ```text
//! convict(H(hash ‖ caller ‖ v ‖ r ‖ s))      block N
//!        │  at least one block later
//!        ▼
//! reveal_convict(signer, hash, header, sig)  block > N
//!   1. commitment known        5. header decodes
//!   2. block advanced          6. ground truth known
//!   3. signer slashable        7. hash != truth, header == truth
//!   4. signature recovers      8. slash, consume commitment
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use nr_01_header_codec::number_and_hash;
use nr_02_blockhash_registry::{BlockSource, BlockhashRegistry, HashStorage, InMemoryHashStorage};
use nr_03_node_ledger::{AssetLedger, LedgerError, Node, NodeLedger, SignerRecord, SlashOutcome, Stage};
use parking_lot::{Mutex, RwLock};
use shared_crypto::RecoverableSignature;
use shared_types::{Address, Hash, Timestamp, U256};
use tracing::{debug, info, warn};

use crate::adapters::Secp256k1Recovery;
use crate::config::RegistryConfig;
use crate::domain::{
    convict_commitment, registration_message, registry_id, ConvictCommitment, RegistryError,
    RegistryEvent, RemovalReason,
};
use crate::ports::{NodeRegistryApi, SignerRecovery};


/// Mutable registry state, guarded as one unit.
struct RegistryState<A: AssetLedger> {
    ledger: NodeLedger<A>,
    commitments: HashMap<Hash, ConvictCommitment>,
}

/// Node registry with deposit-backed registration and convict/reveal
/// slashing.
pub struct NodeRegistryService<
    B: BlockSource,
    A: AssetLedger,
    S: HashStorage = InMemoryHashStorage,
    R: SignerRecovery = Secp256k1Recovery,
> {
    config: RegistryConfig,
    address: Address,
    /// Deployment timestamp; origin of the deposit-cap and admin windows.
    deployed_at: Timestamp,
    registry_id: Hash,
    blockhashes: Arc<BlockhashRegistry<B, S>>,
    recovery: R,
    state: RwLock<RegistryState<A>>,
    events: Mutex<Vec<RegistryEvent>>,
}

impl<B, A, S> NodeRegistryService<B, A, S, Secp256k1Recovery>
where
    B: BlockSource,
    A: AssetLedger,
    S: HashStorage,
{
    /// Deploy a registry at `address` using secp256k1 recovery.
    pub fn new(
        config: RegistryConfig,
        address: Address,
        blockhashes: Arc<BlockhashRegistry<B, S>>,
        asset: Arc<A>,
    ) -> Result<Self, RegistryError> {
        Self::with_recovery(config, address, blockhashes, asset, Secp256k1Recovery)
    }
}

impl<B, A, S, R> NodeRegistryService<B, A, S, R>
where
    B: BlockSource,
    A: AssetLedger,
    S: HashStorage,
    R: SignerRecovery,
{
    /// Deploy a registry at `address` with a custom signature primitive.
    ///
    /// The latest block fixes the deployment timestamp and registry id.
    pub fn with_recovery(
        config: RegistryConfig,
        address: Address,
        blockhashes: Arc<BlockhashRegistry<B, S>>,
        asset: Arc<A>,
        recovery: R,
    ) -> Result<Self, RegistryError> {
        config.validate()?;

        let deployment = blockhashes.source().latest_block();
        let registry_id = registry_id(&address, &deployment.hash);

        info!(
            "[nr-04] registry deployed at block {} (id 0x{})",
            deployment.number,
            hex::encode(registry_id)
        );

        Ok(Self {
            config,
            address,
            deployed_at: deployment.timestamp,
            registry_id,
            blockhashes,
            recovery,
            state: RwLock::new(RegistryState {
                ledger: NodeLedger::new(address, asset),
                commitments: HashMap::new(),
            }),
            events: Mutex::new(Vec::new()),
        })
    }

    // =========================================================================
    // CONTEXT
    // =========================================================================

    /// Timestamp of the latest block.
    fn now(&self) -> Timestamp {
        self.blockhashes.source().latest_block().timestamp
    }

    fn since_deployment(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.deployed_at)
    }

    fn check_deposit(&self, deposit: U256, now: Timestamp) -> Result<(), RegistryError> {
        let capped = self.since_deployment(now) < self.config.deposit_cap_period_secs;
        if deposit < self.config.min_deposit
            || (capped && deposit > self.config.max_deposit_first_year)
        {
            return Err(RegistryError::DepositOutOfBounds { deposit });
        }
        Ok(())
    }

    fn emit(&self, event: RegistryEvent) {
        self.events.lock().push(event);
    }

    #[allow(clippy::too_many_arguments)]
    fn register(
        &self,
        owner: Address,
        signer: Address,
        url: &str,
        props: u64,
        weight: u32,
        deposit: U256,
    ) -> Result<usize, RegistryError> {
        let now = self.now();
        self.check_deposit(deposit, now)?;

        let mut state = self.state.write();
        let index = state
            .ledger
            .register_node(owner, signer, url, props, weight, deposit, now)?;

        self.emit(RegistryEvent::NodeRegistered {
            url: url.to_string(),
            signer,
            owner,
            deposit,
            props,
            weight,
        });
        Ok(index)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registry escrow address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Deployment timestamp.
    pub fn deployed_at(&self) -> Timestamp {
        self.deployed_at
    }

    /// Blockhash registry consulted for ground truth.
    pub fn blockhashes(&self) -> &Arc<BlockhashRegistry<B, S>> {
        &self.blockhashes
    }

    /// Node at `index` (indices change on removal).
    pub fn node(&self, index: usize) -> Option<Node> {
        self.state.read().ledger.node(index).cloned()
    }

    /// Active node of `signer`.
    pub fn node_by_signer(&self, signer: &Address) -> Option<Node> {
        self.state.read().ledger.node_by_signer(signer).cloned()
    }

    /// Active node registered under `url`.
    pub fn node_by_url(&self, url: &str) -> Option<Node> {
        self.state.read().ledger.node_by_url(url).cloned()
    }

    /// Current index of `signer`'s node.
    pub fn signer_index(&self, signer: &Address) -> Option<usize> {
        self.state.read().ledger.signer_index(signer)
    }

    /// Lifecycle record of `signer`.
    pub fn signer_record(&self, signer: &Address) -> SignerRecord {
        self.state.read().ledger.signer_record(signer)
    }

    /// Number of active nodes.
    pub fn total_nodes(&self) -> usize {
        self.state.read().ledger.total_nodes()
    }

    /// Slashed deposit kept by the registry.
    pub fn retained_penalties(&self) -> U256 {
        self.state.read().ledger.retained_penalties()
    }

    /// Pending commitment for `commitment`.
    pub fn commitment(&self, commitment: &Hash) -> Option<ConvictCommitment> {
        self.state.read().commitments.get(commitment).copied()
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&self) -> Vec<RegistryEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl<B, A, S, R> NodeRegistryApi for NodeRegistryService<B, A, S, R>
where
    B: BlockSource,
    A: AssetLedger,
    S: HashStorage,
    R: SignerRecovery,
{
    fn register_node(
        &self,
        caller: Address,
        url: &str,
        props: u64,
        weight: u32,
        deposit: U256,
    ) -> Result<usize, RegistryError> {
        self.register(caller, caller, url, props, weight, deposit)
    }

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
    ) -> Result<usize, RegistryError> {
        let message = registration_message(url, props, weight, &caller);
        let recovered = self
            .recovery
            .recover(&message, signature)
            .map_err(RegistryError::InvalidSignature)?;
        if recovered != signer {
            return Err(RegistryError::SignerMismatch {
                expected: signer,
                recovered,
            });
        }

        self.register(caller, signer, url, props, weight, deposit)
    }

    fn update_node(
        &self,
        caller: Address,
        signer: Address,
        url: &str,
        props: u64,
        weight: u32,
        additional_deposit: U256,
    ) -> Result<Hash, RegistryError> {
        let now = self.now();
        let mut state = self.state.write();

        // Bound the resulting deposit once ownership is established; other
        // failures are reported by the ledger.
        let record = state.ledger.signer_record(&signer);
        if record.owner == caller && record.stage == Stage::Active {
            if let Some(node) = state.ledger.node_by_signer(&signer) {
                let total = node
                    .deposit
                    .checked_add(additional_deposit)
                    .ok_or(LedgerError::ArithmeticOverflow)?;
                self.check_deposit(total, now)?;
            }
        }

        let proof_hash = state
            .ledger
            .update_node(caller, signer, url, props, weight, additional_deposit)?;

        if let Some(node) = state.ledger.node_by_signer(&signer) {
            self.emit(RegistryEvent::NodeUpdated {
                url: node.url.clone(),
                signer,
                deposit: node.deposit,
                props: node.props,
                weight: node.weight,
            });
        }
        Ok(proof_hash)
    }

    fn transfer_ownership(
        &self,
        caller: Address,
        signer: Address,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write();
        state.ledger.transfer_ownership(caller, signer, new_owner)?;

        self.emit(RegistryEvent::OwnershipChanged {
            signer,
            old_owner: caller,
            new_owner,
        });
        Ok(())
    }

    fn unregistering_node(
        &self,
        caller: Address,
        signer: Address,
    ) -> Result<Timestamp, RegistryError> {
        let now = self.now();
        let mut state = self.state.write();
        let locked_until = state.ledger.unregister_by_owner(
            caller,
            signer,
            now,
            self.config.unregister_lock_secs,
        )?;

        self.emit(RegistryEvent::NodeRemoved {
            signer,
            reason: RemovalReason::Owner,
            locked_until,
        });
        Ok(locked_until)
    }

    fn admin_remove_node_from_registry(
        &self,
        caller: Address,
        signer: Address,
    ) -> Result<Timestamp, RegistryError> {
        if caller != self.config.admin_key {
            return Err(RegistryError::NotAdmin);
        }
        let now = self.now();
        if self.since_deployment(now) >= self.config.admin_window_secs {
            return Err(RegistryError::AdminWindowExpired);
        }

        let mut state = self.state.write();
        if state.ledger.signer_record(&signer).stage != Stage::Active {
            return Err(LedgerError::NotFound(signer).into());
        }
        let locked_until =
            state
                .ledger
                .remove_to_unregistering(signer, now, self.config.unregister_lock_secs)?;

        warn!(
            "[nr-04] admin removed signer 0x{}",
            hex::encode(signer)
        );
        self.emit(RegistryEvent::NodeRemoved {
            signer,
            reason: RemovalReason::Admin,
            locked_until,
        });
        Ok(locked_until)
    }

    fn return_deposit(&self, caller: Address, signer: Address) -> Result<U256, RegistryError> {
        let now = self.now();
        let mut state = self.state.write();
        let owner = state.ledger.signer_record(&signer).owner;
        let amount = state.ledger.return_deposit(caller, signer, now)?;

        self.emit(RegistryEvent::DepositReturned {
            signer,
            owner,
            amount,
        });
        Ok(amount)
    }

    fn convict(&self, caller: Address, commitment: Hash) -> Result<u64, RegistryError> {
        let block_number = self.blockhashes.current_number();
        let ttl = self.config.commitment_ttl_blocks;
        let mut state = self.state.write();
        if let Some(previous) = state.commitments.get(&commitment).copied() {
            if !previous.is_expired(block_number, ttl) {
                return Err(RegistryError::DuplicateCommitment);
            }
            debug!(
                "[nr-04] replacing expired commitment from 0x{} (block {})",
                hex::encode(previous.convictor),
                previous.block_number
            );
        }
        state.commitments.insert(
            commitment,
            ConvictCommitment {
                block_number,
                convictor: caller,
            },
        );

        debug!("[nr-04] convict commitment recorded at block {}", block_number);
        self.emit(RegistryEvent::ConvictCommitted {
            commitment,
            block_number,
        });
        Ok(block_number)
    }

    fn reveal_convict(
        &self,
        caller: Address,
        signer: Address,
        signed_block_hash: Hash,
        block_header: &[u8],
        signature: &RecoverableSignature,
    ) -> Result<SlashOutcome, RegistryError> {
        let commitment = convict_commitment(&signed_block_hash, &caller, signature);
        let current = self.blockhashes.current_number();
        let mut state = self.state.write();

        // 1-2. commitment pending, at least one block old and not expired
        let pending = state
            .commitments
            .get(&commitment)
            .copied()
            .ok_or(RegistryError::UnknownCommitment)?;
        if current <= pending.block_number {
            return Err(RegistryError::TooEarly {
                committed_at: pending.block_number,
                current,
            });
        }
        if pending.is_expired(current, self.config.commitment_ttl_blocks) {
            state.commitments.remove(&commitment);
            info!(
                "[nr-04] commitment by 0x{} from block {} expired at {}",
                hex::encode(pending.convictor),
                pending.block_number,
                current
            );
            self.emit(RegistryEvent::ConvictExpired {
                commitment,
                convictor: pending.convictor,
                block_number: pending.block_number,
            });
            return Err(RegistryError::CommitmentExpired {
                committed_at: pending.block_number,
                current,
            });
        }

        // 3. signer still holds a slashable deposit
        match state.ledger.signer_record(&signer).stage {
            Stage::Convicted => return Err(LedgerError::AlreadyConvicted(signer).into()),
            Stage::Unused => return Err(LedgerError::NotFound(signer).into()),
            Stage::Active | Stage::Unregistering => {}
        }

        // 4. the accused really signed the hash
        let recovered = self
            .recovery
            .recover(&signed_block_hash, signature)
            .map_err(RegistryError::InvalidSignature)?;
        if recovered != signer {
            return Err(RegistryError::SignerMismatch {
                expected: signer,
                recovered,
            });
        }

        // 5-6. canonical hash for the revealed block
        let (number, block_hash) =
            number_and_hash(block_header).map_err(RegistryError::MalformedHeader)?;
        let truth = self
            .blockhashes
            .canonical_hash(number)?
            .ok_or(RegistryError::NoGroundTruth(number))?;

        // 7. fraud: signed a non-canonical hash, proven against canonical bytes
        if signed_block_hash == truth {
            return Err(RegistryError::NotFraudulent);
        }
        if block_hash != truth {
            return Err(RegistryError::ChainMismatch { number });
        }

        // 8. slash, then consume the commitment
        let outcome = state
            .ledger
            .slash(signer, caller, self.config.convictor_share_percent)?;
        state.commitments.remove(&commitment);

        warn!(
            "[nr-04] signer 0x{} convicted for block {}",
            hex::encode(signer),
            number
        );
        self.emit(RegistryEvent::NodeConvicted {
            signer,
            convictor: caller,
            reward: outcome.convictor_reward,
        });
        Ok(outcome)
    }

    fn registry_id(&self) -> Hash {
        self.registry_id
    }
}
