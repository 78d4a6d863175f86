//! # Node Ledger
//!
//! Authoritative node set and signer records, plus deposit bookkeeping.
//!
//! ## Ordering
//!
//! Every operation validates first, then performs its single external
//! transfer, then mutates. A failed transfer therefore leaves the ledger
//! untouched.
//!
//! ## Custody
//!
//! Deposits sit on the registry's account in the asset ledger. Returns and
//! slashing payouts move the exact per-signer amount, never a pooled figure.

use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{Address, Hash, Timestamp, U256, ZERO_ADDRESS};
use tracing::{info, warn};

use crate::domain::{LedgerError, Node, NodeSet, SignerRecord, Stage};
use crate::ports::AssetLedger;

/// How a slashed deposit was split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlashOutcome {
    /// Deposit that was slashed.
    pub total: U256,
    /// Paid to the convictor.
    pub convictor_reward: U256,
    /// Kept on the registry account.
    pub retained: U256,
}

/// Node set, signer records and escrow for one registry.
pub struct NodeLedger<A: AssetLedger> {
    /// Registry account in the asset ledger.
    registry: Address,
    asset: Arc<A>,
    nodes: NodeSet,
    signers: HashMap<Address, SignerRecord>,
    retained_penalties: U256,
}

impl<A: AssetLedger> NodeLedger<A> {
    /// Create an empty ledger whose escrow account is `registry`.
    pub fn new(registry: Address, asset: Arc<A>) -> Self {
        Self {
            registry,
            asset,
            nodes: NodeSet::new(),
            signers: HashMap::new(),
            retained_penalties: U256::zero(),
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Register a node and pull `deposit` from `owner`.
    ///
    /// Returns the node's index.
    #[allow(clippy::too_many_arguments)]
    pub fn register_node(
        &mut self,
        owner: Address,
        signer: Address,
        url: &str,
        props: u64,
        weight: u32,
        deposit: U256,
        now: Timestamp,
    ) -> Result<usize, LedgerError> {
        if url.is_empty() {
            return Err(LedgerError::EmptyUrl);
        }
        if self.nodes.contains_url(url) {
            return Err(LedgerError::DuplicateUrl(url.to_string()));
        }
        if self.signer_record(&signer).stage != Stage::Unused {
            return Err(LedgerError::DuplicateSigner(signer));
        }
        if owner == ZERO_ADDRESS {
            return Err(LedgerError::InvalidOwner);
        }

        self.asset
            .transfer_from(&self.registry, &owner, &self.registry, deposit)?;

        let index = self
            .nodes
            .insert(Node::new(url.to_string(), signer, deposit, props, weight, now));
        self.signers.insert(signer, SignerRecord::active(owner));

        info!(
            "[nr-03] registered node {} (index {}, deposit {})",
            url, index, deposit
        );
        Ok(index)
    }

    /// Update an active node's attributes and top up its deposit.
    ///
    /// Returns the new proof hash.
    pub fn update_node(
        &mut self,
        caller: Address,
        signer: Address,
        url: &str,
        props: u64,
        weight: u32,
        deposit_delta: U256,
    ) -> Result<Hash, LedgerError> {
        self.require_owner_in_stage(&caller, &signer, Stage::Active)?;
        if url.is_empty() {
            return Err(LedgerError::EmptyUrl);
        }

        let mut node = self
            .nodes
            .by_signer(&signer)
            .cloned()
            .ok_or(LedgerError::NotFound(signer))?;

        if node.url != url && self.nodes.contains_url(url) {
            return Err(LedgerError::DuplicateUrl(url.to_string()));
        }
        let deposit = node
            .deposit
            .checked_add(deposit_delta)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        if !deposit_delta.is_zero() {
            self.asset
                .transfer_from(&self.registry, &caller, &self.registry, deposit_delta)?;
        }

        node.url = url.to_string();
        node.props = props;
        node.weight = weight;
        node.deposit = deposit;
        node.refresh_proof_hash();
        let proof_hash = node.proof_hash;
        self.nodes.replace(node);

        info!("[nr-03] updated node {} (deposit {})", url, deposit);
        Ok(proof_hash)
    }

    /// Move an active signer to `Unregistering`, escrowing its deposit
    /// until `now + lock_secs`.
    ///
    /// Returns the unlock time.
    pub fn remove_to_unregistering(
        &mut self,
        signer: Address,
        now: Timestamp,
        lock_secs: u64,
    ) -> Result<Timestamp, LedgerError> {
        let record = self.signer_record(&signer);
        match record.stage {
            Stage::Active => {}
            Stage::Unused => return Err(LedgerError::NotFound(signer)),
            actual => {
                return Err(LedgerError::WrongStage {
                    expected: Stage::Active,
                    actual,
                })
            }
        }
        let locked_time = now
            .checked_add(lock_secs)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let node = self
            .nodes
            .swap_remove(&signer)
            .ok_or(LedgerError::NotFound(signer))?;

        self.signers.insert(
            signer,
            SignerRecord {
                owner: record.owner,
                stage: Stage::Unregistering,
                deposit_amount: node.deposit,
                locked_time,
            },
        );

        info!(
            "[nr-03] node {} unregistering, deposit {} locked until {}",
            node.url, node.deposit, locked_time
        );
        Ok(locked_time)
    }

    /// Owner-initiated removal.
    pub fn unregister_by_owner(
        &mut self,
        caller: Address,
        signer: Address,
        now: Timestamp,
        lock_secs: u64,
    ) -> Result<Timestamp, LedgerError> {
        self.require_owner_in_stage(&caller, &signer, Stage::Active)?;
        self.remove_to_unregistering(signer, now, lock_secs)
    }

    /// Slash an active or unregistering signer.
    ///
    /// `convictor_share_percent` of the deposit goes to `convictor`; the rest
    /// stays on the registry account as a retained penalty.
    pub fn slash(
        &mut self,
        signer: Address,
        convictor: Address,
        convictor_share_percent: u8,
    ) -> Result<SlashOutcome, LedgerError> {
        let record = self.signer_record(&signer);
        let total = match record.stage {
            Stage::Active => self
                .nodes
                .by_signer(&signer)
                .map(|node| node.deposit)
                .ok_or(LedgerError::NotFound(signer))?,
            Stage::Unregistering => record.deposit_amount,
            Stage::Convicted => return Err(LedgerError::AlreadyConvicted(signer)),
            Stage::Unused => return Err(LedgerError::NotFound(signer)),
        };

        let convictor_reward = total
            .checked_mul(U256::from(convictor_share_percent.min(100)))
            .ok_or(LedgerError::ArithmeticOverflow)?
            / U256::from(100u8);
        let retained = total - convictor_reward;
        let retained_penalties = self
            .retained_penalties
            .checked_add(retained)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        if !convictor_reward.is_zero() {
            self.asset
                .transfer(&self.registry, &convictor, convictor_reward)?;
        }

        self.nodes.swap_remove(&signer);
        self.signers.insert(
            signer,
            SignerRecord {
                owner: record.owner,
                stage: Stage::Convicted,
                deposit_amount: U256::zero(),
                locked_time: 0,
            },
        );
        self.retained_penalties = retained_penalties;

        warn!(
            "[nr-03] signer 0x{} convicted: {} slashed, {} to convictor",
            hex::encode(signer),
            total,
            convictor_reward
        );
        Ok(SlashOutcome {
            total,
            convictor_reward,
            retained,
        })
    }

    /// Pay an unregistering signer's escrow back to its owner once unlocked.
    ///
    /// The record is reset to `Unused`.
    pub fn return_deposit(
        &mut self,
        caller: Address,
        signer: Address,
        now: Timestamp,
    ) -> Result<U256, LedgerError> {
        let record = self.require_owner_in_stage(&caller, &signer, Stage::Unregistering)?;
        if now < record.locked_time {
            return Err(LedgerError::LockNotElapsed {
                locked_until: record.locked_time,
                now,
            });
        }

        let amount = record.deposit_amount;
        if !amount.is_zero() {
            self.asset.transfer(&self.registry, &record.owner, amount)?;
        }
        self.signers.insert(signer, SignerRecord::default());

        info!(
            "[nr-03] returned deposit {} for signer 0x{}",
            amount,
            hex::encode(signer)
        );
        Ok(amount)
    }

    /// Hand an active registration to `new_owner`.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        signer: Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        if new_owner == ZERO_ADDRESS {
            return Err(LedgerError::InvalidOwner);
        }
        let mut record = self.require_owner_in_stage(&caller, &signer, Stage::Active)?;
        record.owner = new_owner;
        self.signers.insert(signer, record);

        info!(
            "[nr-03] ownership of signer 0x{} transferred",
            hex::encode(signer)
        );
        Ok(())
    }

    /// Check `caller` owns `signer` and the signer is in `stage`.
    fn require_owner_in_stage(
        &self,
        caller: &Address,
        signer: &Address,
        stage: Stage,
    ) -> Result<SignerRecord, LedgerError> {
        let record = self.signer_record(signer);
        if record.stage == Stage::Unused {
            return Err(LedgerError::NotFound(*signer));
        }
        if record.owner != *caller {
            return Err(LedgerError::NotOwner);
        }
        if record.stage != stage {
            return Err(LedgerError::WrongStage {
                expected: stage,
                actual: record.stage,
            });
        }
        Ok(record)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Registry escrow account.
    pub fn registry_address(&self) -> Address {
        self.registry
    }

    /// Asset ledger handle.
    pub fn asset(&self) -> &Arc<A> {
        &self.asset
    }

    /// Node at `index`.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Active node of `signer`.
    pub fn node_by_signer(&self, signer: &Address) -> Option<&Node> {
        self.nodes.by_signer(signer)
    }

    /// Active node registered under `url`.
    pub fn node_by_url(&self, url: &str) -> Option<&Node> {
        self.nodes.by_url(url)
    }

    /// Index of `signer`'s active node.
    pub fn signer_index(&self, signer: &Address) -> Option<usize> {
        self.nodes.index_of_signer(signer)
    }

    /// Record of `signer`; the unused record if it never registered.
    pub fn signer_record(&self, signer: &Address) -> SignerRecord {
        self.signers.get(signer).cloned().unwrap_or_default()
    }

    /// Number of active nodes.
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Active nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Slashed deposit kept on the registry account so far.
    pub fn retained_penalties(&self) -> U256 {
        self.retained_penalties
    }
}
