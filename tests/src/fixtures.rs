//! # Test Fixtures
//!
//! A registry deployed on an in-memory chain with funded accounts.

use std::sync::{Arc, Once};

use nr_02_blockhash_registry::{BlockhashConfig, BlockhashRegistry, InMemoryChain};
use nr_03_node_ledger::{AssetLedger, InMemoryAssetLedger, SlashOutcome};
use nr_04_registry_protocol::{
    convict_commitment, registration_message, NodeRegistryApi, NodeRegistryService,
    RegistryConfig, RegistryError,
};
use shared_crypto::{RecoverableSignature, Secp256k1KeyPair};
use shared_types::{tokens, Address, Hash};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Escrow address of the deployed registry.
pub const REGISTRY: Address = [0xee; 20];

/// Genesis timestamp of every test chain.
pub const GENESIS_TIME: u64 = 1_600_000_000;

/// Blocks mined before deployment.
pub const PRE_DEPLOY_BLOCKS: u64 = 32;

/// Registry wired to in-memory chain and assets.
pub type Registry = NodeRegistryService<InMemoryChain, InMemoryAssetLedger>;

static TRACING: Once = Once::new();

/// Install a log subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A funded participant.
pub struct Actor {
    /// Signing key; its address is the actor's account.
    pub key: Secp256k1KeyPair,
}

impl Actor {
    /// Deterministic actor from a one-byte seed.
    pub fn from_seed(seed: u8) -> Self {
        Self {
            key: Secp256k1KeyPair::from_bytes([seed; 32]).unwrap(),
        }
    }

    /// Account address.
    pub fn address(&self) -> Address {
        self.key.address()
    }

    /// Sign `hash`.
    pub fn sign(&self, hash: &Hash) -> RecoverableSignature {
        self.key.sign_hash(hash).unwrap()
    }
}

/// A deployed registry and its environment.
pub struct Network {
    /// Block source.
    pub chain: Arc<InMemoryChain>,
    /// Blockhash registry shared with the node registry.
    pub blockhashes: Arc<BlockhashRegistry<InMemoryChain>>,
    /// Deposit asset.
    pub asset: Arc<InMemoryAssetLedger>,
    /// Node registry under test.
    pub registry: Registry,
}

impl Network {
    /// Deploy with the testing configurations.
    pub fn deploy() -> Self {
        Self::deploy_with(BlockhashConfig::for_testing(), RegistryConfig::for_testing())
    }

    /// Deploy with explicit configurations.
    pub fn deploy_with(blockhash_config: BlockhashConfig, config: RegistryConfig) -> Self {
        init_tracing();
        let chain = Arc::new(InMemoryChain::with_blocks(GENESIS_TIME, PRE_DEPLOY_BLOCKS));
        let blockhashes = Arc::new(BlockhashRegistry::new_in_memory(
            blockhash_config,
            Arc::clone(&chain),
        ));
        let asset = Arc::new(InMemoryAssetLedger::new());
        let registry = NodeRegistryService::new(
            config,
            REGISTRY,
            Arc::clone(&blockhashes),
            Arc::clone(&asset),
        )
        .unwrap();
        debug!("[nr-tests] registry deployed at block {}", PRE_DEPLOY_BLOCKS);

        Self {
            chain,
            blockhashes,
            asset,
            registry,
        }
    }

    /// Mint 1000 tokens to `account` and approve them to the registry.
    pub fn fund(&self, account: &Address) {
        self.asset.mint(account, tokens(1_000));
        self.asset
            .approve(account, &REGISTRY, tokens(1_000))
            .unwrap();
    }

    /// Fund and self-register `actor` with a deposit in whole tokens.
    pub fn register(&self, actor: &Actor, url: &str, deposit: u64) -> usize {
        self.fund(&actor.address());
        self.registry
            .register_node(actor.address(), url, 0, 1, tokens(deposit))
            .unwrap()
    }

    /// Fund `owner` and register `signer` on its behalf.
    pub fn register_for(&self, owner: &Address, signer: &Actor, url: &str, deposit: u64) -> usize {
        self.fund(owner);
        let signature = signer.sign(&registration_message(url, 0, 1, owner));
        self.registry
            .register_node_for(*owner, url, 0, signer.address(), 1, tokens(deposit), &signature)
            .unwrap()
    }

    /// Record the commitment for `signature` over `hash` as `convictor`.
    pub fn commit(
        &self,
        convictor: &Address,
        hash: &Hash,
        signature: &RecoverableSignature,
    ) -> Result<u64, RegistryError> {
        self.registry
            .convict(*convictor, convict_commitment(hash, convictor, signature))
    }

    /// Reveal against the canonical header of block `number`.
    pub fn reveal(
        &self,
        convictor: &Address,
        signer: &Address,
        hash: Hash,
        number: u64,
        signature: &RecoverableSignature,
    ) -> Result<SlashOutcome, RegistryError> {
        let header = self.chain.raw_header(number).unwrap();
        self.registry
            .reveal_convict(*convictor, *signer, hash, &header, signature)
    }
}

/// A random 32-byte hash.
pub fn random_hash() -> Hash {
    rand::random()
}
