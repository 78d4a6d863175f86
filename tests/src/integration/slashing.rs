//! # Slashing Flows
//!
//! ```text
//! [Signer] ──signs wrong hash──▶ [Convictor]
//!                                    │ convict(commitment)      block N
//!                                    │ reveal_convict(...)      block > N
//!                                    ▼
//!                      [Node Registry] ──canonical hash──▶ [Blockhash Registry]
//!                                    │
//!                                    ▼
//!                      [Node Ledger] slash: reward to convictor, rest retained
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{random_hash, Actor, Network, REGISTRY};
    use nr_02_blockhash_registry::{BlockSource, BlockhashConfig};
    use nr_03_node_ledger::{AssetLedger, LedgerError, Stage};
    use nr_04_registry_protocol::{RegistryConfig, RegistryError, RegistryEvent};
    use shared_types::{tokens, U256};

    #[test]
    fn test_slash_splits_deposit_evenly() {
        let net = Network::deploy();
        let signer = Actor::from_seed(1);
        let convictor = Actor::from_seed(2).address();
        net.register(&signer, "https://liar", 40);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&convictor, &fake, &signature).unwrap();
        net.chain.mine();

        let outcome = net
            .reveal(&convictor, &signer.address(), fake, 30, &signature)
            .unwrap();
        assert_eq!(outcome.convictor_reward, tokens(20));
        assert_eq!(outcome.retained, tokens(20));

        assert_eq!(net.asset.balance_of(&convictor), tokens(20));
        assert_eq!(net.asset.balance_of(&REGISTRY), tokens(20));
        assert_eq!(net.registry.retained_penalties(), tokens(20));
        assert_eq!(net.registry.total_nodes(), 0);
        assert!(net.registry.node_by_url("https://liar").is_none());
    }

    #[test]
    fn test_delegated_node_slash_pays_convictor_not_owner() {
        let net = Network::deploy();
        let owner = Actor::from_seed(3).address();
        let signer = Actor::from_seed(4);
        let convictor = Actor::from_seed(5).address();
        net.register_for(&owner, &signer, "https://hosted", 10);
        let owner_balance = net.asset.balance_of(&owner);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&convictor, &fake, &signature).unwrap();
        net.chain.mine();
        net.reveal(&convictor, &signer.address(), fake, 25, &signature)
            .unwrap();

        assert_eq!(net.asset.balance_of(&owner), owner_balance);
        assert_eq!(net.asset.balance_of(&convictor), tokens(5));
        assert_eq!(net.registry.signer_record(&signer.address()).stage, Stage::Convicted);
    }

    #[test]
    fn test_competing_convictors_first_reveal_wins() {
        let net = Network::deploy();
        let signer = Actor::from_seed(6);
        let alice = Actor::from_seed(7).address();
        let bob = Actor::from_seed(8).address();
        net.register(&signer, "https://liar", 10);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&alice, &fake, &signature).unwrap();
        net.commit(&bob, &fake, &signature).unwrap();
        net.chain.mine();

        net.reveal(&bob, &signer.address(), fake, 30, &signature)
            .unwrap();
        let err = net
            .reveal(&alice, &signer.address(), fake, 30, &signature)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Ledger(LedgerError::AlreadyConvicted(_))));
        assert_eq!(net.asset.balance_of(&alice), U256::zero());
    }

    #[test]
    fn test_honest_signer_survives_accusation() {
        let net = Network::deploy();
        let signer = Actor::from_seed(9);
        let convictor = Actor::from_seed(10).address();
        net.register(&signer, "https://honest", 10);

        let truth = net.chain.block(30).unwrap().hash;
        let signature = signer.sign(&truth);
        net.commit(&convictor, &truth, &signature).unwrap();
        net.chain.mine();

        let err = net
            .reveal(&convictor, &signer.address(), truth, 30, &signature)
            .unwrap_err();
        assert_eq!(err, RegistryError::NotFraudulent);
        assert_eq!(net.registry.signer_record(&signer.address()).stage, Stage::Active);
        assert_eq!(net.asset.balance_of(&REGISTRY), tokens(10));
    }

    #[test]
    fn test_full_share_to_convictor() {
        let config = RegistryConfig {
            convictor_share_percent: 100,
            ..RegistryConfig::for_testing()
        };
        let net = Network::deploy_with(BlockhashConfig::for_testing(), config);
        let signer = Actor::from_seed(13);
        let convictor = Actor::from_seed(14).address();
        net.register(&signer, "https://liar", 8);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&convictor, &fake, &signature).unwrap();
        net.chain.mine();
        let outcome = net
            .reveal(&convictor, &signer.address(), fake, 31, &signature)
            .unwrap();

        assert_eq!(outcome.convictor_reward, tokens(8));
        assert_eq!(outcome.retained, U256::zero());
        assert_eq!(net.registry.retained_penalties(), U256::zero());
    }

    #[test]
    fn test_conviction_emits_events() {
        let net = Network::deploy();
        let signer = Actor::from_seed(15);
        let convictor = Actor::from_seed(16).address();
        net.register(&signer, "https://liar", 2);
        net.registry.drain_events();

        let fake = random_hash();
        let signature = signer.sign(&fake);
        let committed_at = net.commit(&convictor, &fake, &signature).unwrap();
        net.chain.mine();
        net.reveal(&convictor, &signer.address(), fake, 30, &signature)
            .unwrap();

        let events = net.registry.drain_events();
        assert!(matches!(
            events.as_slice(),
            [
                RegistryEvent::ConvictCommitted { block_number, .. },
                RegistryEvent::NodeConvicted { reward, .. },
            ] if *block_number == committed_at && *reward == tokens(1)
        ));
    }
}
