//! # Node Lifecycle
//!
//! ```text
//! register ──▶ update ──▶ transfer ──▶ unregister ──(40 days)──▶ return
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{Actor, Network, REGISTRY};
    use nr_02_blockhash_registry::BlockSource;
    use nr_03_node_ledger::{AssetLedger, LedgerError, Stage};
    use nr_04_registry_protocol::{NodeRegistryApi, RegistryError, RegistryEvent, RemovalReason};
    use shared_types::{tokens, U256, SECONDS_PER_DAY};

    #[test]
    fn test_full_lifecycle_returns_deposit_to_new_owner() {
        let net = Network::deploy();
        let node = Actor::from_seed(1);
        let buyer = Actor::from_seed(2);

        net.register(&node, "https://rpc.node", 20);
        net.registry
            .update_node(node.address(), node.address(), "https://rpc.node/v2", 0b101, 3, tokens(5))
            .unwrap();
        net.registry
            .transfer_ownership(node.address(), node.address(), buyer.address())
            .unwrap();

        let locked_until = net
            .registry
            .unregistering_node(buyer.address(), node.address())
            .unwrap();
        net.chain.advance_time(40 * SECONDS_PER_DAY);
        assert!(net.chain.latest_block().timestamp >= locked_until);

        let amount = net
            .registry
            .return_deposit(buyer.address(), node.address())
            .unwrap();
        assert_eq!(amount, tokens(25));
        assert_eq!(net.asset.balance_of(&buyer.address()), tokens(25));
        assert_eq!(net.asset.balance_of(&REGISTRY), U256::zero());

        let events = net.registry.drain_events();
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                RegistryEvent::NodeRegistered { .. } => "registered",
                RegistryEvent::NodeUpdated { .. } => "updated",
                RegistryEvent::OwnershipChanged { .. } => "owner",
                RegistryEvent::NodeRemoved { reason: RemovalReason::Owner, .. } => "removed",
                RegistryEvent::DepositReturned { .. } => "returned",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["registered", "updated", "owner", "removed", "returned"]);
    }

    #[test]
    fn test_swap_remove_keeps_lookups_consistent() {
        let net = Network::deploy();
        let actors: Vec<Actor> = (1..=4).map(Actor::from_seed).collect();
        for (i, actor) in actors.iter().enumerate() {
            assert_eq!(net.register(actor, &format!("https://node/{}", i), 1), i);
        }

        net.registry
            .unregistering_node(actors[1].address(), actors[1].address())
            .unwrap();

        assert_eq!(net.registry.total_nodes(), 3);
        assert_eq!(net.registry.signer_index(&actors[3].address()), Some(1));
        assert_eq!(net.registry.node(1).unwrap().url, "https://node/3");
        assert!(net.registry.node_by_url("https://node/1").is_none());

        // The url is free again.
        let newcomer = Actor::from_seed(9);
        assert_eq!(net.register(&newcomer, "https://node/1", 1), 3);
    }

    #[test]
    fn test_delegated_registration_owner_controls_node() {
        let net = Network::deploy();
        let operator = Actor::from_seed(3);
        let hosted = Actor::from_seed(4);

        net.register_for(&operator.address(), &hosted, "https://hosted", 10);
        assert_eq!(net.registry.signer_record(&hosted.address()).owner, operator.address());

        let err = net
            .registry
            .unregistering_node(hosted.address(), hosted.address())
            .unwrap_err();
        assert_eq!(err, RegistryError::Ledger(LedgerError::NotOwner));

        net.registry
            .unregistering_node(operator.address(), hosted.address())
            .unwrap();
        assert_eq!(
            net.registry.signer_record(&hosted.address()).stage,
            Stage::Unregistering
        );
    }

    #[test]
    fn test_unregistering_signer_cannot_reregister_until_returned() {
        let net = Network::deploy();
        let node = Actor::from_seed(5);
        net.register(&node, "https://first", 1);
        net.registry
            .unregistering_node(node.address(), node.address())
            .unwrap();

        let err = net
            .registry
            .register_node(node.address(), "https://second", 0, 1, tokens(1))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Ledger(LedgerError::DuplicateSigner(_))));
    }
}
