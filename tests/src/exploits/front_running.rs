//! # Front-Running the Convictor
//!
//! A watcher sees a convictor's evidence and tries to claim the reward
//! first. The commitment binds the convictor's address, and a reveal is
//! only accepted in a block after its commitment and before it expires.

#[cfg(test)]
mod tests {
    use crate::fixtures::{random_hash, Actor, Network};
    use nr_02_blockhash_registry::BlockhashConfig;
    use nr_03_node_ledger::AssetLedger;
    use nr_04_registry_protocol::{
        convict_commitment, NodeRegistryApi, RegistryConfig, RegistryError,
    };
    use shared_types::{tokens, U256};

    #[test]
    fn test_copied_reveal_without_commitment() {
        let net = Network::deploy();
        let signer = Actor::from_seed(1);
        let victim = Actor::from_seed(2).address();
        let attacker = Actor::from_seed(3).address();
        net.register(&signer, "https://liar", 10);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&victim, &fake, &signature).unwrap();
        net.chain.mine();

        // Attacker replays the victim's reveal parameters under its own name.
        let err = net
            .reveal(&attacker, &signer.address(), fake, 30, &signature)
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownCommitment);

        net.reveal(&victim, &signer.address(), fake, 30, &signature)
            .unwrap();
        assert_eq!(net.asset.balance_of(&victim), tokens(5));
        assert_eq!(net.asset.balance_of(&attacker), U256::zero());
    }

    #[test]
    fn test_late_commitment_cannot_reveal_in_same_block() {
        let net = Network::deploy();
        let signer = Actor::from_seed(4);
        let victim = Actor::from_seed(5).address();
        let attacker = Actor::from_seed(6).address();
        net.register(&signer, "https://liar", 10);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&victim, &fake, &signature).unwrap();
        net.chain.mine();

        // The evidence leaks when the victim reveals; the attacker commits
        // and reveals inside that block.
        let committed_at = net.commit(&attacker, &fake, &signature).unwrap();
        let err = net
            .reveal(&attacker, &signer.address(), fake, 30, &signature)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::TooEarly {
                committed_at,
                current: committed_at
            }
        );

        net.reveal(&victim, &signer.address(), fake, 30, &signature)
            .unwrap();
        assert_eq!(net.asset.balance_of(&attacker), U256::zero());
    }

    #[test]
    fn test_stolen_commitment_still_pays_original_convictor() {
        let net = Network::deploy();
        let signer = Actor::from_seed(7);
        let victim = Actor::from_seed(8).address();
        let attacker = Actor::from_seed(9).address();
        net.register(&signer, "https://liar", 10);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        let commitment = convict_commitment(&fake, &victim, &signature);

        // Attacker copies the pending commitment and lands it first.
        net.registry.convict(attacker, commitment).unwrap();
        assert_eq!(
            net.registry.convict(victim, commitment).unwrap_err(),
            RegistryError::DuplicateCommitment
        );
        net.chain.mine();

        // The hash is bound to the victim, so only the victim can open it.
        let err = net
            .reveal(&attacker, &signer.address(), fake, 30, &signature)
            .unwrap_err();
        assert_eq!(err, RegistryError::UnknownCommitment);

        net.reveal(&victim, &signer.address(), fake, 30, &signature)
            .unwrap();
        assert_eq!(net.asset.balance_of(&victim), tokens(5));
        assert_eq!(net.asset.balance_of(&attacker), U256::zero());
    }

    #[test]
    fn test_squatted_commitment_expires_and_is_renewed() {
        let net = Network::deploy_with(
            BlockhashConfig::for_testing(),
            RegistryConfig {
                commitment_ttl_blocks: 8,
                ..RegistryConfig::for_testing()
            },
        );
        let signer = Actor::from_seed(10);
        let victim = Actor::from_seed(11).address();
        let attacker = Actor::from_seed(12).address();
        net.register(&signer, "https://liar", 10);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        let commitment = convict_commitment(&fake, &victim, &signature);

        // Attacker parks the victim's commitment and lets it go stale.
        net.registry.convict(attacker, commitment).unwrap();
        for _ in 0..9 {
            net.chain.mine();
        }

        let renewed_at = net.commit(&victim, &fake, &signature).unwrap();
        let pending = net.registry.commitment(&commitment).unwrap();
        assert_eq!(pending.convictor, victim);
        assert_eq!(pending.block_number, renewed_at);
        net.chain.mine();

        net.reveal(&victim, &signer.address(), fake, 30, &signature)
            .unwrap();
        assert_eq!(net.asset.balance_of(&victim), tokens(5));
        assert_eq!(net.asset.balance_of(&attacker), U256::zero());
    }
}
