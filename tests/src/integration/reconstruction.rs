//! # Blockhash Reconstruction
//!
//! Extending the stored table backward from a snapshot anchor, in several
//! passes, and convicting against the reconstructed hashes.

#[cfg(test)]
mod tests {
    use crate::fixtures::{random_hash, Actor, Network, GENESIS_TIME};
    use nr_02_blockhash_registry::{
        BlockSource, BlockhashConfig, BlockhashError, BlockhashEvent, BlockhashRegistry,
        InMemoryChain,
    };
    use proptest::prelude::*;
    use shared_types::tokens;
    use std::sync::Arc;

    #[test]
    fn test_two_pass_reconstruction_reaches_genesis() {
        let net = Network::deploy();
        let (anchor, _) = net.blockhashes.snapshot().unwrap();
        assert_eq!(anchor, 32);

        let first = net.chain.headers_descending(anchor, 20);
        let oldest = net.blockhashes.recreate_blockheaders(anchor, &first).unwrap();
        assert_eq!(oldest, net.chain.block(12).unwrap().hash);
        assert_eq!(net.blockhashes.search_for_available_block(1, 20).unwrap(), 12);

        let second = net.chain.headers_descending(12, 12);
        let genesis = net.blockhashes.recreate_blockheaders(12, &second).unwrap();
        assert_eq!(genesis, net.chain.block(0).unwrap().hash);

        for number in 0..=anchor {
            assert_eq!(
                net.blockhashes.blockhash(number).unwrap(),
                Some(net.chain.block(number).unwrap().hash),
                "block {}",
                number
            );
        }

        let added = net
            .blockhashes
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, BlockhashEvent::BlockhashAdded { .. }))
            .count();
        assert_eq!(added, 33);
    }

    #[test]
    fn test_swapped_headers_rejected_atomically() {
        let net = Network::deploy();
        let (anchor, _) = net.blockhashes.snapshot().unwrap();

        let mut headers = net.chain.headers_descending(anchor, 5);
        headers.swap(1, 2);
        let err = net
            .blockhashes
            .recreate_blockheaders(anchor, &headers)
            .unwrap_err();
        assert_eq!(err, BlockhashError::ChainMismatch { index: 1 });
        assert_eq!(net.blockhashes.blockhash(anchor - 1).unwrap(), None);
    }

    #[test]
    fn test_missing_anchor() {
        let net = Network::deploy();
        let headers = net.chain.headers_descending(20, 4);
        let err = net
            .blockhashes
            .recreate_blockheaders(20, &headers)
            .unwrap_err();
        assert_eq!(err, BlockhashError::NoSnapshotAnchor(20));
    }

    #[test]
    fn test_empty_search_range() {
        let net = Network::deploy();
        net.blockhashes.snapshot().unwrap();
        assert_eq!(net.blockhashes.search_for_available_block(32, 0).unwrap(), 0);
        assert_eq!(net.blockhashes.search_for_available_block(30, 5).unwrap(), 32);
    }

    #[test]
    fn test_conviction_against_reconstructed_block() {
        let net = Network::deploy();
        let signer = Actor::from_seed(11);
        let convictor = Actor::from_seed(12).address();
        net.register(&signer, "https://deep", 30);

        let fake = random_hash();
        let signature = signer.sign(&fake);
        net.commit(&convictor, &fake, &signature).unwrap();
        net.chain.mine();

        // Block 3 is far outside the direct window.
        assert!(net.reveal(&convictor, &signer.address(), fake, 3, &signature).is_err());

        let (anchor, _) = net.blockhashes.snapshot().unwrap();
        let headers = net.chain.headers_descending(anchor, (anchor - 3) as usize);
        net.blockhashes.recreate_blockheaders(anchor, &headers).unwrap();

        let outcome = net
            .reveal(&convictor, &signer.address(), fake, 3, &signature)
            .unwrap();
        assert_eq!(outcome.convictor_reward, tokens(15));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_reconstruction_matches_chain(length in 2u64..60, depth_seed in any::<u64>()) {
            let chain = Arc::new(InMemoryChain::with_blocks(GENESIS_TIME, length));
            let registry = BlockhashRegistry::new_in_memory(BlockhashConfig::for_testing(), Arc::clone(&chain));
            let (anchor, _) = registry.snapshot().unwrap();
            let depth = 1 + depth_seed % anchor;

            let headers = chain.headers_descending(anchor, depth as usize);
            registry.recreate_blockheaders(anchor, &headers).unwrap();

            for number in (anchor - depth)..=anchor {
                prop_assert_eq!(registry.blockhash(number).unwrap(), Some(chain.block(number).unwrap().hash));
            }
            if anchor > depth {
                prop_assert_eq!(registry.blockhash(anchor - depth - 1).unwrap(), None);
            }
        }
    }
}
