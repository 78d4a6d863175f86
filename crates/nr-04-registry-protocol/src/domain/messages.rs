//! # Signed Messages and Commitments
//!
//! Tightly packed keccak256 preimages, integers big-endian.

use shared_crypto::{keccak256_concat, RecoverableSignature};
use shared_types::{Address, Hash};

/// Message a signer signs to let `owner` register it:
/// `keccak256(url ‖ props ‖ weight ‖ owner)`.
pub fn registration_message(url: &str, props: u64, weight: u32, owner: &Address) -> Hash {
    keccak256_concat(&[
        url.as_bytes(),
        &props.to_be_bytes()[..],
        &weight.to_be_bytes()[..],
        &owner[..],
    ])
}

/// Convict commitment: `keccak256(signed_block_hash ‖ caller ‖ v ‖ r ‖ s)`.
pub fn convict_commitment(
    signed_block_hash: &Hash,
    caller: &Address,
    signature: &RecoverableSignature,
) -> Hash {
    keccak256_concat(&[
        &signed_block_hash[..],
        &caller[..],
        &[signature.v][..],
        &signature.r[..],
        &signature.s[..],
    ])
}

/// Registry identifier: `keccak256(registry_address ‖ deployment_block_hash)`.
pub fn registry_id(registry: &Address, deployment_block_hash: &Hash) -> Hash {
    keccak256_concat(&[&registry[..], &deployment_block_hash[..]])
}
