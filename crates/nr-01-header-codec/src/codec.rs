//! # Header Codec
//!
//! Canonical serialization of [`BlockHeader`] and the checked decoders used
//! to walk a header chain backward.
//!
//! The encoding is the RLP list
//! `[parent_hash, ommers_hash, beneficiary, state_root, transactions_root,
//! receipts_root, logs_bloom, difficulty, number, gas_limit, gas_used,
//! timestamp, extra_data, mix_hash, nonce, base_fee?]`. Its keccak256 is the
//! block hash.

use crate::domain::encoding::{encode_u256, encode_u64, rlp_encode_list_items};
use crate::domain::{rlp_error, BlockHeader, HeaderCodecError};
use rlp::{Decodable, DecoderError, Rlp};
use shared_crypto::keccak256;
use shared_types::{Hash, U256};

/// Field count of a header without a base fee.
pub const LEGACY_FIELD_COUNT: usize = 15;

/// Field count of a header carrying a base fee.
pub const BASE_FEE_FIELD_COUNT: usize = 16;

/// Canonical RLP encoding of `header`.
pub fn serialize(header: &BlockHeader) -> Vec<u8> {
    let mut fields: Vec<Vec<u8>> = vec![
        header.parent_hash.to_vec(),
        header.ommers_hash.to_vec(),
        header.beneficiary.to_vec(),
        header.state_root.to_vec(),
        header.transactions_root.to_vec(),
        header.receipts_root.to_vec(),
        header.logs_bloom.to_vec(),
        encode_u256(&header.difficulty),
        encode_u64(header.number),
        encode_u64(header.gas_limit),
        encode_u64(header.gas_used),
        encode_u64(header.timestamp),
        header.extra_data.clone(),
        header.mix_hash.to_vec(),
        header.nonce.to_vec(),
    ];
    if let Some(base_fee) = &header.base_fee {
        fields.push(encode_u256(base_fee));
    }
    rlp_encode_list_items(&fields)
}

/// Block hash of `header`.
pub fn block_hash(header: &BlockHeader) -> Hash {
    keccak256(&serialize(header))
}

/// Block hash of already-serialized header bytes.
pub fn hash_bytes(bytes: &[u8]) -> Hash {
    keccak256(bytes)
}

/// Parent hash and own hash of serialized header bytes.
///
/// Only the outer list prefix and the first field are decoded.
pub fn parent_and_hash(bytes: &[u8]) -> Result<(Hash, Hash), HeaderCodecError> {
    let rlp = outer_list(bytes)?;
    let parent_hash = fixed_field::<32>(&rlp, 0, "parent_hash")?;
    Ok((parent_hash, keccak256(bytes)))
}

/// Full checked decode of serialized header bytes.
pub fn decode(bytes: &[u8]) -> Result<BlockHeader, HeaderCodecError> {
    let rlp = outer_list(bytes)?;

    // The item iterator stops at the first malformed item, so anything it
    // did not cover is garbage inside the list payload.
    let payload_len = rlp
        .payload_info()
        .map_err(|e| rlp_error("header", e))?
        .value_len;
    let covered: usize = rlp.iter().map(|item| item.as_raw().len()).sum();
    if covered != payload_len {
        return Err(HeaderCodecError::TrailingBytes(
            payload_len.saturating_sub(covered),
        ));
    }

    let item_count = rlp.item_count().map_err(|e| rlp_error("item count", e))?;
    if item_count != LEGACY_FIELD_COUNT && item_count != BASE_FEE_FIELD_COUNT {
        return Err(HeaderCodecError::WrongFieldCount(item_count));
    }

    let base_fee = if item_count == BASE_FEE_FIELD_COUNT {
        Some(value_field::<U256>(&rlp, 15, "base_fee")?)
    } else {
        None
    };

    Ok(BlockHeader {
        parent_hash: fixed_field(&rlp, 0, "parent_hash")?,
        ommers_hash: fixed_field(&rlp, 1, "ommers_hash")?,
        beneficiary: fixed_field(&rlp, 2, "beneficiary")?,
        state_root: fixed_field(&rlp, 3, "state_root")?,
        transactions_root: fixed_field(&rlp, 4, "transactions_root")?,
        receipts_root: fixed_field(&rlp, 5, "receipts_root")?,
        logs_bloom: fixed_field(&rlp, 6, "logs_bloom")?,
        difficulty: value_field(&rlp, 7, "difficulty")?,
        number: value_field(&rlp, 8, "number")?,
        gas_limit: value_field(&rlp, 9, "gas_limit")?,
        gas_used: value_field(&rlp, 10, "gas_used")?,
        timestamp: value_field(&rlp, 11, "timestamp")?,
        extra_data: value_field::<Vec<u8>>(&rlp, 12, "extra_data")?,
        mix_hash: fixed_field(&rlp, 13, "mix_hash")?,
        nonce: fixed_field(&rlp, 14, "nonce")?,
        base_fee,
    })
}

/// Block number and hash of serialized header bytes.
pub fn number_and_hash(bytes: &[u8]) -> Result<(u64, Hash), HeaderCodecError> {
    let header = decode(bytes)?;
    Ok((header.number, keccak256(bytes)))
}

/// Open `bytes` as exactly one complete outer list.
fn outer_list(bytes: &[u8]) -> Result<Rlp<'_>, HeaderCodecError> {
    let rlp = Rlp::new(bytes);
    if !rlp.is_list() {
        return Err(HeaderCodecError::NotAList);
    }
    let total = rlp
        .payload_info()
        .map_err(|e| rlp_error("header", e))?
        .total();
    match bytes.len().checked_sub(total) {
        Some(0) => Ok(rlp),
        Some(extra) => Err(HeaderCodecError::TrailingBytes(extra)),
        None => Err(rlp_error("header", DecoderError::RlpIsTooShort)),
    }
}

/// Canonical scalar or byte-string field at `index`.
fn value_field<T: Decodable>(
    rlp: &Rlp<'_>,
    index: usize,
    field: &'static str,
) -> Result<T, HeaderCodecError> {
    rlp.val_at(index).map_err(|e| rlp_error(field, e))
}

/// Fixed-size byte-string field at `index`.
fn fixed_field<const N: usize>(
    rlp: &Rlp<'_>,
    index: usize,
    field: &'static str,
) -> Result<[u8; N], HeaderCodecError> {
    let item = rlp.at(index).map_err(|e| rlp_error(field, e))?;
    if item.is_list() {
        return Err(HeaderCodecError::UnexpectedList(field));
    }
    let data = item.data().map_err(|e| rlp_error(field, e))?;
    <[u8; N]>::try_from(data).map_err(|_| HeaderCodecError::InvalidFieldLength {
        field,
        expected: N,
        got: data.len(),
    })
}
