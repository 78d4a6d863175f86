//! # Codec Errors

use rlp::DecoderError;
use thiserror::Error;

/// Header decoding errors.
///
/// Every malformed input maps to one of these; decoding never panics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderCodecError {
    /// The RLP decoder rejected a field.
    #[error("RLP decode error for {field}: {source:?}")]
    Rlp {
        /// Field being decoded
        field: &'static str,
        /// Underlying decoder error
        source: DecoderError,
    },

    /// The outer item is a byte string, not a list.
    #[error("Header is not an RLP list")]
    NotAList,

    /// Extra bytes follow the outer list.
    #[error("Trailing bytes after header: {0}")]
    TrailingBytes(usize),

    /// A header field is a nested list.
    #[error("Field {0} is a list")]
    UnexpectedList(&'static str),

    /// A fixed-size field has the wrong length.
    #[error("Field {field} has length {got}, expected {expected}")]
    InvalidFieldLength {
        /// Field name
        field: &'static str,
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        got: usize,
    },

    /// Header list has an unsupported number of fields.
    #[error("Header has {0} fields")]
    WrongFieldCount(usize),
}

/// Attach the field name to a decoder error.
pub fn rlp_error(field: &'static str, e: DecoderError) -> HeaderCodecError {
    HeaderCodecError::Rlp { field, source: e }
}
