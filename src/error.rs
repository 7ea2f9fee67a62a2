use std::io;

use thiserror::Error;

/// Errors raised while reading or writing the binary wire form.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid value tag: {0}")]
    InvalidValueTag(u8),
    #[error("filter message is both always_false and always_true")]
    ConflictingFlags,
    #[error("invalid decimal width: {0}")]
    InvalidDecimalWidth(u8),
    #[error("ranged filter message is missing its min or max bound")]
    MissingBound,
}

/// Errors raised at the batch-source boundary.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    ArrayTypeMismatch { expected: String, actual: String },
    #[error("Unsupported data type for min/max filter: {0}")]
    UnsupportedDataType(String),
}
