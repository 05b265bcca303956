//! Error types for the intset crate.

use thiserror::Error;

/// Errors raised while decoding a serialized [`CompactIntSet`](crate::CompactIntSet).
///
/// Every variant means the blob is not something `encode` could have
/// produced, so callers should treat it as corrupted persisted data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Ran out of bytes while reading a field
    #[error("Truncated encoding: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Header declares more buckets than the 32-bit space can hold,
    /// or more than the remaining bytes could possibly describe
    #[error("Invalid bucket count: {0}")]
    InvalidBucketCount(u32),

    /// Buckets must appear in strictly ascending key order
    #[error("Bucket key {key} out of order (previous key {previous})")]
    UnorderedBucket { key: u16, previous: u16 },

    /// Array offsets inside a bucket must be strictly ascending
    #[error("Offsets in bucket {key} are not strictly ascending")]
    UnorderedOffsets { key: u16 },

    /// Bitmap population disagrees with the declared cardinality
    #[error("Bucket {key} declares {declared} values but its bitmap holds {actual}")]
    CardinalityMismatch {
        key: u16,
        declared: usize,
        actual: usize,
    },

    /// Bytes left over after the last declared bucket
    #[error("{0} trailing bytes after the last bucket")]
    TrailingBytes(usize),
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DecodeError>;
