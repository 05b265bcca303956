//! # Intset Crate
//!
//! Compact, exact encoding for sets of `u32` identifiers.
//!
//! The 32-bit space is split into buckets of 65536 consecutive values. Each
//! non-empty bucket is stored either as a sorted list of 16-bit offsets
//! (sparse) or as an 8 KiB bitmap (more than 4096 members). Sparse sets
//! drawn from a huge identifier space stay close to six bytes per value
//! instead of degrading to one bitmap over the whole space.
//!
//! ## Example Usage
//!
//! ```
//! use intset::{decode, encode};
//!
//! let blob = encode([42u32, 7, 100_000_000]);
//! let set = decode(&blob)?;
//!
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![7, 42, 100_000_000]);
//! # Ok::<(), intset::DecodeError>(())
//! ```
//!
//! The byte layout is documented in [`set`] and is stable: blobs persisted
//! by earlier versions must keep decoding.

mod container;
pub mod error;
mod reader;
pub mod set;

pub use container::{ARRAY_MAX, BITMAP_BYTES};
pub use error::{DecodeError, Result};
pub use set::CompactIntSet;

/// Encode any collection of values. Order and duplicates in the input do
/// not affect the output.
pub fn encode<I: IntoIterator<Item = u32>>(values: I) -> Vec<u8> {
    values.into_iter().collect::<CompactIntSet>().to_bytes()
}

/// Decode a blob produced by [`encode`]
pub fn decode(bytes: &[u8]) -> Result<CompactIntSet> {
    CompactIntSet::from_bytes(bytes)
}
