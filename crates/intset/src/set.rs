//! The bucketed integer set and its wire format.
//!
//! ## Wire format
//! All integers are little-endian.
//!
//! ```text
//! u32                       bucket count
//! repeated, ascending key:
//!   u16                     key (high 16 bits of every value in the bucket)
//!   u16                     cardinality - 1
//!   [u8; 8192]              bitmap, when cardinality > 4096
//!   [u16; cardinality]      sorted offsets, otherwise
//! ```
//!
//! The cardinality field is stored minus one: buckets are never empty, and
//! a full bucket of 65536 values would not fit in 16 bits otherwise.

use crate::container::{Container, ContainerIter};
use crate::error::{DecodeError, Result};
use crate::reader::Reader;

/// Most buckets the 32-bit space can be split into
const MAX_BUCKETS: u32 = 1 << 16;

/// Smallest possible encoded bucket: 4-byte header plus one offset
const MIN_BUCKET_BYTES: usize = 6;

/// A set of `u32` values partitioned into 65536-wide buckets.
///
/// Buckets are kept sorted by key, and each bucket picks the array or bitmap
/// representation from its own cardinality. A sparse set therefore costs
/// about six bytes per value, and a dense run costs at most 8 KiB per
/// 65536 values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactIntSet {
    buckets: Vec<(u16, Container)>,
}

impl CompactIntSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `true` if it was not already present
    pub fn insert(&mut self, value: u32) -> bool {
        let (key, offset) = split(value);
        match self.buckets.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => self.buckets[idx].1.insert(offset),
            Err(idx) => {
                let mut container = Container::new();
                container.insert(offset);
                self.buckets.insert(idx, (key, container));
                true
            }
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        let (key, offset) = split(value);
        self.buckets
            .binary_search_by_key(&key, |(k, _)| *k)
            .map(|idx| self.buckets[idx].1.contains(offset))
            .unwrap_or(false)
    }

    /// Number of values in the set
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, c)| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of non-empty buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate over all values in ascending order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Exact length of [`to_bytes`](Self::to_bytes) without encoding
    pub fn serialized_size(&self) -> usize {
        4 + self
            .buckets
            .iter()
            .map(|(_, c)| 4 + c.payload_size())
            .sum::<usize>()
    }

    /// Serialize the set. Equal sets always produce identical bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_size());
        out.extend_from_slice(&(self.buckets.len() as u32).to_le_bytes());
        for (key, container) in &self.buckets {
            out.extend_from_slice(&key.to_le_bytes());
            out.extend_from_slice(&((container.len() - 1) as u16).to_le_bytes());
            container.write_payload(&mut out);
        }
        out
    }

    /// Parse a blob produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    /// Any structural inconsistency is reported as a [`DecodeError`]; a
    /// partially decoded set is never returned.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let count = reader.read_u32()?;
        if count > MAX_BUCKETS || count as usize > reader.remaining() / MIN_BUCKET_BYTES {
            return Err(DecodeError::InvalidBucketCount(count));
        }

        let mut buckets: Vec<(u16, Container)> = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let key = reader.read_u16()?;
            if let Some(&(previous, _)) = buckets.last() {
                if key <= previous {
                    return Err(DecodeError::UnorderedBucket { key, previous });
                }
            }
            let cardinality = reader.read_u16()? as usize + 1;
            let container = Container::read_payload(key, cardinality, &mut reader)?;
            buckets.push((key, container));
        }

        match reader.remaining() {
            0 => Ok(Self { buckets }),
            extra => Err(DecodeError::TrailingBytes(extra)),
        }
    }
}

fn split(value: u32) -> (u16, u16) {
    ((value >> 16) as u16, value as u16)
}

impl FromIterator<u32> for CompactIntSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = CompactIntSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<u32> for CompactIntSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a CompactIntSet {
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over a [`CompactIntSet`]
pub struct Iter<'a> {
    buckets: std::slice::Iter<'a, (u16, Container)>,
    current: Option<(u32, ContainerIter<'a>)>,
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if let Some((high, offsets)) = &mut self.current {
                if let Some(offset) = offsets.next() {
                    return Some(*high | offset as u32);
                }
            }
            let (key, container) = self.buckets.next()?;
            self.current = Some(((*key as u32) << 16, container.iter()));
        }
    }
}
