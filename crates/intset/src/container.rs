//! Per-bucket storage for the low 16 bits of each value.
//!
//! A bucket holds every member of the set that shares the same high 16 bits.
//! Small buckets keep a sorted `Vec<u16>`; once a bucket grows past
//! [`ARRAY_MAX`] members it switches to a fixed 65536-bit bitmap, which is
//! smaller than the array from that point on.

use crate::error::{DecodeError, Result};
use crate::reader::Reader;

/// Largest bucket that is still stored (and serialized) as a sorted array
pub const ARRAY_MAX: usize = 4096;

/// Number of 64-bit words in a bucket bitmap
pub const BITMAP_WORDS: usize = 1024;

/// Serialized size of a bucket bitmap
pub const BITMAP_BYTES: usize = BITMAP_WORDS * 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Container {
    /// Sorted, deduplicated offsets
    Array(Vec<u16>),
    /// Bit `o % 64` of word `o / 64` is set when offset `o` is present
    Bitmap {
        words: Box<[u64; BITMAP_WORDS]>,
        len: usize,
    },
}

impl Container {
    pub(crate) fn new() -> Self {
        Container::Array(Vec::new())
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Container::Array(offsets) => offsets.len(),
            Container::Bitmap { len, .. } => *len,
        }
    }

    pub(crate) fn contains(&self, offset: u16) -> bool {
        match self {
            Container::Array(offsets) => offsets.binary_search(&offset).is_ok(),
            Container::Bitmap { words, .. } => {
                words[offset as usize / 64] & (1u64 << (offset % 64)) != 0
            }
        }
    }

    /// Insert an offset, returning `true` if it was not already present.
    ///
    /// An array that would exceed [`ARRAY_MAX`] members is promoted to a
    /// bitmap, so the representation always matches what the encoder emits.
    pub(crate) fn insert(&mut self, offset: u16) -> bool {
        match self {
            Container::Array(offsets) => match offsets.binary_search(&offset) {
                Ok(_) => false,
                Err(pos) => {
                    offsets.insert(pos, offset);
                    if offsets.len() > ARRAY_MAX {
                        *self = Self::bitmap_from_sorted(offsets);
                    }
                    true
                }
            },
            Container::Bitmap { words, len } => {
                let word = &mut words[offset as usize / 64];
                let mask = 1u64 << (offset % 64);
                if *word & mask != 0 {
                    return false;
                }
                *word |= mask;
                *len += 1;
                true
            }
        }
    }

    fn bitmap_from_sorted(offsets: &[u16]) -> Self {
        let mut words = Box::new([0u64; BITMAP_WORDS]);
        for &offset in offsets {
            words[offset as usize / 64] |= 1u64 << (offset % 64);
        }
        Container::Bitmap {
            words,
            len: offsets.len(),
        }
    }

    pub(crate) fn iter(&self) -> ContainerIter<'_> {
        match self {
            Container::Array(offsets) => ContainerIter::Array(offsets.iter()),
            Container::Bitmap { words, .. } => ContainerIter::Bitmap {
                words: &words[..],
                index: 0,
                current: words[0],
            },
        }
    }

    /// Bytes the payload occupies on the wire (excluding the 4-byte bucket header)
    pub(crate) fn payload_size(&self) -> usize {
        match self {
            Container::Array(offsets) => offsets.len() * 2,
            Container::Bitmap { .. } => BITMAP_BYTES,
        }
    }

    pub(crate) fn write_payload(&self, out: &mut Vec<u8>) {
        match self {
            Container::Array(offsets) => {
                for offset in offsets {
                    out.extend_from_slice(&offset.to_le_bytes());
                }
            }
            Container::Bitmap { words, .. } => {
                for word in words.iter() {
                    out.extend_from_slice(&word.to_le_bytes());
                }
            }
        }
    }

    /// Read a payload whose kind is implied by the declared cardinality.
    pub(crate) fn read_payload(key: u16, cardinality: usize, reader: &mut Reader<'_>) -> Result<Self> {
        if cardinality > ARRAY_MAX {
            let mut words = Box::new([0u64; BITMAP_WORDS]);
            for word in words.iter_mut() {
                *word = reader.read_u64()?;
            }
            let actual: usize = words.iter().map(|w| w.count_ones() as usize).sum();
            if actual != cardinality {
                return Err(DecodeError::CardinalityMismatch {
                    key,
                    declared: cardinality,
                    actual,
                });
            }
            Ok(Container::Bitmap {
                words,
                len: cardinality,
            })
        } else {
            let mut offsets = Vec::with_capacity(cardinality);
            for _ in 0..cardinality {
                let offset = reader.read_u16()?;
                if offsets.last().is_some_and(|&last| offset <= last) {
                    return Err(DecodeError::UnorderedOffsets { key });
                }
                offsets.push(offset);
            }
            Ok(Container::Array(offsets))
        }
    }
}

/// Ascending iterator over the offsets of one container
pub(crate) enum ContainerIter<'a> {
    Array(std::slice::Iter<'a, u16>),
    Bitmap {
        words: &'a [u64],
        index: usize,
        current: u64,
    },
}

impl Iterator for ContainerIter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        match self {
            ContainerIter::Array(iter) => iter.next().copied(),
            ContainerIter::Bitmap {
                words,
                index,
                current,
            } => loop {
                if *current != 0 {
                    let bit = current.trailing_zeros() as usize;
                    *current &= *current - 1;
                    return Some((*index * 64 + bit) as u16);
                }
                *index += 1;
                if *index >= words.len() {
                    return None;
                }
                *current = words[*index];
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_insert_keeps_order() {
        let mut container = Container::new();
        assert!(container.insert(7));
        assert!(container.insert(3));
        assert!(!container.insert(7));

        let offsets: Vec<u16> = container.iter().collect();
        assert_eq!(offsets, vec![3, 7]);
        assert!(matches!(container, Container::Array(_)));
    }

    #[test]
    fn test_promotes_to_bitmap_past_threshold() {
        let mut container = Container::new();
        for offset in 0..=ARRAY_MAX as u16 {
            container.insert(offset * 2);
        }

        assert_eq!(container.len(), ARRAY_MAX + 1);
        assert!(matches!(container, Container::Bitmap { .. }));
        assert!(container.contains(8192));
        assert!(!container.contains(8193));
        assert_eq!(container.payload_size(), BITMAP_BYTES);
    }

    #[test]
    fn test_bitmap_iter_is_ascending() {
        let mut container = Container::new();
        for offset in (0..=u16::MAX).rev().step_by(9) {
            container.insert(offset);
        }
        let offsets: Vec<u16> = container.iter().collect();
        assert_eq!(offsets.len(), container.len());
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(offsets.last(), Some(&u16::MAX));
    }
}
