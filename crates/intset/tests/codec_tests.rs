//! Round-trip, size and corruption tests for the set codec.

use intset::{decode, encode, CompactIntSet, DecodeError, BITMAP_BYTES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

fn random_set(rng: &mut StdRng, count: usize, max: u32) -> BTreeSet<u32> {
    (0..count).map(|_| rng.random_range(0..max)).collect()
}

fn assert_round_trip(values: &BTreeSet<u32>) {
    let blob = encode(values.iter().copied());
    let decoded = decode(&blob).unwrap();
    let back: BTreeSet<u32> = decoded.iter().collect();
    assert_eq!(&back, values);
    assert_eq!(decoded.len(), values.len());
}

#[test]
fn test_round_trip_sparse_and_dense() {
    let mut rng = StdRng::seed_from_u64(42);

    // Sparse over the full space
    assert_round_trip(&random_set(&mut rng, 2_000, u32::MAX));
    // Dense inside a few buckets, crosses the bitmap threshold
    assert_round_trip(&random_set(&mut rng, 30_000, 200_000));
    // Mixed: one dense run plus scattered outliers
    let mut mixed: BTreeSet<u32> = (1_000_000..1_010_000).collect();
    mixed.extend(random_set(&mut rng, 500, u32::MAX));
    assert_round_trip(&mixed);
}

#[test]
fn test_round_trip_edges() {
    assert_round_trip(&BTreeSet::new());
    assert_round_trip(&[0].into_iter().collect());
    assert_round_trip(&[u32::MAX].into_iter().collect());
    assert_round_trip(&[0, 65_535, 65_536, u32::MAX - 1, u32::MAX].into_iter().collect());
    // Exactly at and just past the array limit inside one bucket
    assert_round_trip(&(0..4096).collect());
    assert_round_trip(&(0..4097).collect());
}

#[test]
fn test_encoding_is_deterministic() {
    let forward = encode([9, 3, 70_000, 3, 1]);
    let reversed = encode([1, 3, 70_000, 9]);
    assert_eq!(forward, reversed);
}

#[test]
fn test_small_sets_stay_small() {
    let mut set = CompactIntSet::new();
    set.insert(1);
    assert_eq!(set.serialized_size(), 10);
    set.insert(1000);
    assert_eq!(set.serialized_size(), 12);
    set.insert(100_000_000);
    assert_eq!(set.serialized_size(), 18);
}

#[test]
fn test_compactness_for_uniform_sample() {
    let mut rng = StdRng::seed_from_u64(1);
    let values = random_set(&mut rng, 1_000, 100_000_000);
    let blob = encode(values.iter().copied());

    // Worst case is one bucket per value: 4 + 6 bytes each
    assert!(blob.len() <= 4 + values.len() * 6);
    // The same data as 34-byte relationship records
    assert!(blob.len() <= 34 * 1_000);
}

#[test]
fn test_dense_bucket_uses_bitmap() {
    let blob = encode(0..10_000);
    // bucket 0: 4096 < 10_000 values -> bitmap
    assert_eq!(blob.len(), 4 + 4 + BITMAP_BYTES);
}

#[test]
fn test_truncated_blob() {
    let mut blob = encode([1, 2, 3]);
    blob.pop();
    assert!(matches!(decode(&blob), Err(DecodeError::Truncated { .. })));
    assert!(matches!(decode(&[1, 0]), Err(DecodeError::Truncated { .. })));
}

#[test]
fn test_invalid_bucket_count() {
    assert_eq!(
        decode(&[0xFF, 0xFF, 0xFF, 0xFF]),
        Err(DecodeError::InvalidBucketCount(u32::MAX))
    );

    // Header claims two buckets, payload only holds one
    let mut blob = encode([5]);
    blob[0] = 2;
    assert_eq!(decode(&blob), Err(DecodeError::InvalidBucketCount(2)));
}

#[test]
fn test_cardinality_disagrees_with_payload() {
    // Array bucket declaring three offsets but carrying two
    let mut blob = encode([5, 6]);
    blob[6] = 2;
    assert!(matches!(decode(&blob), Err(DecodeError::Truncated { .. })));

    // Bitmap bucket whose popcount differs from the header
    let mut blob = encode(0..5_000);
    blob[6..8].copy_from_slice(&5_000u16.to_le_bytes());
    assert_eq!(
        decode(&blob),
        Err(DecodeError::CardinalityMismatch {
            key: 0,
            declared: 5_001,
            actual: 5_000
        })
    );
}

#[test]
fn test_rejects_unordered_content() {
    // Two buckets with keys 1 then 0
    let blob: Vec<u8> = [
        2u32.to_le_bytes().as_slice(),
        &[1, 0, 0, 0, 9, 0],
        &[0, 0, 0, 0, 9, 0],
    ]
    .concat();
    assert_eq!(
        decode(&blob),
        Err(DecodeError::UnorderedBucket { key: 0, previous: 1 })
    );

    // Offsets 9 then 4 in one bucket
    let blob: Vec<u8> = [1u32.to_le_bytes().as_slice(), &[0, 0, 1, 0, 9, 0, 4, 0]].concat();
    assert_eq!(decode(&blob), Err(DecodeError::UnorderedOffsets { key: 0 }));
}

#[test]
fn test_trailing_bytes() {
    let mut blob = encode([5]);
    blob.extend_from_slice(&[0, 0]);
    assert_eq!(decode(&blob), Err(DecodeError::TrailingBytes(2)));
}
