//! Benchmark profiles for offheap sequences.
//!
//! - [`BenchProfile::reference`]: 100K records, 16-byte payloads.
//! - [`BenchProfile::stress`]: 1M records, same shape.
//!
//! Builders fill sequences from a seed so every run measures identical
//! data.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use offheap_core::{BackendKind, Result};
use offheap_region::{FastRegion, RegionAccess};
use offheap_seq::{LongSequence, RecordSequence};
use offheap_test_utils::{random_longs, random_records};

/// Shape of the data a benchmark runs over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchProfile {
    /// Label used in benchmark ids.
    pub name: &'static str,
    /// Number of elements.
    pub elements: usize,
    /// Headers are drawn from `[0, key_space)`.
    pub key_space: i64,
    /// Record payload bytes.
    pub payload_width: usize,
}

impl BenchProfile {
    /// 100K records with roughly ten duplicates per header.
    pub fn reference() -> Self {
        Self {
            name: "reference",
            elements: 100_000,
            key_space: 10_000,
            payload_width: 16,
        }
    }

    /// 1M records with roughly ten duplicates per header.
    pub fn stress() -> Self {
        Self {
            name: "stress",
            elements: 1_000_000,
            key_space: 100_000,
            payload_width: 16,
        }
    }
}

/// Record sequence on `kind` filled with the profile's seeded data.
pub fn record_sequence(
    profile: &BenchProfile,
    kind: BackendKind,
    seed: u64,
) -> Result<RecordSequence> {
    let seq = RecordSequence::with_backend(kind, profile.elements, profile.payload_width)?;
    fill_records(profile, seq, seed)
}

/// Record sequence directly on a [`FastRegion`], for the unchecked sort.
pub fn fast_record_sequence(
    profile: &BenchProfile,
    seed: u64,
) -> Result<RecordSequence<FastRegion>> {
    let seq = RecordSequence::allocate_fast(profile.elements, profile.payload_width)?;
    fill_records(profile, seq, seed)
}

fn fill_records<R: RegionAccess>(
    profile: &BenchProfile,
    mut seq: RecordSequence<R>,
    seed: u64,
) -> Result<RecordSequence<R>> {
    let records = random_records(seed, profile.elements, profile.key_space, profile.payload_width);
    for (i, r) in records.iter().enumerate() {
        seq.set(i, r.header, &r.payload)?;
    }
    Ok(seq)
}

/// Long sequence on `kind` with `profile.elements` seeded values.
pub fn long_sequence(profile: &BenchProfile, kind: BackendKind, seed: u64) -> Result<LongSequence> {
    LongSequence::from_slice(kind, &random_longs(seed, profile.elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> BenchProfile {
        BenchProfile {
            name: "tiny",
            elements: 64,
            key_space: 8,
            payload_width: 4,
        }
    }

    #[test]
    fn builders_are_deterministic() {
        let a = long_sequence(&tiny(), BackendKind::Checked, 1).unwrap();
        let b = long_sequence(&tiny(), BackendKind::Fast, 1).unwrap();
        assert_eq!(a.to_vec().unwrap(), b.to_vec().unwrap());
    }

    #[test]
    fn record_builder_respects_profile() {
        let seq = record_sequence(&tiny(), BackendKind::Fast, 3).unwrap();
        assert_eq!(seq.len(), 64);
        assert_eq!(seq.payload_width(), 4);
        assert!((0..64).all(|i| (0..8).contains(&seq.get(i).unwrap())));
    }

    #[test]
    fn fast_record_builder_matches_enum_builder() {
        let fast = fast_record_sequence(&tiny(), 3).unwrap();
        let enum_backed = record_sequence(&tiny(), BackendKind::Checked, 3).unwrap();
        assert!((0..64).all(|i| fast.get(i).unwrap() == enum_backed.get(i).unwrap()));
    }

    #[test]
    fn profiles_scale_up() {
        assert!(BenchProfile::stress().elements > BenchProfile::reference().elements);
    }
}
