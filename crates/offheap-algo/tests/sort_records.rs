//! Sorting large record sequences on both backends.

use std::collections::BTreeMap;

use offheap_algo::{sort, sort_unchecked, SortConfig, Sorter};
use offheap_region::{FastRegion, RegionAccess};
use offheap_seq::{
    GrowableLongs, GrowableSequence, GrowthConfig, KeyedSequence, LongSequence, RecordSequence,
};
use offheap_test_utils::{init_tracing, random_longs, random_records, TestRecord, BACKENDS};

const PAYLOAD_WIDTH: usize = 12;

fn payloads_by_header(records: impl Iterator<Item = TestRecord>) -> BTreeMap<i64, Vec<Vec<u8>>> {
    let mut map: BTreeMap<i64, Vec<Vec<u8>>> = BTreeMap::new();
    for r in records {
        map.entry(r.header).or_default().push(r.payload);
    }
    for payloads in map.values_mut() {
        payloads.sort();
    }
    map
}

fn read_back<R: RegionAccess>(seq: &RecordSequence<R>) -> Vec<TestRecord> {
    (0..seq.len())
        .map(|i| {
            let mut payload = vec![0u8; seq.payload_width()];
            seq.get_payload(i, &mut payload).unwrap();
            TestRecord {
                header: seq.get(i).unwrap(),
                payload,
            }
        })
        .collect()
}

#[test]
fn hundred_thousand_records_sort_with_payloads_attached() {
    init_tracing();
    // A small key space forces long runs of duplicate headers.
    let records = random_records(2024, 100_000, 5_000, PAYLOAD_WIDTH);
    let mut expected_headers: Vec<i64> = records.iter().map(|r| r.header).collect();
    expected_headers.sort_unstable();
    let expected_payloads = payloads_by_header(records.iter().cloned());

    for kind in BACKENDS {
        let mut seq = RecordSequence::with_backend(kind, records.len(), PAYLOAD_WIDTH).unwrap();
        for (i, r) in records.iter().enumerate() {
            seq.set(i, r.header, &r.payload).unwrap();
        }

        let stats = sort(&mut seq).unwrap();
        let sorted = read_back(&seq);

        let headers: Vec<i64> = sorted.iter().map(|r| r.header).collect();
        assert!(headers.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(headers, expected_headers);
        assert_eq!(payloads_by_header(sorted.into_iter()), expected_payloads);
        assert!(stats.max_depth <= records.len().ilog2() as usize + 1);
    }
}

#[test]
fn recursion_depth_stays_logarithmic_on_adversarial_inputs() {
    let n = 100_000usize;
    let ascending: Vec<i64> = (0..n as i64).collect();
    let descending: Vec<i64> = (0..n as i64).rev().collect();
    let sawtooth: Vec<i64> = (0..n as i64).map(|i| i % 17).collect();
    let few_distinct: Vec<i64> = random_longs(5, n).into_iter().map(|v| v % 3).collect();
    let bound = n.ilog2() as usize + 1;

    for input in [ascending, descending, sawtooth, few_distinct] {
        let mut seq = LongSequence::from_slice(BACKENDS[0], &input).unwrap();
        let stats = sort(&mut seq).unwrap();
        let mut expected = input.clone();
        expected.sort_unstable();
        assert_eq!(seq.to_vec().unwrap(), expected);
        assert!(
            stats.max_depth <= bound,
            "depth {} exceeds {}",
            stats.max_depth,
            bound
        );
    }
}

#[test]
fn growable_sequences_sort_over_logical_size_only() {
    let values = random_longs(77, 1_000);
    let mut seq = GrowableLongs::with_config(BACKENDS[1], GrowthConfig::default()).unwrap();
    for &v in &values {
        seq.push(v).unwrap();
    }
    assert!(seq.capacity() > seq.len());

    Sorter::new(SortConfig::default())
        .unwrap()
        .sort(&mut seq)
        .unwrap();

    let mut expected = values;
    expected.sort_unstable();
    assert_eq!(seq.to_vec().unwrap(), expected);
    assert_eq!(seq.keys().count(), 1_000);
}

#[test]
fn unchecked_sort_keeps_payloads_attached() {
    let records = random_records(2025, 100_000, 5_000, PAYLOAD_WIDTH);
    let mut expected_headers: Vec<i64> = records.iter().map(|r| r.header).collect();
    expected_headers.sort_unstable();
    let expected_payloads = payloads_by_header(records.iter().cloned());

    let mut seq: RecordSequence<FastRegion> =
        RecordSequence::allocate_fast(records.len(), PAYLOAD_WIDTH).unwrap();
    for (i, r) in records.iter().enumerate() {
        seq.set(i, r.header, &r.payload).unwrap();
    }

    let stats = sort_unchecked(&mut seq).unwrap();
    let sorted = read_back(&seq);

    let headers: Vec<i64> = sorted.iter().map(|r| r.header).collect();
    assert_eq!(headers, expected_headers);
    assert_eq!(payloads_by_header(sorted.into_iter()), expected_payloads);
    assert!(stats.max_depth <= records.len().ilog2() as usize + 1);
}

#[test]
fn unchecked_sort_on_growable_fast_sequence() {
    let values = random_longs(78, 1_000);
    let backing = LongSequence::allocate_fast(0).unwrap();
    let mut seq = GrowableSequence::with_backing(backing, GrowthConfig::default()).unwrap();
    for &v in &values {
        seq.push(v).unwrap();
    }

    Sorter::default().sort_unchecked(&mut seq).unwrap();

    let mut expected = values;
    expected.sort_unstable();
    assert_eq!(seq.to_vec().unwrap(), expected);
}
