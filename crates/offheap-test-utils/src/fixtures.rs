//! Seeded data generators.
//!
//! Every generator takes an explicit seed so failures reproduce exactly.

use offheap_core::BackendKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Both backends, for tests that must hold on each.
pub const BACKENDS: [BackendKind; 2] = [BackendKind::Fast, BackendKind::Checked];

/// A record held on the heap for comparison against off-heap results.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestRecord {
    pub header: i64,
    pub payload: Vec<u8>,
}

/// `n` values drawn uniformly from the full `i64` range.
pub fn random_longs(seed: u64, n: usize) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen()).collect()
}

/// `n` records with headers in `[0, key_space)` and random payloads.
///
/// A small `key_space` forces many duplicate headers.
pub fn random_records(
    seed: u64,
    n: usize,
    key_space: i64,
    payload_width: usize,
) -> Vec<TestRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let header = rng.gen_range(0..key_space);
            let mut payload = vec![0u8; payload_width];
            rng.fill(payload.as_mut_slice());
            TestRecord { header, payload }
        })
        .collect()
}

/// `n` strictly increasing values with random gaps of 1 to 8.
pub fn distinct_sorted_longs(seed: u64, n: usize) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut next: i64 = rng.gen_range(-1_000..1_000);
    (0..n)
        .map(|_| {
            let value = next;
            next += rng.gen_range(1..=8);
            value
        })
        .collect()
}

/// `n` non-decreasing values where each value repeats 1 to `max_run` times.
pub fn sorted_with_duplicates(seed: u64, n: usize, max_run: usize) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);
    let mut value: i64 = 0;
    while out.len() < n {
        let run = rng.gen_range(1..=max_run.max(1));
        for _ in 0..run.min(n - out.len()) {
            out.push(value);
        }
        value += rng.gen_range(1..=3);
    }
    out
}
