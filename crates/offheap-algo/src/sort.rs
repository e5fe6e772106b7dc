//! In-place, unstable sort of a [`KeyedSequence`] by key.
//!
//! Quicksort with a median-of-three pivot and three-way partitioning, so
//! runs of equal keys are set aside in one pass instead of degrading to
//! quadratic time. Ranges shorter than
//! [`SortConfig::insertion_threshold`] are finished with insertion sort.
//! The smaller partition is sorted recursively and the larger one by
//! looping, which bounds recursion depth by `log2(n) + 1`.
//!
//! Every exchange goes through the sequence's own swap, so record payloads
//! always travel with their headers.
//!
//! [`Sorter::sort`] validates every key read and swap. On sequences that
//! implement [`UncheckedKeyed`], [`Sorter::sort_unchecked`] checks the range
//! and liveness once and runs the partition loops without per-access
//! checks in release builds.

use std::cmp::Ordering;
use std::ops::Range;

use offheap_core::{check_range, MemError, Result};
use offheap_seq::{KeyedSequence, UncheckedKeyed};

use crate::config::SortConfig;

/// Counters collected during one sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Element exchanges performed.
    pub swaps: u64,
    /// Deepest recursion level reached (1 for the top-level call).
    pub max_depth: usize,
}

/// Sorts keyed sequences in place.
#[derive(Clone, Debug, Default)]
pub struct Sorter {
    config: SortConfig,
}

impl Sorter {
    /// A sorter with validated `config`.
    pub fn new(config: SortConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sort every element of `seq` ascending by key.
    pub fn sort<S: KeyedSequence>(&self, seq: &mut S) -> Result<SortStats> {
        let len = seq.len();
        self.sort_range(seq, 0..len)
    }

    /// Sort `seq[range]` ascending by key, leaving the rest untouched.
    pub fn sort_range<S: KeyedSequence>(
        &self,
        seq: &mut S,
        range: Range<usize>,
    ) -> Result<SortStats> {
        check_range(&range, seq.len())?;
        self.run(&mut Validated(seq), range)
    }

    /// Like [`sort`](Self::sort), with element access checked only in
    /// debug builds.
    pub fn sort_unchecked<S: UncheckedKeyed>(&self, seq: &mut S) -> Result<SortStats> {
        let len = seq.len();
        self.sort_range_unchecked(seq, 0..len)
    }

    /// Like [`sort_range`](Self::sort_range), with element access checked
    /// only in debug builds. The range and liveness are still validated
    /// up front.
    pub fn sort_range_unchecked<S: UncheckedKeyed>(
        &self,
        seq: &mut S,
        range: Range<usize>,
    ) -> Result<SortStats> {
        check_range(&range, seq.len())?;
        if !seq.is_live() {
            return Err(MemError::Released);
        }
        self.run(&mut Trusted(seq), range)
    }

    fn run<A: SortAccess>(&self, seq: &mut A, range: Range<usize>) -> Result<SortStats> {
        let mut stats = SortStats::default();
        self.quicksort(seq, range.start, range.end, 1, &mut stats)?;
        tracing::trace!(
            elements = range.end - range.start,
            swaps = stats.swaps,
            max_depth = stats.max_depth,
            "sorted range"
        );
        Ok(stats)
    }

    fn quicksort<A: SortAccess>(
        &self,
        seq: &mut A,
        mut lo: usize,
        mut hi: usize,
        depth: usize,
        stats: &mut SortStats,
    ) -> Result<()> {
        stats.max_depth = stats.max_depth.max(depth);
        loop {
            if hi - lo < self.config.insertion_threshold {
                return insertion_sort(seq, lo, hi, stats);
            }
            let pivot = median_of_three(
                seq.key(lo)?,
                seq.key(lo + (hi - lo) / 2)?,
                seq.key(hi - 1)?,
            );
            let (lt, gt) = partition(seq, lo, hi, pivot, stats)?;
            // [lo, lt) < pivot, [lt, gt) == pivot, [gt, hi) > pivot.
            if lt - lo < hi - gt {
                if lt - lo > 1 {
                    self.quicksort(seq, lo, lt, depth + 1, stats)?;
                }
                lo = gt;
            } else {
                if hi - gt > 1 {
                    self.quicksort(seq, gt, hi, depth + 1, stats)?;
                }
                hi = lt;
            }
        }
    }
}

/// Element access the sort loops run on. Every index they pass lies in the
/// range the entry point validated.
trait SortAccess {
    fn key(&self, index: usize) -> Result<i64>;
    fn swap(&mut self, a: usize, b: usize) -> Result<()>;
}

struct Validated<'a, S>(&'a mut S);

impl<S: KeyedSequence> SortAccess for Validated<'_, S> {
    #[inline]
    fn key(&self, index: usize) -> Result<i64> {
        self.0.key(index)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.0.swap(a, b)
    }
}

/// Only built by [`Sorter::sort_range_unchecked`] after its range and
/// liveness checks. The exclusive borrow keeps the sequence live and its
/// length fixed for the whole sort.
struct Trusted<'a, S>(&'a mut S);

#[allow(unsafe_code)]
impl<S: UncheckedKeyed> SortAccess for Trusted<'_, S> {
    #[inline]
    fn key(&self, index: usize) -> Result<i64> {
        // SAFETY: the sort only reads indices inside the validated range.
        Ok(unsafe { self.0.key_unchecked(index) })
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        // SAFETY: as in `key`.
        unsafe { self.0.swap_unchecked(a, b) };
        Ok(())
    }
}

/// Sort all of `seq` with the default configuration.
pub fn sort<S: KeyedSequence>(seq: &mut S) -> Result<SortStats> {
    Sorter::default().sort(seq)
}

/// Sort all of `seq` with the default configuration, with element access
/// checked only in debug builds.
pub fn sort_unchecked<S: UncheckedKeyed>(seq: &mut S) -> Result<SortStats> {
    Sorter::default().sort_unchecked(seq)
}

fn median_of_three(a: i64, b: i64, c: i64) -> i64 {
    if a < b {
        if b < c {
            b
        } else if a < c {
            c
        } else {
            a
        }
    } else if a < c {
        a
    } else if b < c {
        c
    } else {
        b
    }
}

/// Dijkstra three-way partition of `[lo, hi)` around `pivot`.
///
/// Returns `(lt, gt)` such that `[lo, lt)` is less than, `[lt, gt)` equal
/// to, and `[gt, hi)` greater than the pivot.
fn partition<A: SortAccess>(
    seq: &mut A,
    lo: usize,
    hi: usize,
    pivot: i64,
    stats: &mut SortStats,
) -> Result<(usize, usize)> {
    let mut lt = lo;
    let mut i = lo;
    let mut gt = hi;
    while i < gt {
        match seq.key(i)?.cmp(&pivot) {
            Ordering::Less => {
                if lt != i {
                    seq.swap(lt, i)?;
                    stats.swaps += 1;
                }
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                if gt != i {
                    seq.swap(i, gt)?;
                    stats.swaps += 1;
                }
            }
            Ordering::Equal => i += 1,
        }
    }
    Ok((lt, gt))
}

fn insertion_sort<A: SortAccess>(
    seq: &mut A,
    lo: usize,
    hi: usize,
    stats: &mut SortStats,
) -> Result<()> {
    for i in lo + 1..hi {
        let key = seq.key(i)?;
        let mut j = i;
        while j > lo && seq.key(j - 1)? > key {
            seq.swap(j - 1, j)?;
            stats.swaps += 1;
            j -= 1;
        }
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use offheap_core::BackendKind;
    use offheap_seq::LongSequence;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn matches_std_sort(
            values in proptest::collection::vec(-50i64..50, 0..400),
            threshold in 2usize..40,
        ) {
            let mut seq = LongSequence::from_slice(BackendKind::Fast, &values).unwrap();
            let sorter = Sorter::new(SortConfig { insertion_threshold: threshold }).unwrap();
            let stats = sorter.sort(&mut seq).unwrap();

            let mut expected = values.clone();
            expected.sort_unstable();
            prop_assert_eq!(seq.to_vec().unwrap(), expected);
            if !values.is_empty() {
                prop_assert!(stats.max_depth <= values.len().ilog2() as usize + 1);
            }
        }

        #[test]
        fn unchecked_matches_std_sort(
            values in proptest::collection::vec(any::<i64>(), 0..300),
            lo in 0usize..50,
        ) {
            let mut seq = LongSequence::allocate_fast(values.len()).unwrap();
            for (i, &v) in values.iter().enumerate() {
                seq.set(i, v).unwrap();
            }
            let lo = lo.min(values.len());
            Sorter::default()
                .sort_range_unchecked(&mut seq, lo..values.len())
                .unwrap();

            let mut expected = values.clone();
            expected[lo..].sort_unstable();
            prop_assert_eq!(seq.to_vec().unwrap(), expected);
        }
    }
}
