//! Point and range binary search over sorted keyed sequences.
//!
//! The sequence must already be sorted ascending by key. On unsorted input
//! results are unspecified but never panic.

use std::fmt;
use std::ops::{Range, RangeInclusive};

use offheap_core::{check_range, Result};
use offheap_seq::KeyedSequence;

/// Outcome of a point search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// Index of some element with the key. Which one is unspecified when
    /// the key repeats.
    Found(usize),
    /// The key is absent; inserting it at `insertion_point` keeps the
    /// sequence sorted.
    Absent {
        /// First index whose key is greater than the probe key.
        insertion_point: usize,
    },
}

impl Probe {
    /// Index of the match, if any.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::Absent { .. } => None,
        }
    }

    /// Signed encoding: the index when found, `-(insertion_point) - 1`
    /// otherwise.
    pub fn encode(self) -> i64 {
        match self {
            Self::Found(index) => index as i64,
            Self::Absent { insertion_point } => -(insertion_point as i64) - 1,
        }
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn from_encoded(encoded: i64) -> Self {
        if encoded >= 0 {
            Self::Found(encoded as usize)
        } else {
            Self::Absent {
                insertion_point: (-(encoded + 1)) as usize,
            }
        }
    }
}

/// Same shape as [`slice::binary_search`].
impl From<Probe> for std::result::Result<usize, usize> {
    fn from(probe: Probe) -> Self {
        match probe {
            Probe::Found(index) => Ok(index),
            Probe::Absent { insertion_point } => Err(insertion_point),
        }
    }
}

/// Inclusive index span of every occurrence of a key.
///
/// Empty spans hold [`IndexRange::EMPTY`], both bounds `-1`. A non-empty
/// span always has `from <= to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    from: i64,
    to: i64,
}

impl IndexRange {
    /// The "no occurrences" sentinel.
    pub const EMPTY: Self = Self { from: -1, to: -1 };

    /// Span covering both `a` and `b`, whichever order they come in.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            from: a.min(b) as i64,
            to: a.max(b) as i64,
        }
    }

    /// First matching index, or `-1` when empty.
    pub fn first(&self) -> i64 {
        self.from
    }

    /// Last matching index, or `-1` when empty.
    pub fn last(&self) -> i64 {
        self.to
    }

    /// Whether no element matched.
    pub fn is_empty(&self) -> bool {
        self.from < 0
    }

    /// Number of matching elements.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.to
            .checked_sub(self.from)
            .and_then(|span| usize::try_from(span).ok())
            .map_or(0, |span| span + 1)
    }

    /// The span as a Rust range, `None` when empty.
    pub fn as_range(&self) -> Option<RangeInclusive<usize>> {
        if self.is_empty() {
            None
        } else {
            Some(self.from as usize..=self.to as usize)
        }
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[]")
        } else {
            write!(f, "[{}, {}]", self.from, self.to)
        }
    }
}

/// Binary search the whole of `seq` for `key`.
pub fn binary_search<S: KeyedSequence>(seq: &S, key: i64) -> Result<Probe> {
    binary_search_range(seq, 0..seq.len(), key)
}

/// Binary search `seq[range]` for `key`.
///
/// Indices in the result are absolute, not relative to `range.start`.
pub fn binary_search_range<S: KeyedSequence>(
    seq: &S,
    range: Range<usize>,
    key: i64,
) -> Result<Probe> {
    check_range(&range, seq.len())?;
    let (mut lo, mut hi) = (range.start, range.end);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match seq.key(mid)?.cmp(&key) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => return Ok(Probe::Found(mid)),
        }
    }
    Ok(Probe::Absent {
        insertion_point: lo,
    })
}

/// Every index holding `key`, as one inclusive span.
///
/// Finds any occurrence, then searches `[0, hit]` for the first and
/// `[hit, len)` for the last, so long runs of duplicates cost O(log n).
pub fn range_search<S: KeyedSequence>(seq: &S, key: i64) -> Result<IndexRange> {
    let hit = match binary_search(seq, key)? {
        Probe::Found(index) => index,
        Probe::Absent { .. } => return Ok(IndexRange::EMPTY),
    };
    let first = lower_bound(seq, 0, hit, key)?;
    let last = upper_bound(seq, hit + 1, seq.len(), key)? - 1;
    Ok(IndexRange::new(first, last))
}

/// First index in `[lo, hi)` whose key is not less than `key`, or `hi`.
fn lower_bound<S: KeyedSequence>(seq: &S, mut lo: usize, mut hi: usize, key: i64) -> Result<usize> {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if seq.key(mid)? < key {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

/// First index in `[lo, hi)` whose key is greater than `key`, or `hi`.
fn upper_bound<S: KeyedSequence>(seq: &S, mut lo: usize, mut hi: usize, key: i64) -> Result<usize> {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if seq.key(mid)? <= key {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use offheap_core::BackendKind;
    use offheap_seq::LongSequence;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn range_search_matches_linear_scan(
            mut values in proptest::collection::vec(-20i64..20, 0..200),
            key in -25i64..25,
        ) {
            values.sort_unstable();
            let seq = LongSequence::from_slice(BackendKind::Fast, &values).unwrap();
            let span = range_search(&seq, key).unwrap();

            let first = values.iter().position(|&v| v == key);
            let last = values.iter().rposition(|&v| v == key);
            match (first, last) {
                (Some(f), Some(l)) => prop_assert_eq!(span, IndexRange::new(f, l)),
                _ => prop_assert_eq!(span, IndexRange::EMPTY),
            }
        }
    }
}
