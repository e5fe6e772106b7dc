//! The keyed-sequence seam used by sorting and searching.
//!
//! A [`KeyedSequence`] is anything with `len` elements, each carrying a
//! signed 64-bit key, whose elements can be exchanged in place. Long
//! sequences use the value as key; record sequences use the header and swap
//! header and payload together.

use offheap_core::Result;

/// Indexed elements ordered by an `i64` key.
pub trait KeyedSequence {
    /// Number of addressable elements.
    fn len(&self) -> usize;

    /// Whether the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key of the element at `index`.
    fn key(&self, index: usize) -> Result<i64>;

    /// Exchange the whole elements at `a` and `b`.
    fn swap(&mut self, a: usize, b: usize) -> Result<()>;

    /// Iterate keys in index order.
    fn keys(&self) -> Keys<'_, Self>
    where
        Self: Sized,
    {
        Keys::new(self)
    }
}

/// Forward-only iterator over the keys of a [`KeyedSequence`].
///
/// The end is fixed when the iterator is created.
pub struct Keys<'a, S> {
    seq: &'a S,
    next: usize,
    end: usize,
}

impl<'a, S: KeyedSequence> Keys<'a, S> {
    pub(crate) fn new(seq: &'a S) -> Self {
        Self {
            seq,
            next: 0,
            end: seq.len(),
        }
    }
}

impl<S: KeyedSequence> Iterator for Keys<'_, S> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.seq.key(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<S: KeyedSequence> ExactSizeIterator for Keys<'_, S> {}

impl<S: KeyedSequence> std::iter::FusedIterator for Keys<'_, S> {}

/// Detached cursor that remembers the element count it was created with.
///
/// Unlike [`Keys`] it does not borrow the sequence, so the sequence can keep
/// growing while the cursor is alive; elements appended later are never
/// visited. Single pass, forward only, cannot be restarted.
#[derive(Debug)]
pub struct SnapshotCursor {
    next: usize,
    end: usize,
}

impl SnapshotCursor {
    /// Cursor over `[0, end)`.
    pub fn new(end: usize) -> Self {
        Self { next: 0, end }
    }

    /// Number of elements not yet visited.
    pub fn remaining(&self) -> usize {
        self.end - self.next
    }

    /// Advance and return the next index, or `None` when exhausted.
    pub fn next_index(&mut self) -> Option<usize> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(index)
    }

    /// Advance and read the next key from `seq`.
    pub fn next_key<S: KeyedSequence>(&mut self, seq: &S) -> Option<Result<i64>> {
        self.next_index().map(|index| seq.key(index))
    }
}
