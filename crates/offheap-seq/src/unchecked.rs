//! Element access without per-call validation, for sequences on a
//! [`FastRegion`].
//!
//! Sequences over [`Region`](offheap_region::Region) or a
//! [`CheckedRegion`](offheap_region::CheckedRegion) always validate. A
//! sequence built directly on a [`FastRegion`] keeps the same safe surface
//! and adds `unsafe fn *_unchecked` methods that only `debug_assert!` their
//! indices, so a violation panics in debug builds and is undefined
//! behaviour in release builds.
//!
//! [`UncheckedKeyed`] lifts that surface to the sorting seam: an algorithm
//! can validate its range and the region's liveness once, then run its
//! inner loop through [`UncheckedKeyed::key_unchecked`] and
//! [`UncheckedKeyed::swap_unchecked`].

#![allow(unsafe_code)]

use offheap_core::Result;
use offheap_region::{FastRegion, RegionAccess};

use crate::growable::{Backing, GrowableSequence};
use crate::keyed::KeyedSequence;
use crate::long::{self, LongSequence, LONG_WIDTH};
use crate::record::{self, RecordSequence, HEADER_WIDTH};

/// A [`KeyedSequence`] that can also be read and rearranged without
/// bounds or liveness checks.
///
/// # Safety
///
/// Implementors guarantee that while [`is_live`](Self::is_live) returns
/// `true`, [`key_unchecked`](Self::key_unchecked) and
/// [`swap_unchecked`](Self::swap_unchecked) are sound for every index below
/// [`KeyedSequence::len`].
pub unsafe trait UncheckedKeyed: KeyedSequence {
    /// Whether the backing memory is still allocated.
    fn is_live(&self) -> bool;

    /// Key of the element at `index`.
    ///
    /// # Safety
    ///
    /// The sequence must be live and `index < self.len()`.
    unsafe fn key_unchecked(&self, index: usize) -> i64;

    /// Exchange the whole elements at `a` and `b`.
    ///
    /// # Safety
    ///
    /// The sequence must be live and both indices below `self.len()`.
    unsafe fn swap_unchecked(&mut self, a: usize, b: usize);
}

impl LongSequence<FastRegion> {
    /// Allocate `len` zeroed elements on a [`FastRegion`].
    pub fn allocate_fast(len: usize) -> Result<Self> {
        Ok(Self::from_region(FastRegion::allocate(long::byte_len(len)?)?))
    }

    /// Value at `index`, checked only in debug builds.
    ///
    /// # Safety
    ///
    /// The region must be live and `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> i64 {
        debug_assert!(index < self.len(), "index {index} outside {} elements", self.len());
        // SAFETY: `index < len` keeps the 8-byte span inside the region.
        unsafe { self.region().get_unchecked(index * LONG_WIDTH) }
    }

    /// Store `value` at `index`, checked only in debug builds.
    ///
    /// # Safety
    ///
    /// The region must be live and `index < self.len()`.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: i64) {
        debug_assert!(index < self.len(), "index {index} outside {} elements", self.len());
        // SAFETY: as in `get_unchecked`.
        unsafe { self.region_mut().put_unchecked(index * LONG_WIDTH, value) }
    }

    /// Exchange the values at `a` and `b`, checked only in debug builds.
    ///
    /// # Safety
    ///
    /// The region must be live and both indices below `self.len()`.
    #[inline]
    pub unsafe fn swap_unchecked(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.len() && b < self.len());
        if a == b {
            return;
        }
        // SAFETY: distinct indices below `len` name disjoint in-bounds spans.
        unsafe {
            self.region_mut()
                .swap_unchecked(a * LONG_WIDTH, b * LONG_WIDTH, LONG_WIDTH)
        }
    }
}

impl RecordSequence<FastRegion> {
    /// Allocate `len` zeroed records on a [`FastRegion`].
    pub fn allocate_fast(len: usize, payload_width: usize) -> Result<Self> {
        let bytes = record::byte_len(len, payload_width)?;
        Self::from_region(FastRegion::allocate(bytes)?, payload_width)
    }

    #[inline]
    fn debug_check(&self, index: usize) {
        debug_assert!(index < self.len(), "index {index} outside {} records", self.len());
    }

    /// Header of record `index`, checked only in debug builds.
    ///
    /// # Safety
    ///
    /// The region must be live and `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> i64 {
        self.debug_check(index);
        // SAFETY: `index < len` keeps the whole record inside the region.
        unsafe { self.region().get_unchecked(index * self.element_width()) }
    }

    /// Overwrite the header of record `index`, checked only in debug builds.
    ///
    /// # Safety
    ///
    /// The region must be live and `index < self.len()`.
    #[inline]
    pub unsafe fn set_header_unchecked(&mut self, index: usize, header: i64) {
        self.debug_check(index);
        let at = index * self.element_width();
        // SAFETY: as in `get_unchecked`.
        unsafe { self.region_mut().put_unchecked(at, header) }
    }

    /// Write header and payload of record `index`, checked only in debug
    /// builds.
    ///
    /// # Safety
    ///
    /// The region must be live, `index < self.len()` and
    /// `payload.len() == self.payload_width()`.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, index: usize, header: i64, payload: &[u8]) {
        self.debug_check(index);
        debug_assert_eq!(payload.len(), self.payload_width());
        let at = index * self.element_width();
        let region = self.region_mut();
        // SAFETY: the header and a payload of exactly `payload_width` bytes
        // fill record `index`, which lies inside the region.
        unsafe {
            region.put_unchecked(at, header);
            region.write_bytes_unchecked(at + HEADER_WIDTH, payload);
        }
    }

    /// Copy the payload of record `index` into `dst`, checked only in debug
    /// builds.
    ///
    /// # Safety
    ///
    /// The region must be live, `index < self.len()` and
    /// `dst.len() == self.payload_width()`.
    #[inline]
    pub unsafe fn get_payload_unchecked(&self, index: usize, dst: &mut [u8]) {
        self.debug_check(index);
        debug_assert_eq!(dst.len(), self.payload_width());
        let at = index * self.element_width() + HEADER_WIDTH;
        // SAFETY: as in `set_unchecked`.
        unsafe { self.region().read_bytes_unchecked(at, dst) }
    }

    /// Exchange records `a` and `b`, checked only in debug builds.
    ///
    /// # Safety
    ///
    /// The region must be live and both indices below `self.len()`.
    #[inline]
    pub unsafe fn swap_unchecked(&mut self, a: usize, b: usize) {
        self.debug_check(a);
        self.debug_check(b);
        if a == b {
            return;
        }
        let width = self.element_width();
        // SAFETY: distinct records below `len` are disjoint in-bounds spans.
        unsafe { self.region_mut().swap_unchecked(a * width, b * width, width) }
    }
}

// SAFETY: `len()` is the region length divided by the element width, so
// every index below it addresses a whole element of the live region.
unsafe impl UncheckedKeyed for LongSequence<FastRegion> {
    fn is_live(&self) -> bool {
        self.region().is_live()
    }

    #[inline]
    unsafe fn key_unchecked(&self, index: usize) -> i64 {
        // SAFETY: forwarded from the caller.
        unsafe { self.get_unchecked(index) }
    }

    #[inline]
    unsafe fn swap_unchecked(&mut self, a: usize, b: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { LongSequence::swap_unchecked(self, a, b) }
    }
}

// SAFETY: as for `LongSequence<FastRegion>`.
unsafe impl UncheckedKeyed for RecordSequence<FastRegion> {
    fn is_live(&self) -> bool {
        self.region().is_live()
    }

    #[inline]
    unsafe fn key_unchecked(&self, index: usize) -> i64 {
        // SAFETY: forwarded from the caller.
        unsafe { self.get_unchecked(index) }
    }

    #[inline]
    unsafe fn swap_unchecked(&mut self, a: usize, b: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { RecordSequence::swap_unchecked(self, a, b) }
    }
}

// SAFETY: the logical length never exceeds the backing's length, which
// the backing's own impl covers.
unsafe impl<B: Backing + UncheckedKeyed> UncheckedKeyed for GrowableSequence<B> {
    fn is_live(&self) -> bool {
        self.backing().is_live()
    }

    #[inline]
    unsafe fn key_unchecked(&self, index: usize) -> i64 {
        debug_assert!(index < self.len());
        // SAFETY: `index < len <= capacity`.
        unsafe { self.backing().key_unchecked(index) }
    }

    #[inline]
    unsafe fn swap_unchecked(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.len() && b < self.len());
        // SAFETY: both indices are below `len <= capacity`.
        unsafe { self.backing_mut().swap_unchecked(a, b) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offheap_core::MemError;

    use crate::config::GrowthConfig;

    #[test]
    fn long_unchecked_surface_agrees_with_checked() {
        let mut seq = LongSequence::allocate_fast(4).unwrap();
        // SAFETY: every index is below 4 and the region is live.
        unsafe {
            seq.set_unchecked(0, 10);
            seq.set_unchecked(3, -7);
            seq.swap_unchecked(0, 3);
            seq.swap_unchecked(1, 1);
            assert_eq!(seq.get_unchecked(0), -7);
        }
        assert_eq!(seq.to_vec().unwrap(), vec![-7, 0, 0, 10]);
        assert!(seq.is_live());
    }

    #[test]
    fn safe_surface_still_rejects_bad_indices_on_fast() {
        let seq = LongSequence::allocate_fast(2).unwrap();
        assert_eq!(
            seq.get(5),
            Err(MemError::IndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn record_unchecked_surface_moves_whole_records() {
        let mut seq = RecordSequence::allocate_fast(3, 2).unwrap();
        // SAFETY: indices below 3, payloads exactly 2 bytes, region live.
        unsafe {
            seq.set_unchecked(0, 30, &[3, 3]);
            seq.set_unchecked(2, 10, &[1, 1]);
            seq.set_header_unchecked(1, 20);
            seq.swap_unchecked(0, 2);
            assert_eq!(seq.get_unchecked(0), 10);
            let mut payload = [0u8; 2];
            seq.get_payload_unchecked(2, &mut payload);
            assert_eq!(payload, [3, 3]);
        }
        let mut payload = [0u8; 2];
        seq.get_payload(0, &mut payload).unwrap();
        assert_eq!((seq.get(0).unwrap(), payload), (10, [1, 1]));
        assert_eq!(seq.get(1).unwrap(), 20);
    }

    #[test]
    fn growable_unchecked_view_stops_at_logical_size() {
        let backing = LongSequence::allocate_fast(0).unwrap();
        let mut seq = GrowableSequence::with_backing(backing, GrowthConfig::default()).unwrap();
        for value in [3, 1, 2] {
            seq.push(value).unwrap();
        }
        assert!(seq.capacity() > seq.len());
        // SAFETY: indices below the logical size of 3.
        unsafe {
            seq.swap_unchecked(0, 1);
            assert_eq!(seq.key_unchecked(0), 1);
        }
        assert_eq!(seq.to_vec().unwrap(), vec![1, 3, 2]);
        seq.free();
        assert!(!UncheckedKeyed::is_live(&seq));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "outside 2 elements")]
    fn debug_builds_catch_unchecked_index_violations() {
        let seq = LongSequence::allocate_fast(2).unwrap();
        // SAFETY: not upheld on purpose; the debug assertion fires before
        // any memory is touched.
        unsafe {
            seq.get_unchecked(5);
        }
    }
}
