//! Append-only sequences that reallocate their backing region as they fill.
//!
//! A [`GrowableSequence`] wraps a fixed-size backing ([`LongSequence`] or
//! [`RecordSequence`]) whose length is the capacity, and tracks a logical
//! size of its own. Growth allocates a larger backing on the same backend,
//! copies the live bytes, swaps it in, and only then releases the old one,
//! so a failed growth leaves the sequence untouched.

use std::mem;

use offheap_core::{check_index, BackendKind, Result};
use offheap_region::{selected, Region, RegionAccess};

use crate::config::GrowthConfig;
use crate::keyed::{KeyedSequence, Keys, SnapshotCursor};
use crate::long::{self, LongSequence};
use crate::record::{self, RecordSequence};

/// Fixed-size storage a [`GrowableSequence`] can grow into.
///
/// The backing's [`KeyedSequence::len`] is its capacity.
pub trait Backing: KeyedSequence + Sized {
    /// Region type holding the elements.
    type Region: RegionAccess;

    /// Bytes per element.
    fn element_width(&self) -> usize;

    /// The underlying region.
    fn region(&self) -> &Self::Region;

    /// Mutable access to the underlying region.
    fn region_mut(&mut self) -> &mut Self::Region;

    /// A zeroed backing of the same shape and backend with `capacity`
    /// elements.
    fn regrow(&self, capacity: usize) -> Result<Self>;

    /// Release the region. Repeated calls are no-ops.
    fn release(&mut self);
}

impl<R: RegionAccess> Backing for LongSequence<R> {
    type Region = R;

    fn element_width(&self) -> usize {
        long::LONG_WIDTH
    }

    fn region(&self) -> &R {
        LongSequence::region(self)
    }

    fn region_mut(&mut self) -> &mut R {
        LongSequence::region_mut(self)
    }

    fn regrow(&self, capacity: usize) -> Result<Self> {
        let region = LongSequence::region(self).allocate_like(long::byte_len(capacity)?)?;
        Ok(LongSequence::from_region(region))
    }

    fn release(&mut self) {
        self.free();
    }
}

impl<R: RegionAccess> Backing for RecordSequence<R> {
    type Region = R;

    fn element_width(&self) -> usize {
        RecordSequence::element_width(self)
    }

    fn region(&self) -> &R {
        RecordSequence::region(self)
    }

    fn region_mut(&mut self) -> &mut R {
        RecordSequence::region_mut(self)
    }

    fn regrow(&self, capacity: usize) -> Result<Self> {
        let width = self.payload_width();
        let region =
            RecordSequence::region(self).allocate_like(record::byte_len(capacity, width)?)?;
        RecordSequence::from_region(region, width)
    }

    fn release(&mut self) {
        self.free();
    }
}

/// Growable sequence of longs on the default region type.
pub type GrowableLongs = GrowableSequence<LongSequence>;

/// Growable sequence of records on the default region type.
pub type GrowableRecords = GrowableSequence<RecordSequence>;

/// Append-only sequence over a [`Backing`].
///
/// Indices at or past [`len`](Self::len) are rejected even when they fall
/// inside the backing's capacity.
#[derive(Debug)]
pub struct GrowableSequence<B> {
    backing: B,
    len: usize,
    config: GrowthConfig,
}

impl<B: Backing> GrowableSequence<B> {
    /// Wrap an existing backing. Its contents are treated as unused
    /// capacity.
    pub fn with_backing(backing: B, config: GrowthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backing,
            len: 0,
            config,
        })
    }

    /// Number of appended elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements the current backing holds before the next growth.
    pub fn capacity(&self) -> usize {
        self.backing.len()
    }

    /// Growth parameters.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// The current backing. Elements past `len()` are unused capacity.
    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub(crate) fn backing_mut(&mut self) -> &mut B {
        &mut self.backing
    }

    /// Unwrap into the current backing.
    pub fn into_backing(self) -> B {
        self.backing
    }

    /// Forget every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Release the backing region early. Later access fails with
    /// [`MemError::Released`](offheap_core::MemError::Released).
    pub fn free(&mut self) {
        self.backing.release();
    }

    /// Iterator over the keys of the current elements.
    pub fn iter(&self) -> Keys<'_, Self> {
        self.keys()
    }

    /// Detached cursor over the elements present right now. Elements
    /// appended after this call are never visited by it.
    pub fn snapshot(&self) -> SnapshotCursor {
        SnapshotCursor::new(self.len)
    }

    /// Index of a free slot, growing first if the backing is full.
    fn next_slot(&mut self) -> Result<usize> {
        if self.len == self.backing.len() {
            self.grow()?;
        }
        Ok(self.len)
    }

    fn grow(&mut self) -> Result<()> {
        let from = self.backing.len();
        let to = self.config.next_capacity(from)?;
        let mut next = self.backing.regrow(to)?;
        let live = self.len * self.backing.element_width();
        next.region_mut().copy_from(0, self.backing.region(), 0, live)?;
        let mut old = mem::replace(&mut self.backing, next);
        old.release();
        tracing::debug!(from, to, live_bytes = live, "grew sequence backing");
        Ok(())
    }
}

impl GrowableSequence<LongSequence<Region>> {
    /// Empty sequence on the process-selected backend with default growth.
    pub fn new() -> Result<Self> {
        Self::with_config(selected(), GrowthConfig::default())
    }

    /// Empty sequence on the process-selected backend with room for
    /// `capacity` elements before the first growth.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(selected(), GrowthConfig::with_initial_capacity(capacity))
    }

    /// Empty sequence on `kind` with explicit growth parameters.
    pub fn with_config(kind: BackendKind, config: GrowthConfig) -> Result<Self> {
        config.validate()?;
        let backing = LongSequence::with_backend(kind, config.initial_capacity)?;
        Self::with_backing(backing, config)
    }
}

impl<R: RegionAccess> GrowableSequence<LongSequence<R>> {
    /// Append `value`, growing if needed.
    pub fn push(&mut self, value: i64) -> Result<()> {
        let slot = self.next_slot()?;
        self.backing.set(slot, value)?;
        self.len += 1;
        Ok(())
    }

    /// Value at `index`.
    pub fn get(&self, index: usize) -> Result<i64> {
        check_index(index, self.len)?;
        self.backing.get(index)
    }

    /// Overwrite the value at `index`.
    pub fn set(&mut self, index: usize, value: i64) -> Result<()> {
        check_index(index, self.len)?;
        self.backing.set(index, value)
    }

    /// Copy the current elements out to a `Vec`.
    pub fn to_vec(&self) -> Result<Vec<i64>> {
        (0..self.len).map(|index| self.backing.get(index)).collect()
    }
}

impl GrowableSequence<RecordSequence<Region>> {
    /// Empty record sequence on the process-selected backend.
    pub fn new(payload_width: usize) -> Result<Self> {
        Self::with_config(selected(), payload_width, GrowthConfig::default())
    }

    /// Empty record sequence on the process-selected backend with room for
    /// `capacity` records before the first growth.
    pub fn with_capacity(payload_width: usize, capacity: usize) -> Result<Self> {
        Self::with_config(
            selected(),
            payload_width,
            GrowthConfig::with_initial_capacity(capacity),
        )
    }

    /// Empty record sequence on `kind` with explicit growth parameters.
    pub fn with_config(
        kind: BackendKind,
        payload_width: usize,
        config: GrowthConfig,
    ) -> Result<Self> {
        config.validate()?;
        let backing = RecordSequence::with_backend(kind, config.initial_capacity, payload_width)?;
        Self::with_backing(backing, config)
    }
}

impl<R: RegionAccess> GrowableSequence<RecordSequence<R>> {
    /// Payload bytes per record.
    pub fn payload_width(&self) -> usize {
        self.backing.payload_width()
    }

    /// Append a record whose payload is exactly `payload_width()` bytes.
    pub fn push(&mut self, header: i64, payload: &[u8]) -> Result<()> {
        let slot = self.next_slot()?;
        self.backing.set(slot, header, payload)?;
        self.len += 1;
        Ok(())
    }

    /// Append a record whose payload is read from `src[src_offset..]`.
    pub fn push_from(&mut self, header: i64, src: &[u8], src_offset: usize) -> Result<()> {
        let slot = self.next_slot()?;
        self.backing.set_from(slot, header, src, src_offset)?;
        self.len += 1;
        Ok(())
    }

    /// Header of record `index`.
    pub fn get(&self, index: usize) -> Result<i64> {
        check_index(index, self.len)?;
        self.backing.get(index)
    }

    /// Overwrite the header of record `index`.
    pub fn set_header(&mut self, index: usize, header: i64) -> Result<()> {
        check_index(index, self.len)?;
        self.backing.set_header(index, header)
    }

    /// Overwrite header and payload of record `index`. `payload` must be
    /// exactly `payload_width()` bytes.
    pub fn set(&mut self, index: usize, header: i64, payload: &[u8]) -> Result<()> {
        check_index(index, self.len)?;
        self.backing.set(index, header, payload)
    }

    /// Overwrite header and payload of record `index`, reading the payload
    /// from `src[src_offset..]`.
    pub fn set_from(
        &mut self,
        index: usize,
        header: i64,
        src: &[u8],
        src_offset: usize,
    ) -> Result<()> {
        check_index(index, self.len)?;
        self.backing.set_from(index, header, src, src_offset)
    }

    /// Copy the payload of record `index` into `dst`.
    pub fn get_payload(&self, index: usize, dst: &mut [u8]) -> Result<()> {
        check_index(index, self.len)?;
        self.backing.get_payload(index, dst)
    }

    /// Copy the payload of record `index` into `dst[dst_offset..]`.
    pub fn get_payload_into(&self, index: usize, dst: &mut [u8], dst_offset: usize) -> Result<()> {
        check_index(index, self.len)?;
        self.backing.get_payload_into(index, dst, dst_offset)
    }
}

impl<B: Backing> KeyedSequence for GrowableSequence<B> {
    fn len(&self) -> usize {
        self.len
    }

    fn key(&self, index: usize) -> Result<i64> {
        check_index(index, self.len)?;
        self.backing.key(index)
    }

    fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        check_index(a, self.len)?;
        check_index(b, self.len)?;
        self.backing.swap(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offheap_core::MemError;

    fn longs(kind: BackendKind) -> GrowableLongs {
        GrowableSequence::<LongSequence>::with_config(kind, GrowthConfig::default()).unwrap()
    }

    #[test]
    fn capacity_follows_growth_policy() {
        let mut seq = longs(BackendKind::Fast);
        assert_eq!(seq.capacity(), 12);
        for value in 0..13 {
            seq.push(value).unwrap();
        }
        assert_eq!(seq.capacity(), 18);
        for value in 13..19 {
            seq.push(value).unwrap();
        }
        assert_eq!(seq.capacity(), 27);
    }

    #[test]
    fn zero_initial_capacity_grows_on_first_push() {
        let config = GrowthConfig::with_initial_capacity(0);
        let mut seq =
            GrowableSequence::<LongSequence>::with_config(BackendKind::Checked, config).unwrap();
        assert_eq!(seq.capacity(), 0);
        seq.push(5).unwrap();
        assert_eq!(seq.capacity(), 12);
        assert_eq!(seq.get(0).unwrap(), 5);
    }

    #[test]
    fn with_capacity_uses_selected_backend() {
        let seq = GrowableLongs::with_capacity(100).unwrap();
        assert_eq!(seq.capacity(), 100);
        assert_eq!(seq.backing().backend(), selected());
        let records = GrowableRecords::with_capacity(3, 5).unwrap();
        assert_eq!(records.capacity(), 5);
        assert_eq!(records.payload_width(), 3);
    }

    #[test]
    fn indices_past_len_rejected_inside_capacity() {
        let mut seq = longs(BackendKind::Checked);
        seq.push(1).unwrap();
        assert_eq!(
            seq.get(1),
            Err(MemError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert!(KeyedSequence::swap(&mut seq, 0, 3).is_err());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut seq = longs(BackendKind::Fast);
        for value in 0..20 {
            seq.push(value).unwrap();
        }
        let capacity = seq.capacity();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), capacity);
        seq.push(99).unwrap();
        assert_eq!(seq.to_vec().unwrap(), vec![99]);
    }

    #[test]
    fn freed_sequence_reports_released() {
        let mut seq = longs(BackendKind::Fast);
        seq.push(1).unwrap();
        seq.free();
        assert_eq!(seq.get(0), Err(MemError::Released));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = GrowthConfig {
            small_increment: 0,
            ..GrowthConfig::default()
        };
        assert!(GrowableSequence::<LongSequence>::with_config(BackendKind::Fast, config).is_err());
    }

    #[test]
    fn record_payload_survives_growth() {
        let mut seq = GrowableSequence::<RecordSequence>::with_config(
            BackendKind::Checked,
            2,
            GrowthConfig::with_initial_capacity(1),
        )
        .unwrap();
        for i in 0..40u8 {
            seq.push(i64::from(i) * 10, &[i, i.wrapping_add(1)]).unwrap();
        }
        let mut payload = [0u8; 2];
        for i in 0..40u8 {
            assert_eq!(seq.get(usize::from(i)).unwrap(), i64::from(i) * 10);
            seq.get_payload(usize::from(i), &mut payload).unwrap();
            assert_eq!(payload, [i, i.wrapping_add(1)]);
        }
    }

    #[test]
    fn failed_record_push_does_not_advance() {
        let mut seq = GrowableRecords::with_config(BackendKind::Fast, 4, GrowthConfig::default())
            .unwrap();
        assert!(seq.push(1, &[0; 3]).is_err());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn record_overwrite_stays_inside_logical_size() {
        let mut seq =
            GrowableRecords::with_config(BackendKind::Checked, 2, GrowthConfig::default())
                .unwrap();
        seq.push(1, &[1, 1]).unwrap();
        seq.push(2, &[2, 2]).unwrap();

        seq.set(0, 10, &[7, 8]).unwrap();
        seq.set_from(1, 20, &[0, 5, 6], 1).unwrap();
        let mut payload = [0u8; 2];
        seq.get_payload(0, &mut payload).unwrap();
        assert_eq!((seq.get(0).unwrap(), payload), (10, [7, 8]));
        seq.get_payload(1, &mut payload).unwrap();
        assert_eq!((seq.get(1).unwrap(), payload), (20, [5, 6]));

        assert_eq!(
            seq.set(2, 30, &[0, 0]),
            Err(MemError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(seq.set_from(2, 30, &[0, 0], 0).is_err());
        assert!(matches!(
            seq.set(0, 1, &[0]),
            Err(MemError::PayloadWidthMismatch { .. })
        ));
        assert_eq!(seq.len(), 2);
    }
}
