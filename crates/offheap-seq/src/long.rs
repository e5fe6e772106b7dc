//! Fixed-size sequence of `i64` values in a region.

use offheap_core::{check_index, BackendKind, MemError, Result};
use offheap_region::{Region, RegionAccess};

use crate::keyed::KeyedSequence;

/// Bytes per element of a [`LongSequence`].
pub const LONG_WIDTH: usize = 8;

/// `len` signed 64-bit values packed back to back in one region.
///
/// Element `i` lives at byte offset `i * 8`. Every index is bounds-checked
/// against `len` before the region is touched, on both backends.
#[derive(Debug)]
pub struct LongSequence<R = Region> {
    region: R,
    len: usize,
}

impl LongSequence<Region> {
    /// Allocate `len` zeroed elements on the process-selected backend.
    pub fn new(len: usize) -> Result<Self> {
        Ok(Self::from_region(Region::allocate_selected(byte_len(len)?)?))
    }

    /// Allocate `len` zeroed elements on an explicit backend.
    pub fn with_backend(kind: BackendKind, len: usize) -> Result<Self> {
        Ok(Self::from_region(Region::allocate(kind, byte_len(len)?)?))
    }

    /// Copy `values` into a new sequence on `kind`.
    pub fn from_slice(kind: BackendKind, values: &[i64]) -> Result<Self> {
        let mut seq = Self::with_backend(kind, values.len())?;
        for (index, &value) in values.iter().enumerate() {
            seq.set(index, value)?;
        }
        Ok(seq)
    }
}

impl<R: RegionAccess> LongSequence<R> {
    /// View an existing region as longs. Trailing bytes that do not make a
    /// whole element are ignored.
    pub fn from_region(region: R) -> Self {
        let len = region.len() / LONG_WIDTH;
        Self { region, len }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at `index`.
    pub fn get(&self, index: usize) -> Result<i64> {
        check_index(index, self.len)?;
        self.region.get_i64(index * LONG_WIDTH)
    }

    /// Store `value` at `index`.
    pub fn set(&mut self, index: usize, value: i64) -> Result<()> {
        check_index(index, self.len)?;
        self.region.put_i64(index * LONG_WIDTH, value)
    }

    /// Store `value` in every element.
    pub fn fill(&mut self, value: i64) -> Result<()> {
        for index in 0..self.len {
            self.region.put_i64(index * LONG_WIDTH, value)?;
        }
        Ok(())
    }

    /// Exchange the values at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        check_index(a, self.len)?;
        check_index(b, self.len)?;
        if a == b {
            return Ok(());
        }
        let va = self.region.get_i64(a * LONG_WIDTH)?;
        let vb = self.region.get_i64(b * LONG_WIDTH)?;
        self.region.put_i64(a * LONG_WIDTH, vb)?;
        self.region.put_i64(b * LONG_WIDTH, va)
    }

    /// Copy every element out to a `Vec`.
    pub fn to_vec(&self) -> Result<Vec<i64>> {
        (0..self.len)
            .map(|index| self.region.get_i64(index * LONG_WIDTH))
            .collect()
    }

    /// Backend of the underlying region.
    pub fn backend(&self) -> BackendKind {
        self.region.backend()
    }

    /// The underlying region.
    pub fn region(&self) -> &R {
        &self.region
    }

    pub(crate) fn region_mut(&mut self) -> &mut R {
        &mut self.region
    }

    /// Release the region early. Later element access fails with
    /// [`MemError::Released`]; repeated calls are no-ops.
    pub fn free(&mut self) {
        self.region.free();
    }

    /// Unwrap into the underlying region.
    pub fn into_region(self) -> R {
        self.region
    }
}

impl<R: RegionAccess> KeyedSequence for LongSequence<R> {
    fn len(&self) -> usize {
        self.len
    }

    fn key(&self, index: usize) -> Result<i64> {
        self.get(index)
    }

    fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        LongSequence::swap(self, a, b)
    }
}

pub(crate) fn byte_len(len: usize) -> Result<usize> {
    len.checked_mul(LONG_WIDTH)
        .ok_or(MemError::AllocationFailed {
            requested: usize::MAX,
        })
}
