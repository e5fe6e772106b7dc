//! Fixed-size sequence of keyed records in a region.
//!
//! A record is an 8-byte signed header (the sort key) followed by a payload
//! of a fixed number of opaque bytes. Records are contiguous:
//!
//! ```text
//! | header 0 | payload 0 ... | header 1 | payload 1 ... | ...
//! ```
//!
//! Record `i` starts at `i * element_width()`, where
//! `element_width() = 8 + payload_width()`.

use offheap_core::{check_index, check_span, BackendKind, MemError, Result};
use offheap_region::{Region, RegionAccess};

use crate::keyed::KeyedSequence;

/// Bytes of the header that prefixes every record.
pub const HEADER_WIDTH: usize = 8;

/// `len` records of `8 + payload_width` bytes each.
#[derive(Debug)]
pub struct RecordSequence<R = Region> {
    region: R,
    len: usize,
    payload_width: usize,
}

impl RecordSequence<Region> {
    /// Allocate `len` zeroed records on the process-selected backend.
    pub fn new(len: usize, payload_width: usize) -> Result<Self> {
        let bytes = byte_len(len, payload_width)?;
        Self::from_region(Region::allocate_selected(bytes)?, payload_width)
    }

    /// Allocate `len` zeroed records on an explicit backend.
    pub fn with_backend(kind: BackendKind, len: usize, payload_width: usize) -> Result<Self> {
        let bytes = byte_len(len, payload_width)?;
        Self::from_region(Region::allocate(kind, bytes)?, payload_width)
    }
}

impl<R: RegionAccess> RecordSequence<R> {
    /// View an existing region as records with `payload_width` payload
    /// bytes. Trailing bytes that do not make a whole record are ignored.
    pub fn from_region(region: R, payload_width: usize) -> Result<Self> {
        let width = element_width(payload_width)?;
        let len = region.len() / width;
        Ok(Self {
            region,
            len,
            payload_width,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence has no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Payload bytes per record.
    pub fn payload_width(&self) -> usize {
        self.payload_width
    }

    /// Header plus payload bytes per record.
    pub fn element_width(&self) -> usize {
        HEADER_WIDTH + self.payload_width
    }

    fn offset(&self, index: usize) -> Result<usize> {
        check_index(index, self.len)?;
        Ok(index * self.element_width())
    }

    /// Header of record `index`.
    pub fn get(&self, index: usize) -> Result<i64> {
        let at = self.offset(index)?;
        self.region.get_i64(at)
    }

    /// Overwrite only the header of record `index`.
    pub fn set_header(&mut self, index: usize, header: i64) -> Result<()> {
        let at = self.offset(index)?;
        self.region.put_i64(at, header)
    }

    /// Write header and payload of record `index`.
    ///
    /// `payload` must be exactly [`payload_width`](Self::payload_width)
    /// bytes long.
    pub fn set(&mut self, index: usize, header: i64, payload: &[u8]) -> Result<()> {
        if payload.len() != self.payload_width {
            return Err(MemError::PayloadWidthMismatch {
                expected: self.payload_width,
                actual: payload.len(),
            });
        }
        self.set_from(index, header, payload, 0)
    }

    /// Write header and the payload taken from `src[src_offset..]`.
    pub fn set_from(
        &mut self,
        index: usize,
        header: i64,
        src: &[u8],
        src_offset: usize,
    ) -> Result<()> {
        let at = self.offset(index)?;
        check_span(src_offset, self.payload_width, src.len())?;
        self.region.put_i64(at, header)?;
        self.region.write_bytes(
            at + HEADER_WIDTH,
            &src[src_offset..src_offset + self.payload_width],
        )
    }

    /// Copy the payload of record `index` into `dst`, which must be exactly
    /// [`payload_width`](Self::payload_width) bytes long.
    pub fn get_payload(&self, index: usize, dst: &mut [u8]) -> Result<()> {
        if dst.len() != self.payload_width {
            return Err(MemError::PayloadWidthMismatch {
                expected: self.payload_width,
                actual: dst.len(),
            });
        }
        self.get_payload_into(index, dst, 0)
    }

    /// Copy the payload of record `index` into `dst[dst_offset..]`.
    pub fn get_payload_into(&self, index: usize, dst: &mut [u8], dst_offset: usize) -> Result<()> {
        let at = self.offset(index)?;
        check_span(dst_offset, self.payload_width, dst.len())?;
        self.region.read_bytes(
            at + HEADER_WIDTH,
            &mut dst[dst_offset..dst_offset + self.payload_width],
        )
    }

    /// Exchange records `a` and `b`, header and payload together.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let at_a = self.offset(a)?;
        let at_b = self.offset(b)?;
        self.region.swap_bytes(at_a, at_b, self.element_width())
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

    /// Release the region early. Repeated calls are no-ops.
    pub fn free(&mut self) {
        self.region.free();
    }

    /// Unwrap into the underlying region.
    pub fn into_region(self) -> R {
        self.region
    }
}

impl<R: RegionAccess> KeyedSequence for RecordSequence<R> {
    fn len(&self) -> usize {
        self.len
    }

    fn key(&self, index: usize) -> Result<i64> {
        self.get(index)
    }

    fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        RecordSequence::swap(self, a, b)
    }
}

pub(crate) fn element_width(payload_width: usize) -> Result<usize> {
    if payload_width == 0 {
        return Err(MemError::config("record payload width must be non-zero"));
    }
    payload_width
        .checked_add(HEADER_WIDTH)
        .ok_or(MemError::AllocationFailed {
            requested: usize::MAX,
        })
}

pub(crate) fn byte_len(len: usize, payload_width: usize) -> Result<usize> {
    len.checked_mul(element_width(payload_width)?)
        .ok_or(MemError::AllocationFailed {
            requested: usize::MAX,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKENDS: [BackendKind; 2] = [BackendKind::Fast, BackendKind::Checked];

    fn payload(seq: &RecordSequence, index: usize) -> Vec<u8> {
        let mut out = vec![0u8; seq.payload_width()];
        seq.get_payload(index, &mut out).unwrap();
        out
    }

    #[test]
    fn zero_payload_width_is_a_configuration_error() {
        assert!(matches!(
            RecordSequence::with_backend(BackendKind::Checked, 4, 0),
            Err(MemError::Configuration { .. })
        ));
    }

    #[test]
    fn records_are_laid_out_back_to_back() {
        for kind in BACKENDS {
            let mut seq = RecordSequence::with_backend(kind, 3, 4).unwrap();
            assert_eq!(seq.element_width(), 12);
            assert_eq!(seq.region().len(), 36);
            seq.set(1, 7, &[1, 2, 3, 4]).unwrap();
            assert_eq!(seq.region().get_i64(12).unwrap(), 7);
            assert_eq!(seq.region().get_u8(20).unwrap(), 1);
        }
    }

    #[test]
    fn set_requires_exact_payload_width() {
        let mut seq = RecordSequence::with_backend(BackendKind::Fast, 2, 3).unwrap();
        assert_eq!(
            seq.set(0, 1, &[1, 2]),
            Err(MemError::PayloadWidthMismatch {
                expected: 3,
                actual: 2
            })
        );
        let mut short = [0u8; 2];
        assert!(seq.get_payload(0, &mut short).is_err());
    }

    #[test]
    fn set_from_and_get_payload_into_use_offsets() {
        let mut seq = RecordSequence::with_backend(BackendKind::Checked, 2, 2).unwrap();
        seq.set_from(1, -9, &[0, 0, 5, 6], 2).unwrap();
        let mut dst = [0u8; 5];
        seq.get_payload_into(1, &mut dst, 3).unwrap();
        assert_eq!(dst, [0, 0, 0, 5, 6]);
        assert!(seq.set_from(0, 0, &[1, 2], 1).unwrap_err().is_bounds_violation());
    }

    #[test]
    fn swap_moves_header_and_payload_together() {
        for kind in BACKENDS {
            let mut seq = RecordSequence::with_backend(kind, 2, 3).unwrap();
            seq.set(0, 10, b"abc").unwrap();
            seq.set(1, 20, b"xyz").unwrap();
            seq.swap(0, 1).unwrap();
            assert_eq!(seq.get(0).unwrap(), 20);
            assert_eq!(payload(&seq, 0), b"xyz");
            assert_eq!(seq.get(1).unwrap(), 10);
            assert_eq!(payload(&seq, 1), b"abc");
            seq.swap(1, 1).unwrap();
            assert_eq!(seq.get(1).unwrap(), 10);
        }
    }

    #[test]
    fn set_header_leaves_payload() {
        let mut seq = RecordSequence::with_backend(BackendKind::Fast, 1, 2).unwrap();
        seq.set(0, 1, &[8, 9]).unwrap();
        seq.set_header(0, 2).unwrap();
        assert_eq!(seq.get(0).unwrap(), 2);
        assert_eq!(payload(&seq, 0), vec![8, 9]);
    }

    #[test]
    fn index_past_end_rejected() {
        let seq = RecordSequence::with_backend(BackendKind::Checked, 2, 1).unwrap();
        assert_eq!(
            seq.get(2),
            Err(MemError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }
}
