//! Portable, always-validated region.
//!
//! [`CheckedRegion`] keeps its bytes in a boxed slice and encodes through
//! [`LittleEndianCodec`], so its contents are byte-identical on every target.
//! No `unsafe` here.

use std::fmt;

use offheap_core::{check_span, BackendKind, MemError, Primitive, Result};

use crate::access::{check_swap, RegionAccess};
use crate::codec::{ByteCodec, LittleEndianCodec};

/// Little-endian region over a boxed byte slice.
pub struct CheckedRegion {
    /// `None` once freed.
    data: Option<Box<[u8]>>,
    len: usize,
}

impl CheckedRegion {
    /// Allocate `byte_len` bytes.
    ///
    /// Returns [`MemError::AllocationFailed`] instead of aborting when the
    /// allocator refuses.
    pub fn allocate(byte_len: usize) -> Result<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(byte_len)
            .map_err(|_| MemError::AllocationFailed {
                requested: byte_len,
            })?;
        data.resize(byte_len, 0);
        tracing::trace!(bytes = byte_len, "allocated checked region");
        Ok(Self {
            data: Some(data.into_boxed_slice()),
            len: byte_len,
        })
    }

    fn bytes(&self) -> Result<&[u8]> {
        self.data.as_deref().ok_or(MemError::Released)
    }

    fn bytes_mut(&mut self) -> Result<&mut [u8]> {
        self.data.as_deref_mut().ok_or(MemError::Released)
    }
}

impl fmt::Debug for CheckedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckedRegion")
            .field("len", &self.len)
            .field("live", &self.data.is_some())
            .finish()
    }
}

impl RegionAccess for CheckedRegion {
    fn len(&self) -> usize {
        self.len
    }

    fn backend(&self) -> BackendKind {
        BackendKind::Checked
    }

    fn is_live(&self) -> bool {
        self.data.is_some()
    }

    fn allocate_like(&self, byte_len: usize) -> Result<Self> {
        Self::allocate(byte_len)
    }

    fn get<T: Primitive>(&self, offset: usize) -> Result<T> {
        LittleEndianCodec.get(self.bytes()?, offset)
    }

    fn put<T: Primitive>(&mut self, offset: usize, value: T) -> Result<()> {
        LittleEndianCodec.put(self.bytes_mut()?, offset, value)
    }

    fn read_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        let bytes = self.bytes()?;
        check_span(offset, dst.len(), bytes.len())?;
        dst.copy_from_slice(&bytes[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        let bytes = self.bytes_mut()?;
        check_span(offset, src.len(), bytes.len())?;
        bytes[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn copy_within(&mut self, src_offset: usize, dst_offset: usize, len: usize) -> Result<()> {
        let bytes = self.bytes_mut()?;
        check_span(src_offset, len, bytes.len())?;
        check_span(dst_offset, len, bytes.len())?;
        bytes.copy_within(src_offset..src_offset + len, dst_offset);
        Ok(())
    }

    fn copy_from(
        &mut self,
        dst_offset: usize,
        src: &Self,
        src_offset: usize,
        len: usize,
    ) -> Result<()> {
        let src_bytes = src.bytes()?;
        let dst_bytes = self.bytes_mut()?;
        LittleEndianCodec.copy_bytes(src_bytes, src_offset, dst_bytes, dst_offset, len)
    }

    fn swap_bytes(&mut self, a: usize, b: usize, len: usize) -> Result<()> {
        let bytes = self.bytes_mut()?;
        if check_swap(a, b, len, bytes.len())? {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let (head, tail) = bytes.split_at_mut(hi);
            head[lo..lo + len].swap_with_slice(&mut tail[..len]);
        }
        Ok(())
    }

    fn free(&mut self) {
        if self.data.take().is_some() {
            tracing::trace!(bytes = self.len, "released checked region");
        }
    }
}
