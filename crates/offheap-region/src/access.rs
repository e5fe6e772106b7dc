//! The access contract shared by every region backend.
//!
//! [`RegionAccess`] is the seam between raw memory and the typed sequences
//! built on top of it. All operations validate their byte spans and return
//! [`MemError`](offheap_core::MemError) on violation. The fast backend adds an
//! `unsafe` unchecked surface on top (see [`FastRegion`](crate::FastRegion)).

use offheap_core::{BackendKind, MemError, Primitive, Result, Width};

/// Byte-addressed access to an owned block of memory.
///
/// Reads take `&self`, writes take `&mut self`. A region is owned by exactly
/// one value; dropping it releases the memory, and [`free`](Self::free)
/// releases early. Both are idempotent.
pub trait RegionAccess: Send + Sync {
    /// Byte length fixed at allocation.
    fn len(&self) -> usize;

    /// Whether the region holds zero bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which backend implements this region.
    fn backend(&self) -> BackendKind;

    /// Whether the memory is still held (not yet freed).
    fn is_live(&self) -> bool;

    /// Allocate a fresh region of `byte_len` bytes on the same backend.
    fn allocate_like(&self, byte_len: usize) -> Result<Self>
    where
        Self: Sized;

    /// Read a `T` at `offset`.
    fn get<T: Primitive>(&self, offset: usize) -> Result<T>;

    /// Write a `T` at `offset`.
    fn put<T: Primitive>(&mut self, offset: usize, value: T) -> Result<()>;

    /// Copy `dst.len()` bytes starting at `offset` into `dst`.
    fn read_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()>;

    /// Copy all of `src` into the region starting at `offset`.
    fn write_bytes(&mut self, offset: usize, src: &[u8]) -> Result<()>;

    /// Move `len` bytes from `src_offset` to `dst_offset` inside this region.
    ///
    /// Overlapping ranges are handled (memmove semantics).
    fn copy_within(&mut self, src_offset: usize, dst_offset: usize, len: usize) -> Result<()>;

    /// Copy `len` bytes from `src` at `src_offset` into this region at
    /// `dst_offset`.
    fn copy_from(
        &mut self,
        dst_offset: usize,
        src: &Self,
        src_offset: usize,
        len: usize,
    ) -> Result<()>
    where
        Self: Sized;

    /// Exchange the `len`-byte ranges starting at `a` and `b`.
    ///
    /// `a == b` is a no-op. Distinct overlapping ranges are rejected.
    fn swap_bytes(&mut self, a: usize, b: usize, len: usize) -> Result<()>;

    /// Release the memory now. Later calls are no-ops; later accesses fail
    /// with [`MemError::Released`].
    fn free(&mut self);

    /// Read a signed byte.
    fn get_i8(&self, offset: usize) -> Result<i8> {
        self.get(offset)
    }

    /// Read a signed 16-bit value.
    fn get_i16(&self, offset: usize) -> Result<i16> {
        self.get(offset)
    }

    /// Read a signed 32-bit value.
    fn get_i32(&self, offset: usize) -> Result<i32> {
        self.get(offset)
    }

    /// Read a signed 64-bit value.
    fn get_i64(&self, offset: usize) -> Result<i64> {
        self.get(offset)
    }

    /// Read an unsigned byte.
    fn get_u8(&self, offset: usize) -> Result<u8> {
        self.get(offset)
    }

    /// Read an unsigned 16-bit value.
    fn get_u16(&self, offset: usize) -> Result<u16> {
        self.get(offset)
    }

    /// Read an unsigned 32-bit value.
    fn get_u32(&self, offset: usize) -> Result<u32> {
        self.get(offset)
    }

    /// Read an unsigned 64-bit value.
    fn get_u64(&self, offset: usize) -> Result<u64> {
        self.get(offset)
    }

    /// Write a signed byte.
    fn put_i8(&mut self, offset: usize, value: i8) -> Result<()> {
        self.put(offset, value)
    }

    /// Write a signed 16-bit value.
    fn put_i16(&mut self, offset: usize, value: i16) -> Result<()> {
        self.put(offset, value)
    }

    /// Write a signed 32-bit value.
    fn put_i32(&mut self, offset: usize, value: i32) -> Result<()> {
        self.put(offset, value)
    }

    /// Write a signed 64-bit value.
    fn put_i64(&mut self, offset: usize, value: i64) -> Result<()> {
        self.put(offset, value)
    }

    /// Write an unsigned byte.
    fn put_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.put(offset, value)
    }

    /// Write an unsigned 16-bit value.
    fn put_u16(&mut self, offset: usize, value: u16) -> Result<()> {
        self.put(offset, value)
    }

    /// Write an unsigned 32-bit value.
    fn put_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.put(offset, value)
    }

    /// Write an unsigned 64-bit value.
    fn put_u64(&mut self, offset: usize, value: u64) -> Result<()> {
        self.put(offset, value)
    }

    /// Read an unsigned field of `width`, widened to `u64`.
    fn get_uint(&self, offset: usize, width: Width) -> Result<u64> {
        Ok(match width {
            Width::W8 => self.get::<u8>(offset)? as u64,
            Width::W16 => self.get::<u16>(offset)? as u64,
            Width::W32 => self.get::<u32>(offset)? as u64,
            Width::W64 => self.get::<u64>(offset)?,
        })
    }

    /// Write an unsigned `value` into a field of `width`.
    ///
    /// Values wider than the field fail with [`MemError::ValueOutOfRange`]
    /// and leave the region untouched.
    fn put_uint(&mut self, offset: usize, width: Width, value: u64) -> Result<()> {
        if !width.fits(value) {
            return Err(MemError::ValueOutOfRange {
                value,
                bits: width.bits(),
            });
        }
        match width {
            Width::W8 => self.put(offset, value as u8),
            Width::W16 => self.put(offset, value as u16),
            Width::W32 => self.put(offset, value as u32),
            Width::W64 => self.put(offset, value),
        }
    }
}

/// Validate a swap request; `Ok(false)` means nothing to do.
pub(crate) fn check_swap(a: usize, b: usize, len: usize, region_len: usize) -> Result<bool> {
    offheap_core::check_span(a, len, region_len)?;
    offheap_core::check_span(b, len, region_len)?;
    if a == b || len == 0 {
        return Ok(false);
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    if lo + len > hi {
        return Err(MemError::config(format!(
            "swap ranges at {a} and {b} of {len} bytes overlap"
        )));
    }
    Ok(true)
}

/// Copy `len` bytes between two regions through a bounce buffer.
///
/// Used when the regions have different backends.
pub fn copy_between<S, D>(
    src: &S,
    src_offset: usize,
    dst: &mut D,
    dst_offset: usize,
    len: usize,
) -> Result<()>
where
    S: RegionAccess,
    D: RegionAccess,
{
    offheap_core::check_span(dst_offset, len, dst.len())?;
    let mut bounce = vec![0u8; len];
    src.read_bytes(src_offset, &mut bounce)?;
    dst.write_bytes(dst_offset, &bounce)
}
