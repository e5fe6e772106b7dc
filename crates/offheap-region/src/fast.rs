//! Raw-pointer region with native byte order.
//!
//! [`FastRegion`] owns a [`RawBlock`] from the global allocator and reads and
//! writes through unaligned pointer loads. It has two surfaces:
//!
//! - the safe [`RegionAccess`] impl, which validates spans and liveness with
//!   a single comparison each and returns errors;
//! - the `unsafe fn *_unchecked` methods, which only `debug_assert!` their
//!   preconditions. A violation in a release build is undefined behaviour.

#![allow(unsafe_code)]

use std::fmt;
use std::ptr;

use offheap_core::{check_span, BackendKind, MemError, Primitive, Result};

use crate::access::{check_swap, RegionAccess};
use crate::raw::RawBlock;

/// Native-order region over a raw allocator block.
pub struct FastRegion {
    block: RawBlock,
}

impl FastRegion {
    /// Allocate `byte_len` bytes.
    ///
    /// Memory is zero-filled, but callers must still treat unwritten content
    /// as unspecified.
    pub fn allocate(byte_len: usize) -> Result<Self> {
        Ok(Self {
            block: RawBlock::allocate(byte_len)?,
        })
    }

    /// Base pointer if the region is still live.
    #[inline]
    fn live_ptr(&self) -> Result<*mut u8> {
        let ptr = self.block.ptr();
        if ptr.is_null() {
            Err(MemError::Released)
        } else {
            Ok(ptr)
        }
    }

    #[inline]
    fn debug_check(&self, offset: usize, width: usize) {
        debug_assert!(self.block.is_live(), "access to a released region");
        debug_assert!(
            check_span(offset, width, self.block.len()).is_ok(),
            "access of {width} bytes at offset {offset} outside region of {} bytes",
            self.block.len()
        );
    }

    /// Read a `T` at `offset` without validation.
    ///
    /// # Safety
    ///
    /// The region must be live and `offset + T::WIDTH <= self.len()`.
    #[inline]
    pub unsafe fn get_unchecked<T: Primitive>(&self, offset: usize) -> T {
        self.debug_check(offset, T::WIDTH);
        // SAFETY: the caller guarantees a live region and an in-bounds span;
        // `T` is a plain integer so any bit pattern is valid, and the block
        // was zero-initialised at allocation.
        unsafe { ptr::read_unaligned(self.block.ptr().add(offset).cast::<T>()) }
    }

    /// Write a `T` at `offset` without validation.
    ///
    /// # Safety
    ///
    /// The region must be live and `offset + T::WIDTH <= self.len()`.
    #[inline]
    pub unsafe fn put_unchecked<T: Primitive>(&mut self, offset: usize, value: T) {
        self.debug_check(offset, T::WIDTH);
        // SAFETY: the caller guarantees a live region and an in-bounds span;
        // `&mut self` excludes concurrent readers.
        unsafe { ptr::write_unaligned(self.block.ptr().add(offset).cast::<T>(), value) }
    }

    /// Copy `dst.len()` bytes starting at `offset` into `dst` without
    /// validation.
    ///
    /// # Safety
    ///
    /// The region must be live and `offset + dst.len() <= self.len()`.
    #[inline]
    pub unsafe fn read_bytes_unchecked(&self, offset: usize, dst: &mut [u8]) {
        self.debug_check(offset, dst.len());
        // SAFETY: the caller guarantees an in-bounds span of a live block;
        // `dst` is a caller slice and cannot alias region memory, which is
        // never handed out as a slice.
        unsafe {
            ptr::copy_nonoverlapping(self.block.ptr().add(offset), dst.as_mut_ptr(), dst.len())
        }
    }

    /// Copy `src` to `offset` without validation.
    ///
    /// # Safety
    ///
    /// The region must be live and `offset + src.len() <= self.len()`.
    #[inline]
    pub unsafe fn write_bytes_unchecked(&mut self, offset: usize, src: &[u8]) {
        self.debug_check(offset, src.len());
        // SAFETY: as in `read_bytes_unchecked`, with the roles reversed.
        unsafe { ptr::copy_nonoverlapping(src.as_ptr(), self.block.ptr().add(offset), src.len()) }
    }

    /// Exchange two `len`-byte ranges without validation.
    ///
    /// # Safety
    ///
    /// The region must be live, both ranges in bounds, and the ranges must
    /// not overlap.
    #[inline]
    pub unsafe fn swap_unchecked(&mut self, a: usize, b: usize, len: usize) {
        debug_assert!(matches!(check_swap(a, b, len, self.block.len()), Ok(true)));
        let base = self.block.ptr();
        // SAFETY: the caller guarantees two disjoint in-bounds ranges.
        unsafe { ptr::swap_nonoverlapping(base.add(a), base.add(b), len) }
    }
}

impl fmt::Debug for FastRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastRegion")
            .field("len", &self.block.len())
            .field("live", &self.block.is_live())
            .finish()
    }
}

impl RegionAccess for FastRegion {
    fn len(&self) -> usize {
        self.block.len()
    }

    fn backend(&self) -> BackendKind {
        BackendKind::Fast
    }

    fn is_live(&self) -> bool {
        self.block.is_live()
    }

    fn allocate_like(&self, byte_len: usize) -> Result<Self> {
        Self::allocate(byte_len)
    }

    #[inline]
    fn get<T: Primitive>(&self, offset: usize) -> Result<T> {
        self.live_ptr()?;
        check_span(offset, T::WIDTH, self.len())?;
        // SAFETY: liveness and span validated above.
        Ok(unsafe { self.get_unchecked(offset) })
    }

    #[inline]
    fn put<T: Primitive>(&mut self, offset: usize, value: T) -> Result<()> {
        self.live_ptr()?;
        check_span(offset, T::WIDTH, self.len())?;
        // SAFETY: liveness and span validated above.
        unsafe { self.put_unchecked(offset, value) };
        Ok(())
    }

    fn read_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        self.live_ptr()?;
        check_span(offset, dst.len(), self.len())?;
        // SAFETY: liveness and span validated above.
        unsafe { self.read_bytes_unchecked(offset, dst) };
        Ok(())
    }

    fn write_bytes(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        self.live_ptr()?;
        check_span(offset, src.len(), self.len())?;
        // SAFETY: liveness and span validated above.
        unsafe { self.write_bytes_unchecked(offset, src) };
        Ok(())
    }

    fn copy_within(&mut self, src_offset: usize, dst_offset: usize, len: usize) -> Result<()> {
        let base = self.live_ptr()?;
        check_span(src_offset, len, self.len())?;
        check_span(dst_offset, len, self.len())?;
        // SAFETY: both spans are in bounds; `ptr::copy` permits overlap.
        unsafe { ptr::copy(base.add(src_offset), base.add(dst_offset), len) };
        Ok(())
    }

    fn copy_from(
        &mut self,
        dst_offset: usize,
        src: &Self,
        src_offset: usize,
        len: usize,
    ) -> Result<()> {
        let dst_base = self.live_ptr()?;
        let src_base = src.live_ptr()?;
        check_span(src_offset, len, src.len())?;
        check_span(dst_offset, len, self.len())?;
        // SAFETY: both spans are in bounds of their own live blocks. The
        // borrows guarantee distinct regions; `ptr::copy` is used anyway so
        // the operation keeps memmove semantics.
        unsafe { ptr::copy(src_base.add(src_offset), dst_base.add(dst_offset), len) };
        Ok(())
    }

    fn swap_bytes(&mut self, a: usize, b: usize, len: usize) -> Result<()> {
        self.live_ptr()?;
        if check_swap(a, b, len, self.len())? {
            // SAFETY: `check_swap` proved both ranges in bounds and disjoint.
            unsafe { self.swap_unchecked(a, b, len) };
        }
        Ok(())
    }

    fn free(&mut self) {
        self.block.release();
    }
}
