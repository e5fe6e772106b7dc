//! Low-level allocator block backing [`FastRegion`](crate::FastRegion).
//!
//! This is the only place that talks to the global allocator directly.
//! Every `unsafe` block carries a `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, Ordering};

use offheap_core::{MemError, Result};

/// Alignment of every block. Eight bytes keeps `i64` headers at element
/// starts naturally aligned for the long sequence layout.
pub(crate) const BLOCK_ALIGN: usize = 8;

/// An owned, zero-initialised allocation with take-once release.
///
/// The pointer lives in an [`AtomicPtr`]; [`RawBlock::release`] swaps it
/// for null so exactly one caller deallocates, however many race.
pub(crate) struct RawBlock {
    ptr: AtomicPtr<u8>,
    len: usize,
}

impl RawBlock {
    /// Allocate `len` zeroed bytes.
    ///
    /// Zero-length blocks use a dangling, never-freed pointer.
    pub(crate) fn allocate(len: usize) -> Result<Self> {
        if len == 0 {
            return Ok(Self {
                ptr: AtomicPtr::new(NonNull::<u64>::dangling().as_ptr().cast::<u8>()),
                len: 0,
            });
        }
        let layout = Self::layout(len)?;
        // SAFETY: `layout` has a non-zero size (checked above).
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        if ptr.is_null() {
            return Err(MemError::AllocationFailed { requested: len });
        }
        tracing::trace!(bytes = len, "allocated raw block");
        Ok(Self {
            ptr: AtomicPtr::new(ptr),
            len,
        })
    }

    fn layout(len: usize) -> Result<Layout> {
        Layout::from_size_align(len, BLOCK_ALIGN)
            .map_err(|_| MemError::AllocationFailed { requested: len })
    }

    /// Byte length fixed at allocation.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Current base pointer, or null once released.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut u8 {
        self.ptr.load(Ordering::Acquire)
    }

    pub(crate) fn is_live(&self) -> bool {
        !self.ptr().is_null()
    }

    /// Release the block. Returns `true` for the single call that actually
    /// deallocated; every other call is a no-op returning `false`.
    pub(crate) fn release(&self) -> bool {
        let ptr = self.ptr.swap(ptr::null_mut(), Ordering::AcqRel);
        if ptr.is_null() {
            return false;
        }
        if self.len > 0 {
            // `layout` succeeded for this length at allocation time.
            if let Ok(layout) = Self::layout(self.len) {
                // SAFETY: `ptr` was returned by `alloc_zeroed` with this exact
                // layout, and the swap above hands it to exactly one caller.
                unsafe { alloc::dealloc(ptr, layout) };
            }
            tracing::trace!(bytes = self.len, "released raw block");
        }
        true
    }
}

impl Drop for RawBlock {
    fn drop(&mut self) {
        self.release();
    }
}
