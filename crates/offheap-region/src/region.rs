//! Runtime-selected region.
//!
//! [`Region`] wraps either backend behind one type so callers can pick the
//! backend at construction time (usually from [`selected`](crate::selected))
//! without making every container generic.

use offheap_core::{BackendKind, Primitive, Result};

use crate::access::{copy_between, RegionAccess};
use crate::backend;
use crate::checked::CheckedRegion;
use crate::fast::FastRegion;

/// A region on whichever backend was requested.
#[derive(Debug)]
pub enum Region {
    /// Raw allocator block, native byte order.
    Fast(FastRegion),
    /// Boxed bytes, little-endian, always validated.
    Checked(CheckedRegion),
}

impl Region {
    /// Allocate `byte_len` bytes on the given backend.
    pub fn allocate(kind: BackendKind, byte_len: usize) -> Result<Self> {
        Ok(match kind {
            BackendKind::Fast => Self::Fast(FastRegion::allocate(byte_len)?),
            BackendKind::Checked => Self::Checked(CheckedRegion::allocate(byte_len)?),
        })
    }

    /// Allocate `byte_len` bytes on the process-wide selected backend.
    pub fn allocate_selected(byte_len: usize) -> Result<Self> {
        Self::allocate(backend::selected(), byte_len)
    }
}

macro_rules! delegate {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            Region::Fast($r) => $body,
            Region::Checked($r) => $body,
        }
    };
}

impl RegionAccess for Region {
    fn len(&self) -> usize {
        delegate!(self, r => r.len())
    }

    fn backend(&self) -> BackendKind {
        delegate!(self, r => r.backend())
    }

    fn is_live(&self) -> bool {
        delegate!(self, r => r.is_live())
    }

    fn allocate_like(&self, byte_len: usize) -> Result<Self> {
        Self::allocate(self.backend(), byte_len)
    }

    #[inline]
    fn get<T: Primitive>(&self, offset: usize) -> Result<T> {
        delegate!(self, r => r.get(offset))
    }

    #[inline]
    fn put<T: Primitive>(&mut self, offset: usize, value: T) -> Result<()> {
        delegate!(self, r => r.put(offset, value))
    }

    fn read_bytes(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        delegate!(self, r => r.read_bytes(offset, dst))
    }

    fn write_bytes(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        delegate!(self, r => r.write_bytes(offset, src))
    }

    fn copy_within(&mut self, src_offset: usize, dst_offset: usize, len: usize) -> Result<()> {
        delegate!(self, r => r.copy_within(src_offset, dst_offset, len))
    }

    fn copy_from(
        &mut self,
        dst_offset: usize,
        src: &Self,
        src_offset: usize,
        len: usize,
    ) -> Result<()> {
        match (self, src) {
            (Self::Fast(dst), Self::Fast(src)) => dst.copy_from(dst_offset, src, src_offset, len),
            (Self::Checked(dst), Self::Checked(src)) => {
                dst.copy_from(dst_offset, src, src_offset, len)
            }
            (dst, src) => copy_between(src, src_offset, dst, dst_offset, len),
        }
    }

    fn swap_bytes(&mut self, a: usize, b: usize, len: usize) -> Result<()> {
        delegate!(self, r => r.swap_bytes(a, b, len))
    }

    fn free(&mut self) {
        delegate!(self, r => r.free())
    }
}

impl From<FastRegion> for Region {
    fn from(region: FastRegion) -> Self {
        Self::Fast(region)
    }
}

impl From<CheckedRegion> for Region {
    fn from(region: CheckedRegion) -> Self {
        Self::Checked(region)
    }
}
