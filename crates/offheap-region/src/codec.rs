//! Fixed-width integer encode/decode over caller-owned byte buffers.
//!
//! The same get/put contract as a region, but the bytes belong to the
//! caller. Two codecs exist:
//!
//! - [`NativeCodec`]: native byte order, unaligned raw loads and stores.
//! - [`LittleEndianCodec`]: always little-endian, pure slice code.
//!
//! On a big-endian target the two are **not** byte-compatible. Anything that
//! persists or transmits encoded buffers must pin one codec.

#![allow(unsafe_code)]

use std::ptr;

use offheap_core::{check_span, BackendKind, MemError, Primitive, Result, Width};

/// Encode/decode contract over byte slices.
pub trait ByteCodec {
    /// Backend this codec belongs to.
    fn backend(&self) -> BackendKind;

    /// Decode a `T` at `offset`.
    fn get<T: Primitive>(&self, buf: &[u8], offset: usize) -> Result<T>;

    /// Encode `value` at `offset`.
    fn put<T: Primitive>(&self, buf: &mut [u8], offset: usize, value: T) -> Result<()>;

    /// Decode an unsigned field of `width`, widened to `u64`.
    fn get_uint(&self, buf: &[u8], offset: usize, width: Width) -> Result<u64> {
        Ok(match width {
            Width::W8 => self.get::<u8>(buf, offset)? as u64,
            Width::W16 => self.get::<u16>(buf, offset)? as u64,
            Width::W32 => self.get::<u32>(buf, offset)? as u64,
            Width::W64 => self.get::<u64>(buf, offset)?,
        })
    }

    /// Encode an unsigned `value` into a field of `width`.
    ///
    /// Values that do not fit are rejected with
    /// [`MemError::ValueOutOfRange`]; nothing is written.
    fn put_uint(&self, buf: &mut [u8], offset: usize, width: Width, value: u64) -> Result<()> {
        if !width.fits(value) {
            return Err(MemError::ValueOutOfRange {
                value,
                bits: width.bits(),
            });
        }
        match width {
            Width::W8 => self.put(buf, offset, value as u8),
            Width::W16 => self.put(buf, offset, value as u16),
            Width::W32 => self.put(buf, offset, value as u32),
            Width::W64 => self.put(buf, offset, value),
        }
    }

    /// Copy `len` bytes from `src[src_offset..]` to `dst[dst_offset..]`.
    fn copy_bytes(
        &self,
        src: &[u8],
        src_offset: usize,
        dst: &mut [u8],
        dst_offset: usize,
        len: usize,
    ) -> Result<()> {
        check_span(src_offset, len, src.len())?;
        check_span(dst_offset, len, dst.len())?;
        dst[dst_offset..dst_offset + len].copy_from_slice(&src[src_offset..src_offset + len]);
        Ok(())
    }
}

/// Native byte order codec using unaligned raw loads.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeCodec;

impl NativeCodec {
    /// Decode a `T` at `offset` without bounds validation.
    ///
    /// Bounds are asserted in debug builds only.
    ///
    /// # Safety
    ///
    /// `offset + T::WIDTH` must not exceed `buf.len()`.
    #[inline]
    pub unsafe fn get_unchecked<T: Primitive>(&self, buf: &[u8], offset: usize) -> T {
        debug_assert!(check_span(offset, T::WIDTH, buf.len()).is_ok());
        // SAFETY: the caller guarantees the span is inside `buf`; `T` is a
        // plain integer, so every bit pattern is a valid value.
        unsafe { ptr::read_unaligned(buf.as_ptr().add(offset).cast::<T>()) }
    }

    /// Encode `value` at `offset` without bounds validation.
    ///
    /// # Safety
    ///
    /// `offset + T::WIDTH` must not exceed `buf.len()`.
    #[inline]
    pub unsafe fn put_unchecked<T: Primitive>(&self, buf: &mut [u8], offset: usize, value: T) {
        debug_assert!(check_span(offset, T::WIDTH, buf.len()).is_ok());
        // SAFETY: the caller guarantees the span is inside `buf`.
        unsafe { ptr::write_unaligned(buf.as_mut_ptr().add(offset).cast::<T>(), value) }
    }
}

impl ByteCodec for NativeCodec {
    fn backend(&self) -> BackendKind {
        BackendKind::Fast
    }

    #[inline]
    fn get<T: Primitive>(&self, buf: &[u8], offset: usize) -> Result<T> {
        check_span(offset, T::WIDTH, buf.len())?;
        // SAFETY: span validated above.
        Ok(unsafe { self.get_unchecked(buf, offset) })
    }

    #[inline]
    fn put<T: Primitive>(&self, buf: &mut [u8], offset: usize, value: T) -> Result<()> {
        check_span(offset, T::WIDTH, buf.len())?;
        // SAFETY: span validated above.
        unsafe { self.put_unchecked(buf, offset, value) };
        Ok(())
    }
}

/// Portable little-endian codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct LittleEndianCodec;

impl ByteCodec for LittleEndianCodec {
    fn backend(&self) -> BackendKind {
        BackendKind::Checked
    }

    #[inline]
    fn get<T: Primitive>(&self, buf: &[u8], offset: usize) -> Result<T> {
        check_span(offset, T::WIDTH, buf.len())?;
        Ok(T::from_le_slice(&buf[offset..offset + T::WIDTH]))
    }

    #[inline]
    fn put<T: Primitive>(&self, buf: &mut [u8], offset: usize, value: T) -> Result<()> {
        check_span(offset, T::WIDTH, buf.len())?;
        value.write_le_slice(&mut buf[offset..offset + T::WIDTH]);
        Ok(())
    }
}

/// Either codec, chosen at runtime from a [`BackendKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    /// Native byte order.
    Native,
    /// Little-endian.
    LittleEndian,
}

impl Codec {
    /// The codec whose byte order matches regions of `kind`.
    pub fn for_backend(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Fast => Self::Native,
            BackendKind::Checked => Self::LittleEndian,
        }
    }
}

impl ByteCodec for Codec {
    fn backend(&self) -> BackendKind {
        match self {
            Self::Native => BackendKind::Fast,
            Self::LittleEndian => BackendKind::Checked,
        }
    }

    fn get<T: Primitive>(&self, buf: &[u8], offset: usize) -> Result<T> {
        match self {
            Self::Native => NativeCodec.get(buf, offset),
            Self::LittleEndian => LittleEndianCodec.get(buf, offset),
        }
    }

    fn put<T: Primitive>(&self, buf: &mut [u8], offset: usize, value: T) -> Result<()> {
        match self {
            Self::Native => NativeCodec.put(buf, offset, value),
            Self::LittleEndian => LittleEndianCodec.put(buf, offset, value),
        }
    }
}
