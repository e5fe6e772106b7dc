//! Fixed-width integer primitives and field widths.
//!
//! [`Primitive`] is sealed: only the eight integer types `i8..=u64` can be
//! read from or written to raw memory, so every bit pattern a backend loads
//! is a valid value.

use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width integer that can be stored in a region or byte buffer.
pub trait Primitive: Copy + Default + fmt::Debug + PartialEq + sealed::Sealed + 'static {
    /// Size of the value in bytes.
    const WIDTH: usize;

    /// Decode from exactly `WIDTH` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Decode from exactly `WIDTH` native-order bytes.
    fn from_ne_slice(bytes: &[u8]) -> Self;

    /// Encode into exactly `WIDTH` bytes, little-endian.
    fn write_le_slice(self, out: &mut [u8]);

    /// Encode into exactly `WIDTH` bytes, native order.
    fn write_ne_slice(self, out: &mut [u8]);
}

macro_rules! impl_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Primitive for $t {
                const WIDTH: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_le_bytes(raw)
                }

                #[inline]
                fn from_ne_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_ne_bytes(raw)
                }

                #[inline]
                fn write_le_slice(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn write_ne_slice(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_primitive!(i8, u8, i16, u16, i32, u32, i64, u64);

/// Width of an unsigned field accessed through the widened
/// `get_uint`/`put_uint` operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    /// One byte.
    W8,
    /// Two bytes.
    W16,
    /// Four bytes.
    W32,
    /// Eight bytes.
    W64,
}

impl Width {
    /// Field width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }

    /// Field width in bits.
    pub const fn bits(self) -> u32 {
        (self.bytes() * 8) as u32
    }

    /// Largest unsigned value the field can hold.
    pub const fn max_value(self) -> u64 {
        match self {
            Self::W64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Whether `value` fits into this width without truncation.
    pub const fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}
