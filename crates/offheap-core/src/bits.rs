//! Packing two sub-word integers into one 64-bit word.
//!
//! A [`BitSplit`] with `n` big bits stores a value `big` (n bits) and a value
//! `little` (64 − n bits). With `r = n mod 8` the word layout, most
//! significant bit first, is:
//!
//! ```text
//! | big[n-1 .. r]  (n - r bits) | little (64 - n bits) | big[r-1 .. 0] (r bits) |
//! ```
//!
//! The byte-aligned bulk of `big` stays contiguous at the top of the word so
//! it can be read with whole-byte loads; the `r` leftover bits sit at the
//! bottom. Inputs wider than their field are masked to the field width.

use crate::error::{MemError, Result};

/// Validated split of a 64-bit word into a big and a little field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitSplit {
    big_bits: u32,
}

impl BitSplit {
    /// Smallest permitted width of the big field.
    pub const MIN_BIG_BITS: u32 = 1;

    /// Largest permitted width of the big field.
    pub const MAX_BIG_BITS: u32 = 63;

    /// Create a split whose big field is `big_bits` wide.
    ///
    /// Returns [`MemError::Configuration`] unless `1 <= big_bits <= 63`.
    pub fn new(big_bits: u32) -> Result<Self> {
        if !(Self::MIN_BIG_BITS..=Self::MAX_BIG_BITS).contains(&big_bits) {
            return Err(MemError::config(format!(
                "big field width must be in 1..=63 bits, got {big_bits}"
            )));
        }
        Ok(Self { big_bits })
    }

    /// Width of the big field in bits (`n`).
    pub fn big_bits(&self) -> u32 {
        self.big_bits
    }

    /// Width of the little field in bits (`64 - n`).
    pub fn little_bits(&self) -> u32 {
        64 - self.big_bits
    }

    /// Bits of `big` stored at the bottom of the word (`n mod 8`).
    fn tail_bits(&self) -> u32 {
        self.big_bits % 8
    }

    /// Bits of `big` stored at the top of the word (`n - n mod 8`).
    fn head_bits(&self) -> u32 {
        self.big_bits - self.tail_bits()
    }

    /// Pack `big` and `little` into one word.
    pub fn pack(&self, big: u64, little: u64) -> u64 {
        let tail = self.tail_bits();
        let head = self.head_bits();
        let big = big & mask(self.big_bits);
        let little = little & mask(self.little_bits());

        let top = if head == 0 {
            0
        } else {
            (big >> tail) << (64 - head)
        };
        top | (little << tail) | (big & mask(tail))
    }

    /// Recover the big field from a packed word.
    pub fn big(&self, word: u64) -> u64 {
        let tail = self.tail_bits();
        let head = self.head_bits();
        let top = if head == 0 {
            0
        } else {
            (word >> (64 - head)) << tail
        };
        top | (word & mask(tail))
    }

    /// Recover the little field from a packed word.
    pub fn little(&self, word: u64) -> u64 {
        (word >> self.tail_bits()) & mask(self.little_bits())
    }
}

/// Pack `big` (an `n`-bit value) and `little` (a `64 - n`-bit value).
pub fn pack(big: u64, little: u64, n: u32) -> Result<u64> {
    Ok(BitSplit::new(n)?.pack(big, little))
}

/// Extract the `n`-bit big field from `word`.
pub fn big(word: u64, n: u32) -> Result<u64> {
    Ok(BitSplit::new(n)?.big(word))
}

/// Extract the `64 - n`-bit little field from `word`.
pub fn little(word: u64, n: u32) -> Result<u64> {
    Ok(BitSplit::new(n)?.little(word))
}

#[inline]
fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
