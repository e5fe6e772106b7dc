//! Error taxonomy shared by every offheap crate.
//!
//! One enum covers the four failure families: invalid construction
//! arguments, allocator refusal, bounds violations and value-range
//! violations. Unsorted input to a search is *not* an error; it yields an
//! unspecified result.

use std::ops::Range;

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, MemError>;

/// Errors that can occur while allocating, accessing or arranging
/// off-heap memory.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemError {
    /// Invalid construction arguments (zero payload width, bad bit split,
    /// degenerate growth configuration). Raised at construction, never
    /// deferred.
    #[error("invalid configuration: {reason}")]
    Configuration {
        /// Human-readable description of the rejected argument.
        reason: String,
    },

    /// The backing allocator could not satisfy a request, either for an
    /// initial allocation or for growth. Never retried internally.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed {
        /// Number of bytes requested.
        requested: usize,
    },

    /// A byte access `[offset, offset + width)` falls outside the region.
    #[error("access of {width} bytes at offset {offset} is outside a region of {len} bytes")]
    OutOfBounds {
        /// Starting byte offset of the access.
        offset: usize,
        /// Number of bytes touched.
        width: usize,
        /// Byte length of the region or buffer.
        len: usize,
    },

    /// An element index falls outside `[0, len)`.
    #[error("index {index} is outside a sequence of {len} elements")]
    IndexOutOfBounds {
        /// The rejected index.
        index: usize,
        /// Number of valid elements.
        len: usize,
    },

    /// An unsigned write does not fit the target field width.
    #[error("value {value} does not fit an unsigned {bits}-bit field")]
    ValueOutOfRange {
        /// The rejected value.
        value: u64,
        /// Width of the field in bits.
        bits: u32,
    },

    /// A payload slice does not match the record's fixed payload width.
    #[error("payload of {actual} bytes does not match payload width {expected}")]
    PayloadWidthMismatch {
        /// The sequence's payload width.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// The region was already released.
    #[error("region has been released")]
    Released,
}

impl MemError {
    /// Shorthand for a [`MemError::Configuration`] with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Whether this error is a bounds violation (byte offset or index).
    pub fn is_bounds_violation(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::IndexOutOfBounds { .. })
    }
}

/// Check that `[offset, offset + width)` lies inside `len` bytes.
///
/// Overflowing offsets are reported as out of bounds rather than wrapping.
pub fn check_span(offset: usize, width: usize, len: usize) -> Result<()> {
    match offset.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(MemError::OutOfBounds { offset, width, len }),
    }
}

/// Check that `index` lies inside `[0, len)`.
pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(MemError::IndexOutOfBounds { index, len })
    }
}

/// Check that `range` is ascending and ends at or before `len`.
///
/// A reversed range reports its start as the offending index.
pub fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end {
        return Err(MemError::IndexOutOfBounds {
            index: range.start,
            len,
        });
    }
    if range.end > len {
        return Err(MemError::IndexOutOfBounds {
            index: range.end,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_at_end_is_valid() {
        assert!(check_span(8, 8, 16).is_ok());
        assert!(check_span(16, 0, 16).is_ok());
    }

    #[test]
    fn span_past_end_is_rejected() {
        let err = check_span(9, 8, 16).unwrap_err();
        assert_eq!(
            err,
            MemError::OutOfBounds {
                offset: 9,
                width: 8,
                len: 16
            }
        );
        assert!(err.is_bounds_violation());
    }

    #[test]
    fn overflowing_span_is_rejected_not_wrapped() {
        assert!(check_span(usize::MAX, 2, 16).is_err());
    }

    #[test]
    fn index_check() {
        assert!(check_index(0, 1).is_ok());
        assert_eq!(
            check_index(1, 1),
            Err(MemError::IndexOutOfBounds { index: 1, len: 1 })
        );
    }

    #[test]
    fn range_check() {
        assert!(check_range(&(0..4), 4).is_ok());
        assert!(check_range(&(4..4), 4).is_ok());
        assert_eq!(
            check_range(&(1..5), 4),
            Err(MemError::IndexOutOfBounds { index: 5, len: 4 })
        );
        #[allow(clippy::reversed_empty_ranges)]
        let backwards = 3..1;
        assert_eq!(
            check_range(&backwards, 4),
            Err(MemError::IndexOutOfBounds { index: 3, len: 4 })
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            MemError::config("payload width must be positive").to_string(),
            "invalid configuration: payload width must be positive"
        );
        assert_eq!(
            MemError::ValueOutOfRange { value: 300, bits: 8 }.to_string(),
            "value 300 does not fit an unsigned 8-bit field"
        );
        assert_eq!(MemError::Released.to_string(), "region has been released");
    }
}
