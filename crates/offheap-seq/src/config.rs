//! Growth configuration for [`GrowableSequence`](crate::GrowableSequence).

use offheap_core::{MemError, Result};

/// Controls how a growable sequence enlarges its backing storage.
///
/// When the sequence is full, the next capacity is
/// `capacity + small_increment` while `capacity < small_threshold`, and
/// `capacity + capacity / 2` afterwards: a fixed step while small, then
/// ~1.5x geometric growth, which keeps appends amortised O(1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrowthConfig {
    /// Capacity (in elements) allocated at construction.
    ///
    /// Default: 12.
    pub initial_capacity: usize,

    /// Capacities below this grow by `small_increment`.
    ///
    /// Default: 6. Must be at least 2 so geometric growth always adds at
    /// least one element.
    pub small_threshold: usize,

    /// Fixed growth step for small capacities.
    ///
    /// Default: 12. Must be non-zero.
    pub small_increment: usize,
}

impl GrowthConfig {
    /// Default initial capacity in elements.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 12;

    /// Default capacity below which growth is a fixed step.
    pub const DEFAULT_SMALL_THRESHOLD: usize = 6;

    /// Default fixed growth step.
    pub const DEFAULT_SMALL_INCREMENT: usize = 12;

    /// Default growth parameters with a custom initial capacity.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.small_increment == 0 {
            return Err(MemError::config("small_increment must be non-zero"));
        }
        if self.small_threshold < 2 {
            return Err(MemError::config(format!(
                "small_threshold must be at least 2, got {}",
                self.small_threshold
            )));
        }
        Ok(())
    }

    /// Capacity to grow to from a full sequence of `capacity` elements.
    ///
    /// Fails with [`MemError::AllocationFailed`] if the count overflows.
    pub fn next_capacity(&self, capacity: usize) -> Result<usize> {
        let step = if capacity < self.small_threshold {
            self.small_increment
        } else {
            capacity / 2
        };
        capacity
            .checked_add(step)
            .ok_or(MemError::AllocationFailed {
                requested: usize::MAX,
            })
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            small_threshold: Self::DEFAULT_SMALL_THRESHOLD,
            small_increment: Self::DEFAULT_SMALL_INCREMENT,
        }
    }
}
