//! Sorter configuration.

use offheap_core::{MemError, Result};

/// Tuning for [`Sorter`](crate::Sorter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortConfig {
    /// Ranges shorter than this are finished with insertion sort.
    ///
    /// Default: 16. Must be at least 2.
    pub insertion_threshold: usize,
}

impl SortConfig {
    /// Default insertion-sort cutoff.
    pub const DEFAULT_INSERTION_THRESHOLD: usize = 16;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.insertion_threshold < 2 {
            return Err(MemError::config(format!(
                "insertion_threshold must be at least 2, got {}",
                self.insertion_threshold
            )));
        }
        Ok(())
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            insertion_threshold: Self::DEFAULT_INSERTION_THRESHOLD,
        }
    }
}
