//! Sorting and searching for off-heap keyed sequences.
//!
//! Both operate on any [`KeyedSequence`](offheap_seq::KeyedSequence), so
//! long sequences, record sequences and growable sequences share one
//! implementation. Records are always moved whole. Sequences that
//! implement [`UncheckedKeyed`](offheap_seq::UncheckedKeyed) can also be
//! sorted through [`sort_unchecked`], which skips per-access checks in
//! release builds.
//!
//! ```
//! use offheap_algo::{range_search, sort, IndexRange};
//! use offheap_core::BackendKind;
//! use offheap_seq::LongSequence;
//!
//! let mut seq = LongSequence::from_slice(BackendKind::Checked, &[42, 41, 43, 42, 41, 42])?;
//! sort(&mut seq)?;
//! assert_eq!(range_search(&seq, 42)?, IndexRange::new(2, 4));
//! # Ok::<(), offheap_core::MemError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod search;
pub mod sort;

// Public re-exports for the primary API surface.
pub use config::SortConfig;
pub use search::{binary_search, binary_search_range, range_search, IndexRange, Probe};
pub use sort::{sort, sort_unchecked, SortStats, Sorter};
