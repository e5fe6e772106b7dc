//! Off-heap sequences built on [`offheap_region`] regions.
//!
//! - [`LongSequence`]: fixed-size array of `i64`.
//! - [`RecordSequence`]: fixed-size array of records, each an `i64` header
//!   followed by a fixed-width opaque payload.
//! - [`GrowableSequence`]: append-only wrapper over either, reallocating
//!   its backing per [`GrowthConfig`].
//!
//! All three implement [`KeyedSequence`], the seam the sorting and
//! searching algorithms operate on. Sequences built directly on a
//! [`FastRegion`](offheap_region::FastRegion) also implement
//! [`UncheckedKeyed`], whose element access is validated only in debug
//! builds.
//!
//! # Example
//!
//! ```
//! use offheap_core::BackendKind;
//! use offheap_seq::{GrowableLongs, GrowthConfig};
//!
//! let mut seq = GrowableLongs::with_config(BackendKind::Checked, GrowthConfig::default())?;
//! for v in [3, 1, 2] {
//!     seq.push(v)?;
//! }
//! assert_eq!(seq.to_vec()?, vec![3, 1, 2]);
//! # Ok::<(), offheap_core::MemError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod growable;
pub mod keyed;
pub mod long;
pub mod record;
pub mod unchecked;

// Public re-exports for the primary API surface.
pub use config::GrowthConfig;
pub use growable::{Backing, GrowableLongs, GrowableRecords, GrowableSequence};
pub use keyed::{KeyedSequence, Keys, SnapshotCursor};
pub use long::{LongSequence, LONG_WIDTH};
pub use record::{RecordSequence, HEADER_WIDTH};
pub use unchecked::UncheckedKeyed;
