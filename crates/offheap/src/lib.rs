//! Offheap: large fixed-layout record sequences outside the allocator's
//! per-object bookkeeping, with in-place sorting and searching.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all offheap sub-crates. For most users, adding `offheap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use offheap::prelude::*;
//!
//! // Records carry an i64 header and a 4-byte payload.
//! let mut seq = GrowableRecords::new(4)?;
//! seq.push(42, b"late")?;
//! seq.push(7, b"soon")?;
//! seq.push(42, b"also")?;
//!
//! sort(&mut seq)?;
//! assert_eq!(seq.get(0)?, 7);
//! assert_eq!(range_search(&seq, 42)?, IndexRange::new(1, 2));
//!
//! let mut payload = [0u8; 4];
//! seq.get_payload(0, &mut payload)?;
//! assert_eq!(&payload, b"soon");
//! # Ok::<(), MemError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `offheap-core` | Errors, primitive widths, backend kind, bit packing |
//! | [`region`] | `offheap-region` | Raw regions, fast/checked backends, byte codecs |
//! | [`seq`] | `offheap-seq` | Long, record and growable sequences |
//! | [`algo`] | `offheap-algo` | Sorter, binary and range search |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`offheap-core`).
///
/// Contains [`types::MemError`], [`types::BackendKind`], [`types::Width`]
/// and the [`types::BitSplit`] packer.
pub use offheap_core as types;

/// Raw memory regions (`offheap-region`).
///
/// [`region::Region`] picks a backend per allocation;
/// [`region::selected`] reports the one chosen for this process.
pub use offheap_region as region;

/// Typed sequences (`offheap-seq`).
///
/// [`seq::LongSequence`], [`seq::RecordSequence`] and the growable
/// [`seq::GrowableSequence`] over either.
pub use offheap_seq as seq;

/// Sorting and searching (`offheap-algo`).
pub use offheap_algo as algo;

/// Common imports for typical offheap usage.
///
/// ```rust
/// use offheap::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use offheap_core::{BackendKind, BitSplit, MemError, Width};

    // Regions
    pub use offheap_region::{FastRegion, Region, RegionAccess};

    // Sequences
    pub use offheap_seq::{
        GrowableLongs, GrowableRecords, GrowableSequence, GrowthConfig, KeyedSequence,
        LongSequence, RecordSequence, UncheckedKeyed,
    };

    // Algorithms
    pub use offheap_algo::{
        binary_search, range_search, sort, sort_unchecked, IndexRange, Probe, SortConfig,
        Sorter,
    };
}
