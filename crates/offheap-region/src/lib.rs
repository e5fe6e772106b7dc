//! Raw off-heap memory regions for offheap sequences.
//!
//! A region is a contiguous block of bytes with explicit lifetime, addressed
//! by byte offset. This crate is the only one in the workspace that may
//! contain `unsafe` code, and only in `raw`, [`fast`] and [`codec`].
//!
//! # Architecture
//!
//! ```text
//! RegionAccess (trait: get/put/copy/swap/free)
//! ├── FastRegion     raw allocator block, native order, + unsafe unchecked surface
//! ├── CheckedRegion  boxed bytes, little-endian, always validated
//! └── Region         enum over both, chosen at construction
//!
//! backend::selected()  probe once per process, memoised, read-only
//! codec::{NativeCodec, LittleEndianCodec}  same contract over caller buffers
//! ```
//!
//! # Lifetime
//!
//! A region has exactly one owner. Dropping the owner releases the memory on
//! every exit path; `free()` releases early. Release is take-once, so
//! repeated frees are no-ops.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod access;
pub mod backend;
pub mod checked;
pub mod codec;
pub mod fast;
mod raw;
pub mod region;

// Public re-exports for the primary API surface.
pub use access::{copy_between, RegionAccess};
pub use backend::{probe, selected};
pub use checked::CheckedRegion;
pub use codec::{ByteCodec, Codec, LittleEndianCodec, NativeCodec};
pub use fast::FastRegion;
pub use region::Region;
