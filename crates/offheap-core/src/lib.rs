//! Core types for the offheap workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! abstractions shared by the memory, sequence and algorithm crates: the
//! error taxonomy, primitive widths, backend identifiers and the bit-field
//! packer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod bits;
pub mod error;
pub mod primitive;

pub use backend::BackendKind;
pub use bits::BitSplit;
pub use error::{check_index, check_range, check_span, MemError, Result};
pub use primitive::{Primitive, Width};
