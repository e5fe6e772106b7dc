//! Test utilities for offheap development.
//!
//! Deterministic data generators seeded through ChaCha8 (see [`fixtures`])
//! and a one-call tracing setup for tests that want to see backend
//! selection and growth events.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    distinct_sorted_longs, random_longs, random_records, sorted_with_duplicates, TestRecord,
    BACKENDS,
};

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing to the test harness, filtered by
/// `RUST_LOG` (default: debug for the region and sequence crates).
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("offheap_region=debug,offheap_seq=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
