//! Process-wide backend selection.
//!
//! The backend is resolved once, on first use, by probing whether the fast
//! backend works on this target. The answer is memoised and read-only
//! afterwards. Falling back is silent apart from a `debug` event; callers
//! never see an error for it.
//!
//! The fast backend is skipped when:
//!
//! - the crate is built with the `checked-only` feature;
//! - the code runs under Miri;
//! - the probe (allocate, unaligned store/load round trip, release) fails.

use std::sync::OnceLock;

use offheap_core::{BackendKind, MemError, Result};

use crate::access::RegionAccess;
use crate::fast::FastRegion;

static SELECTED: OnceLock<BackendKind> = OnceLock::new();

/// The backend every `allocate_selected` call uses in this process.
pub fn selected() -> BackendKind {
    *SELECTED.get_or_init(|| {
        let kind = probe();
        tracing::debug!(backend = %kind, "resolved memory backend");
        kind
    })
}

/// Decide which backend this process can use, without memoising.
pub fn probe() -> BackendKind {
    if cfg!(feature = "checked-only") || cfg!(miri) {
        return BackendKind::Checked;
    }
    match fast_capability() {
        Ok(()) => BackendKind::Fast,
        Err(e) => {
            tracing::debug!(error = %e, "fast backend unavailable, using checked backend");
            BackendKind::Checked
        }
    }
}

const PROBE_PATTERN: u64 = 0x0123_4567_89AB_CDEF;

fn fast_capability() -> Result<()> {
    let mut region = FastRegion::allocate(16)?;
    region.put_u64(3, PROBE_PATTERN)?;
    let read = region.get_u64(3)?;
    region.free();
    if read != PROBE_PATTERN || region.is_live() {
        return Err(MemError::config("fast backend probe round trip failed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_stable() {
        let first = selected();
        for _ in 0..4 {
            assert_eq!(selected(), first);
        }
    }

    #[test]
    fn probe_agrees_with_selection() {
        assert_eq!(probe(), selected());
    }

    #[cfg(not(any(feature = "checked-only", miri)))]
    #[test]
    fn fast_backend_available_on_test_hosts() {
        assert_eq!(probe(), BackendKind::Fast);
    }
}
