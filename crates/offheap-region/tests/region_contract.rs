//! Contract tests run against both backends: every operation must behave the
//! same apart from the byte order of stored values.

use offheap_core::{BackendKind, MemError, Width};
use offheap_region::{ByteCodec, Codec, Region, RegionAccess};
use proptest::prelude::*;

const BACKENDS: [BackendKind; 2] = [BackendKind::Fast, BackendKind::Checked];

fn region_with(kind: BackendKind, bytes: &[u8]) -> Region {
    let mut region = Region::allocate(kind, bytes.len()).unwrap();
    region.write_bytes(0, bytes).unwrap();
    region
}

fn contents(region: &Region) -> Vec<u8> {
    let mut out = vec![0u8; region.len()];
    region.read_bytes(0, &mut out).unwrap();
    out
}

#[test]
fn zero_length_region_rejects_every_access() {
    for kind in BACKENDS {
        let region = Region::allocate(kind, 0).unwrap();
        assert!(region.is_empty());
        assert!(region.get_u8(0).unwrap_err().is_bounds_violation());
    }
}

#[test]
fn last_valid_offset_is_len_minus_width() {
    for kind in BACKENDS {
        let mut region = Region::allocate(kind, 16).unwrap();
        region.put_i64(8, 42).unwrap();
        assert_eq!(region.get_i64(8).unwrap(), 42);
        assert_eq!(
            region.put_i64(9, 42),
            Err(MemError::OutOfBounds {
                offset: 9,
                width: 8,
                len: 16
            })
        );
    }
}

#[test]
fn region_bytes_match_the_backend_codec() {
    for kind in BACKENDS {
        let mut region = Region::allocate(kind, 8).unwrap();
        region.put_i32(2, -123_456).unwrap();
        let bytes = contents(&region);
        let codec = Codec::for_backend(kind);
        assert_eq!(codec.get::<i32>(&bytes, 2).unwrap(), -123_456);
    }
}

#[test]
fn unsigned_puts_are_range_checked_on_both_backends() {
    for kind in BACKENDS {
        let mut region = Region::allocate(kind, 8).unwrap();
        region.put_uint(0, Width::W32, u32::MAX as u64).unwrap();
        assert_eq!(region.get_uint(0, Width::W32).unwrap(), u32::MAX as u64);
        assert_eq!(region.get_i32(0).unwrap(), -1);
        assert!(matches!(
            region.put_uint(4, Width::W16, 70_000),
            Err(MemError::ValueOutOfRange { bits: 16, .. })
        ));
    }
}

proptest! {
    #[test]
    fn copy_within_matches_slice_memmove(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        src in 0usize..64,
        dst in 0usize..64,
        len in 0usize..64,
    ) {
        let n = bytes.len();
        let src = src % n;
        let dst = dst % n;
        let len = len % (n - src.max(dst) + 1);

        let mut model = bytes.clone();
        model.copy_within(src..src + len, dst);

        for kind in BACKENDS {
            let mut region = region_with(kind, &bytes);
            region.copy_within(src, dst, len).unwrap();
            prop_assert_eq!(contents(&region), model.clone());
        }
    }

    #[test]
    fn put_then_get_round_trips(offset in 0usize..24, value in any::<i64>()) {
        for kind in BACKENDS {
            let mut region = Region::allocate(kind, 32).unwrap();
            region.put_i64(offset, value).unwrap();
            prop_assert_eq!(region.get_i64(offset).unwrap(), value);
            prop_assert_eq!(region.get_u64(offset).unwrap(), value as u64);
        }
    }
}
