//! The facade exposes a complete pipeline: build, sort, search, pack.

use offheap::prelude::*;
use offheap::types::bits;

#[test]
fn index_build_sort_and_lookup() {
    let mut index = GrowableRecords::new(8).unwrap();
    for id in 0..500u64 {
        let bucket = (id * 7_919 % 97) as i64;
        index.push(bucket, &id.to_le_bytes()).unwrap();
    }
    sort(&mut index).unwrap();

    let span = range_search(&index, 13).unwrap();
    let hits = span.as_range().unwrap();
    let mut payload = [0u8; 8];
    for i in hits {
        assert_eq!(index.get(i).unwrap(), 13);
        index.get_payload(i, &mut payload).unwrap();
        assert_eq!(u64::from_le_bytes(payload) * 7_919 % 97, 13);
    }
    assert!(range_search(&index, 97).unwrap().is_empty());
}

#[test]
fn packed_words_sort_by_big_field_prefix() {
    // The byte-aligned head of the big field sits at the top of the word,
    // so ordering unsigned words orders by that head first.
    let split = BitSplit::new(40).unwrap();
    let a = split.pack(1 << 39, 0);
    let b = split.pack(0, (1 << 24) - 1);
    assert!(a > b);
    assert_eq!(bits::big(a, 40).unwrap(), 1 << 39);
    assert_eq!(bits::little(b, 40).unwrap(), (1 << 24) - 1);
}

#[test]
fn selected_backend_is_reported_by_regions() {
    let region = Region::allocate_selected(16).unwrap();
    assert_eq!(region.backend(), offheap::region::selected());
}
