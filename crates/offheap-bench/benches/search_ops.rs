//! Criterion benchmarks for point and range search over sorted sequences.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use offheap_algo::{binary_search, range_search, sort};
use offheap_bench::{record_sequence, BenchProfile};
use offheap_core::BackendKind;

fn bench_point_and_range(c: &mut Criterion) {
    let profile = BenchProfile::reference();
    let mut seq = record_sequence(&profile, BackendKind::Fast, 11).unwrap();
    sort(&mut seq).unwrap();

    c.bench_function("binary_search_100k", |b| {
        let mut key = 0i64;
        b.iter(|| {
            key = (key + 7_919) % profile.key_space;
            black_box(binary_search(&seq, key).unwrap())
        });
    });

    c.bench_function("range_search_100k", |b| {
        let mut key = 0i64;
        b.iter(|| {
            key = (key + 7_919) % profile.key_space;
            black_box(range_search(&seq, key).unwrap())
        });
    });
}

criterion_group!(benches, bench_point_and_range);
criterion_main!(benches);
