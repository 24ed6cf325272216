#![expect(missing_docs, reason = "criterion macros generate undocumented items")]

use criterion::{Criterion, criterion_group, criterion_main};
use cubic_utils::random::Random;
use cubic_utils::random::legacy_random::LegacyRandom;
use std::hint::black_box;

fn bench_next_f64(c: &mut Criterion) {
    let mut rng = LegacyRandom::from_seed(0);
    c.bench_function("legacy_random_next_f64", |b| {
        b.iter(|| black_box(rng.next_f64()));
    });
}

fn bench_next_i32_bounded(c: &mut Criterion) {
    let mut rng = LegacyRandom::from_seed(0);
    c.bench_function("legacy_random_next_i32_bounded", |b| {
        b.iter(|| black_box(rng.next_i32_bounded(black_box(100))));
    });
}

criterion_group!(benches, bench_next_f64, bench_next_i32_bounded);
criterion_main!(benches);
