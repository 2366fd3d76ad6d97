//! Performance benchmarks for the detector and calculator hot paths.
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mawarith::compute_inheritance;
use std::hint::black_box;

const SHORT: &str = "توفي رجل وترك زوجة وابنا";
const MIXED_RESIDUE: &str = "توفي رجل عن زوجة وابنين وبنتين";
const UMARIYYA: &str = "توفي رجل وترك زوجة وابا وام";
const LONG: &str =
    "توفيت امراة وتركت زوجا وابا وام وثلاثة ابناء وبنتين واخا شقيقا واختا لاب واختا لام";

fn bench_compute_inheritance(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_inheritance");
    for (name, input) in [
        ("short", SHORT),
        ("mixed_residue", MIXED_RESIDUE),
        ("umariyyatan", UMARIYYA),
        ("long", LONG),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| black_box(compute_inheritance(black_box(input))));
        });
    }
    group.finish();
}

fn bench_detect_only(c: &mut Criterion) {
    c.bench_function("detect_long_input", |b| {
        b.iter(|| black_box(mawarith::detector::detect(black_box(LONG))));
    });
}

fn bench_calculate_only(c: &mut Criterion) {
    c.bench_function("calculate_mixed_residue", |b| {
        b.iter_batched(
            || mawarith::detector::detect(MIXED_RESIDUE).1,
            |mut heirs| black_box(mawarith::calculator::calculate(&mut heirs)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_compute_inheritance,
    bench_detect_only,
    bench_calculate_only
);
criterion_main!(benches);
