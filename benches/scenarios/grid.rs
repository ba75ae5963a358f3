//! Benchmarks for the per-frame UI math: grid layout and readouts.

use std::hint::black_box;

use criterion::Criterion;
use theremin_dsp::{grid::LogGrid, tone::Readout};

pub fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/grid");

    // Default picker range, ~67 semitones
    let picker = LogGrid::new(108.0, 5_000.0).with_labels(true);
    group.bench_function("picker_lines", |b| {
        b.iter(|| black_box(&picker).lines().count())
    });

    // Full audible range behind the range bar
    let background = LogGrid::new(20.0, 20_000.0);
    group.bench_function("background_lines", |b| {
        b.iter(|| black_box(&background).lines().count())
    });

    group.bench_function("readout", |b| {
        b.iter(|| Readout::new(black_box(632.45)))
    });

    group.finish();
}
