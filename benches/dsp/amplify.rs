//! Benchmarks for gain and bus mixing primitives.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use theremin_dsp::dsp::amplify;

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let gain: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();

        let mut signal_copy = signal.clone();
        group.bench_with_input(
            BenchmarkId::new("multiply_in_place", size),
            &size,
            |b, _| {
                b.iter(|| {
                    signal_copy.copy_from_slice(&signal);
                    amplify::multiply_in_place(black_box(&mut signal_copy), black_box(&gain))
                })
            },
        );

        let mut bus = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("accumulate", size), &size, |b, _| {
            b.iter(|| {
                bus.fill(0.0);
                amplify::accumulate(black_box(&mut bus), black_box(&signal))
            })
        });
    }

    group.finish();
}
