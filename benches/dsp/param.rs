//! Benchmarks for gain ramp rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use theremin_dsp::dsp::GainParam;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_param(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/param");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Mid-ramp: every sample interpolates
        let mut ramping = GainParam::new(0.0);
        ramping.ramp_to(1.0, 0.0, 1.0);
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| ramping.render(black_box(&mut buffer), black_box(0.25), SAMPLE_RATE))
        });

        // Settled: constant fill
        let settled = GainParam::new(0.5);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| settled.render(black_box(&mut buffer), black_box(10.0), SAMPLE_RATE))
        });
    }

    group.finish();
}
