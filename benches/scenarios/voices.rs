//! Benchmarks for the generator with several voices held down.
//!
//! One voice is a single mouse button; three covers every button at once.
//! Eight is well past anything a mouse can do and shows how the voice table
//! scales.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use theremin_dsp::{dsp::Waveform, WaveGenerator};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn held(voices: usize, waveform: Waveform) -> WaveGenerator {
    let mut generator = WaveGenerator::new(SAMPLE_RATE)
        .with_range(108.0, 5_000.0)
        .with_waveform(waveform);
    for id in 0..voices {
        generator.init_voice(id);
        generator.set_frequency(220.0 * (id + 1) as f64, id);
        generator.play(id);
    }
    // Get past the attack so the steady state is measured
    let mut warmup = vec![0.0f32; SAMPLE_RATE as usize / 2];
    generator.render_block(&mut warmup);
    generator
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for voices in [1, 3, 8] {
            let mut generator = held(voices, Waveform::Sine);
            group.bench_with_input(
                BenchmarkId::new(format!("sine_x{voices}"), size),
                &size,
                |b, _| b.iter(|| generator.render_block(black_box(&mut buffer))),
            );
        }

        // Idle voices still cost a pass through the table
        let mut idle = held(3, Waveform::Sawtooth);
        for id in 0..3 {
            idle.stop(id);
        }
        let mut warmup = vec![0.0f32; SAMPLE_RATE as usize / 2];
        idle.render_block(&mut warmup);
        group.bench_with_input(BenchmarkId::new("released_x3", size), &size, |b, _| {
            b.iter(|| idle.render_block(black_box(&mut buffer)))
        });
    }

    group.finish();
}
