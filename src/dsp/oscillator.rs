#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/*
Phase-Accumulator Oscillator
============================

The oscillator keeps a phase in [0, 1) and advances it by frequency /
sample_rate every sample. The waveform is a function of phase alone, so the
frequency can change between any two samples without a jump in the output:
the next sample simply continues from where the phase already is.

That is what a theremin needs. The pointer retunes the voice on every move
and the pitch follows instantly, with no glide and no click.

    phase   0.0        0.25       0.5        0.75       1.0
    sine    0          1          0         -1          0
    square  1          1         -1         -1          1
    saw    -1        -0.5         0         0.5         1
    tri    -1          0          1          0         -1
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    #[inline]
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            waveform,
            frequency,
            phase: 0.0,
        }
    }

    /// Retune immediately. Takes effect from the next rendered sample.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let out = self.waveform.sample(self.phase);
        self.phase += self.frequency / sample_rate;
        self.phase -= self.phase.floor();
        out
    }

    /// Move the phase on by `frames` samples without producing output.
    pub fn advance(&mut self, frames: usize, sample_rate: f32) {
        let cycles = self.frequency as f64 * frames as f64 / sample_rate as f64;
        self.phase = (self.phase as f64 + cycles).fract() as f32;
    }

    pub fn render(&mut self, out: &mut [f32], sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(sample_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_matches_closed_form() {
        let sample_rate = 48_000.0;
        let mut osc = Oscillator::new(Waveform::Sine, 440.0);

        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer, sample_rate);

        let n = 12;
        let expected = (TAU * 440.0 * n as f32 / sample_rate).sin();
        assert!((buffer[n] - expected).abs() < 1e-4, "expected {expected}, got {}", buffer[n]);
    }

    #[test]
    fn advance_matches_rendering() {
        let sample_rate = 1_000.0;
        let mut rendered = Oscillator::new(Waveform::Sawtooth, 30.0);
        let mut skipped = rendered.clone();

        let mut buffer = [0.0f32; 250];
        rendered.render(&mut buffer, sample_rate);
        skipped.advance(buffer.len(), sample_rate);

        let a = rendered.next_sample(sample_rate);
        let b = skipped.next_sample(sample_rate);
        assert!((a - b).abs() < 1e-3, "{a} vs {b}");
    }

    #[test]
    fn retune_keeps_phase_continuous() {
        let sample_rate = 1_000.0;
        let mut osc = Oscillator::new(Waveform::Sawtooth, 100.0);
        for _ in 0..3 {
            osc.next_sample(sample_rate);
        }
        // Phase is 0.3 now; a retune must not reset it.
        osc.set_frequency(50.0);
        let sample = osc.next_sample(sample_rate);
        assert!((sample - (2.0 * 0.3 - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn waveforms_stay_in_range() {
        for waveform in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Triangle,
        ] {
            let mut osc = Oscillator::new(waveform, 1234.5);
            let mut buffer = vec![0.0f32; 512];
            osc.render(&mut buffer, 44_100.0);
            assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)), "{waveform:?}");
        }
    }
}
