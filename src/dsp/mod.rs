//! Low-level DSP primitives used by the synth layer.
//!
//! These components are allocation-free and realtime-safe, so the voice
//! table can render them straight from the audio callback. They stay focused
//! on signal math; voice bookkeeping lives in `synth`.

/// Gain curves and bus summing.
pub mod amplify;
/// Oscillator waveforms.
pub mod oscillator;
/// Linear gain automation with cancel-and-hold.
pub mod param;

pub use oscillator::{Oscillator, Waveform};
pub use param::GainParam;
