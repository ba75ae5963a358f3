//! Frequency, position and musical-tone arithmetic.
//!
//! Everything in here is pure: no allocation, no state. The UI works in
//! normalized positions, the synth works in Hz, and the labels and grid work
//! in semitones relative to a fixed reference note.

/// Named notes and nearest-semitone snapping.
pub mod converter;
/// Log-domain conversions between positions and frequencies.
pub mod math;
/// Label data describing a frequency in musical terms.
pub mod readout;

pub use converter::{
    frequency_to_tone, nearest_tone_frequency, tone_error, tone_name, tone_offset,
    BASE_FREQUENCY, OCTAVE, TONE_NAMES,
};
pub use math::{frequency_to_normalized, normalized_to_frequency, semitone_count};
pub use readout::Readout;
