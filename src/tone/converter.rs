/*
Tones Relative to a Reference A
===============================

Tone positions are counted in semitones from A0/2 = 13.75 Hz, four octaves
below A440 (440 / 2^5). Using an A as tone 0 means the tone index modulo 12
indexes straight into a name table that starts at "A".

    tone = 12 * log2(f / 13.75)

    13.75 Hz  -> 0    (A)
    27.5  Hz  -> 12   (A, one octave up)
    440   Hz  -> 60   (A)
    261.6 Hz  -> 51   (C)

The continuous value tells you how far the pointer is from the nearest note;
rounding it gives the note itself.

Half-step boundaries
--------------------

`nearest_tone_frequency` takes a fractional `shift`. With shift = 0.5 it
returns the frequency exactly halfway (in log space) between the nearest note
and the one above, which is where a semitone cell of the grid ends.
*/

use std::f64::consts::PI;

/// Reference frequency for tone 0 (an A).
pub const BASE_FREQUENCY: f64 = 13.75;

/// Semitones per octave.
pub const OCTAVE: f64 = 12.0;

/// Names of the 12 semitones, starting at the reference A.
pub const TONE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Continuous semitone position of `freq` relative to [`BASE_FREQUENCY`].
#[inline]
pub fn frequency_to_tone(freq: f64) -> f64 {
    (freq / BASE_FREQUENCY).log2() * OCTAVE
}

/// Frequency of the semitone nearest to `freq`, moved by `shift` semitones.
///
/// `shift` may be fractional: `0.5` gives the upper boundary of the nearest
/// note's cell, `-1.0` the note below.
#[inline]
pub fn nearest_tone_frequency(freq: f64, shift: f64) -> f64 {
    let tone = frequency_to_tone(freq).round();
    BASE_FREQUENCY * ((tone + shift) / OCTAVE).exp2()
}

/// Name of the semitone nearest to `freq`.
pub fn tone_name(freq: f64) -> &'static str {
    TONE_NAMES[name_index(frequency_to_tone(freq).round())]
}

/// How far `freq` is from an exact note: 0.0 on a note, 1.0 halfway between
/// two notes.
#[inline]
pub fn tone_error(freq: f64) -> f64 {
    (frequency_to_tone(freq) * PI).sin().abs()
}

/// Position of `freq` inside its semitone cell, in [0, 1). An exact note sits
/// at 0.5; the cell edges are the half-step boundaries.
#[inline]
pub fn tone_offset(freq: f64) -> f64 {
    (frequency_to_tone(freq) - 0.5).rem_euclid(1.0)
}

/// Index into [`TONE_NAMES`] for a whole tone number, wrapping negatives.
pub(crate) fn name_index(tone: f64) -> usize {
    if !tone.is_finite() {
        return 0;
    }
    (tone as i64).rem_euclid(OCTAVE as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_a() {
        assert_eq!(tone_name(13.75), "A");
        assert_eq!(tone_name(27.5), "A");
        assert_eq!(tone_name(440.0), "A");
    }

    #[test]
    fn a440_is_tone_60() {
        assert!((frequency_to_tone(440.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn middle_c_is_named_c() {
        assert_eq!(tone_name(261.63), "C");
        assert_eq!(tone_name(277.18), "C#");
    }

    #[test]
    fn below_reference_wraps_to_positive_names() {
        // One semitone under 13.75 Hz is G#.
        let g_sharp = BASE_FREQUENCY * (-1.0f64 / 12.0).exp2();
        assert_eq!(tone_name(g_sharp), "G#");
    }

    #[test]
    fn snapping_exact_note_is_identity() {
        for freq in [55.0, 110.0, 261.625_565, 440.0, 3520.0] {
            let snapped = nearest_tone_frequency(freq, 0.0);
            assert!((snapped - freq).abs() < 1e-3, "{freq} -> {snapped}");
        }
    }

    #[test]
    fn snapping_rounds_to_nearest_semitone() {
        let snapped = nearest_tone_frequency(450.0, 0.0);
        assert!((snapped - 440.0).abs() < 1e-9);

        let snapped = nearest_tone_frequency(460.0, 0.0);
        assert!((snapped - 466.1638).abs() < 1e-3);
    }

    #[test]
    fn half_shift_lands_between_notes() {
        let upper = nearest_tone_frequency(440.0, 0.5);
        assert!((frequency_to_tone(upper) - 60.5).abs() < 1e-9);
        assert!(tone_error(upper) > 0.999);
    }

    #[test]
    fn offset_centres_exact_notes() {
        assert!((tone_offset(440.0) - 0.5).abs() < 1e-9);
        assert!(tone_error(440.0) < 1e-9);
    }
}
