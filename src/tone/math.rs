/*
Log-Scaled Frequency Axis
=========================

Human pitch perception is logarithmic: going from 110 Hz to 220 Hz sounds like
the same step as going from 1760 Hz to 3520 Hz (one octave each). A pointer
axis that maps pixels linearly to Hz would cram every bass note into a few
pixels and spend most of the screen on the top octaves.

Vocabulary
----------

  norm        A position along the axis in [0, 1]. 0 is the left edge (min),
              1 is the right edge (max).

  min, max    The frequency bounds of the axis, in Hz.

  octave      A doubling of frequency. log2(f2 / f1) counts octaves.

  semitone    1/12 of an octave. 12 * log2(f2 / f1) counts semitones.


The Math
--------

Forward (position -> frequency), geometric interpolation between the bounds:

    f = min * (max / min)^norm
      = 2^(norm * log2(max / min) + log2(min))

Inverse (frequency -> position):

    norm = log2(f / min) / log2(max / min)

Example: the middle of a 20 Hz .. 20 kHz axis is not 10 kHz but the
geometric mean sqrt(20 * 20000) ~= 632.46 Hz.

    norm  0.0   0.25   0.5    0.75    1.0
    Hz    20    112    632    3557    20000

Equal distances on screen are equal musical intervals, which is exactly what a
theremin player wants under their fingers.
*/

/// Map a normalized position in [0, 1] to a frequency between `min` and `max`.
///
/// `norm` is clamped into [0, 1] first, so stray pointer coordinates outside
/// the picker still produce an in-range frequency.
#[inline]
pub fn normalized_to_frequency(norm: f64, min: f64, max: f64) -> f64 {
    let norm = norm.clamp(0.0, 1.0);
    (norm * (max / min).log2() + min.log2()).exp2()
}

/// Inverse of [`normalized_to_frequency`].
///
/// `min` is clamped into `[1, max]` to keep the logarithm defined.
#[inline]
pub fn frequency_to_normalized(freq: f64, min: f64, max: f64) -> f64 {
    let min = min.max(1.0).min(max);
    (freq / min).log2() / (max / min).log2()
}

/// Number of semitone steps spanned by `f1 .. f2`, rounded to the nearest
/// whole step.
#[inline]
pub fn semitone_count(f1: f64, f2: f64) -> i32 {
    if f1 == f2 {
        return 0;
    }
    (12.0 * (f2 / f1).log2()).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 20.0;
    const MAX: f64 = 20_000.0;

    #[test]
    fn bounds_map_to_edges() {
        assert!((normalized_to_frequency(0.0, MIN, MAX) - MIN).abs() < 1e-9);
        assert!((normalized_to_frequency(1.0, MIN, MAX) - MAX).abs() < 1e-6);
    }

    #[test]
    fn midpoint_is_geometric_mean() {
        let mid = normalized_to_frequency(0.5, MIN, MAX);
        assert!((mid - 632.4555).abs() < 1e-3, "got {mid}");
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        assert_eq!(
            normalized_to_frequency(-0.3, MIN, MAX),
            normalized_to_frequency(0.0, MIN, MAX)
        );
        assert_eq!(
            normalized_to_frequency(7.0, MIN, MAX),
            normalized_to_frequency(1.0, MIN, MAX)
        );
    }

    #[test]
    fn round_trip_inside_the_domain() {
        for freq in [20.5, 55.0, 440.0, 1234.5, 9999.0, 19_999.0] {
            let norm = frequency_to_normalized(freq, MIN, MAX);
            let back = normalized_to_frequency(norm, MIN, MAX);
            assert!((back - freq).abs() / freq < 1e-9, "{freq} -> {norm} -> {back}");
        }
    }

    #[test]
    fn strictly_increasing() {
        let mut prev = normalized_to_frequency(0.0, MIN, MAX);
        for i in 1..=1000 {
            let next = normalized_to_frequency(i as f64 / 1000.0, MIN, MAX);
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn sub_hertz_min_is_lifted_to_one() {
        // log2(f / 0.0) would be infinite; the inverse treats min as 1 Hz.
        let norm = frequency_to_normalized(100.0, 0.0, 10_000.0);
        assert!((norm - 0.5).abs() < 1e-12);
    }

    #[test]
    fn semitones_in_an_octave() {
        assert_eq!(semitone_count(220.0, 440.0), 12);
        assert_eq!(semitone_count(440.0, 440.0), 0);
        assert_eq!(semitone_count(440.0, 220.0), -12);
        assert_eq!(semitone_count(20.0, 20_000.0), 120);
    }
}
