//! Gain application and bus summing.

/*
Summing Voices on a Bus
=======================

Every voice is an oscillator multiplied by its own gain curve:

    voice[i] = osc[i] × gain[i]

The voices are then ADDED on a shared bus, and the bus has a gain of its own:

    out[i] = (voice_a[i] + voice_b[i] + ...) × bus[i]

Vocabulary
----------

  gain        A multiplier applied to amplitude. 1.0 = unchanged, 0.0 = silence.

  bus         A single point where several signals are summed before going
              out. Here: the master bus feeding the audio device.

  headroom    How far the signal is from the ±1.0 ceiling of the output.


Why the Bus Gain Depends on Voice Count
---------------------------------------

Two full-scale sines summed can peak at 2.0, three at 3.0. Past ±1.0 the
device clips and it sounds harsh. Dividing the bus gain by the number of
sounding voices keeps the peak at or below the chosen volume:

    voices    bus gain (volume 0.8)    worst-case peak
      1            0.8                     0.8
      2            0.4                     0.8
      4            0.2                     0.8

The divisor never drops below 1; with nothing playing the bus simply sits at
the volume.
*/

/// Multiply a signal by a gain curve, sample by sample (in-place).
#[inline]
pub fn multiply_in_place(signal: &mut [f32], gain: &[f32]) {
    debug_assert_eq!(signal.len(), gain.len());

    for (s, &g) in signal.iter_mut().zip(gain.iter()) {
        *s *= g;
    }
}

/// Add `signal` onto `bus`.
#[inline]
pub fn accumulate(bus: &mut [f32], signal: &[f32]) {
    debug_assert_eq!(bus.len(), signal.len());

    for (b, &s) in bus.iter_mut().zip(signal.iter()) {
        *b += s;
    }
}

/// Bus gain for a given volume and number of sounding voices.
#[inline]
pub fn normalized_bus_gain(volume: f32, active_voices: usize) -> f32 {
    volume / active_voices.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_applies_curve() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        multiply_in_place(&mut signal, &[1.0, 0.5, 0.5, 0.0]);
        assert_eq!(signal, [1.0, 0.25, -0.25, 0.0]);
    }

    #[test]
    fn accumulate_sums_onto_bus() {
        let mut bus = [0.1, 0.2, 0.3];
        accumulate(&mut bus, &[0.1, -0.2, 0.5]);
        assert!((bus[0] - 0.2).abs() < 1e-6);
        assert_eq!(bus[1], 0.0);
        assert!((bus[2] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn bus_gain_divides_by_voices() {
        assert!((normalized_bus_gain(0.8, 2) - 0.4).abs() < 1e-6);
        assert_eq!(normalized_bus_gain(0.8, 1), 0.8);
        assert_eq!(normalized_bus_gain(0.8, 0), 0.8);
    }
}
