use std::fmt;

use super::converter::{tone_error, tone_name, tone_offset};

/// Everything a label needs to describe a pointer's frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub frequency: f64,
    /// Nearest note name.
    pub tone_name: &'static str,
    /// 0.0 on a note, 1.0 halfway between notes.
    pub tone_error: f64,
    /// Position inside the note's cell; 0.5 is dead on.
    pub tone_offset: f64,
}

impl Readout {
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            tone_name: tone_name(frequency),
            tone_error: tone_error(frequency),
            tone_offset: tone_offset(frequency),
        }
    }

    /// Colour saturation in percent: fully saturated when in tune.
    pub fn saturation(&self) -> f64 {
        100.0 - self.tone_error * 100.0
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{:<2} {:.2} Hz", self.tone_name, self.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_name_and_frequency() {
        let readout = Readout::new(440.0);
        assert_eq!(readout.to_string(), "~A  440.00 Hz");

        let readout = Readout::new(466.16);
        assert_eq!(readout.to_string(), "~A# 466.16 Hz");
    }

    #[test]
    fn in_tune_is_fully_saturated() {
        assert!((Readout::new(440.0).saturation() - 100.0).abs() < 1e-6);
        let between = Readout::new(440.0 * (0.5f64 / 12.0).exp2());
        assert!(between.saturation() < 1e-6);
    }
}
