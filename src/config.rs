#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::{fs, path::Path};

use thiserror::Error;

use crate::{dsp::Waveform, tone::frequency_to_normalized};

/// Everything needed to build a session.
///
/// Frequencies are in Hz. `min`/`max` bound the whole selectable domain;
/// `init_start`/`init_end` are where the range handles start out.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ThereminConfig {
    pub min: f64,
    pub max: f64,
    pub init_start: f64,
    pub init_end: f64,
    /// Smallest allowed gap between the range handles, as a fraction of the
    /// log-scaled domain.
    pub min_closure_norm: f64,
    /// 0.0 - 1.0
    pub volume: f32,
    pub waveform: Waveform,
    /// Snap pointer input to the nearest semitone.
    pub snap: bool,
    /// Draw note names on the picker grid.
    pub show_labels: bool,
}

impl Default for ThereminConfig {
    fn default() -> Self {
        Self {
            min: 20.0,
            max: 20_000.0,
            init_start: 108.0,
            init_end: 5_000.0,
            min_closure_norm: 0.1,
            volume: 0.5,
            waveform: Waveform::Sine,
            snap: false,
            show_labels: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("frequency bounds must satisfy 0 < min < max (got min={min}, max={max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("initial range {start}..{end} Hz must lie within {min}..{max} Hz with start < end")]
    InvalidInitialRange {
        start: f64,
        end: f64,
        min: f64,
        max: f64,
    },

    #[error("min_closure_norm must be in [0, 1) (got {0})")]
    InvalidClosure(f64),

    #[error("initial range {start}..{end} Hz is narrower than min_closure_norm {closure}")]
    InitialRangeTooNarrow { start: f64, end: f64, closure: f64 },

    #[error("volume must be in [0, 1] (got {0})")]
    InvalidVolume(f32),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[cfg(feature = "serde")]
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

impl ThereminConfig {
    /// Reject configurations the session could only run by silently
    /// clamping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { min, max, .. } = *self;
        if !(min > 0.0 && max > min && max.is_finite()) {
            return Err(ConfigError::InvalidBounds { min, max });
        }

        let (start, end) = (self.init_start, self.init_end);
        if !(min <= start && start < end && end <= max) {
            return Err(ConfigError::InvalidInitialRange {
                start,
                end,
                min,
                max,
            });
        }

        if !(0.0..1.0).contains(&self.min_closure_norm) {
            return Err(ConfigError::InvalidClosure(self.min_closure_norm));
        }

        let gap =
            frequency_to_normalized(end, min, max) - frequency_to_normalized(start, min, max);
        if gap < self.min_closure_norm {
            return Err(ConfigError::InitialRangeTooNarrow {
                start,
                end,
                closure: self.min_closure_norm,
            });
        }

        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::InvalidVolume(self.volume));
        }

        Ok(())
    }

    /// Load and validate a RON config file. Missing fields take their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_ron(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}
