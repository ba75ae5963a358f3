pub mod config; // Construction-time options, RON loading
pub mod dsp;
pub mod grid; // Semitone gridlines over a log-scaled axis
pub mod range; // Dual-handle frequency range selector
pub mod session; // Pointer/keyboard/slider events -> generator commands
pub mod synth; // Voices, envelopes and the shared master bus
pub mod tone; // Frequency <-> position <-> semitone conversions

pub use config::{ConfigError, ThereminConfig};
pub use session::{Key, Session, SharedGenerator};
pub use synth::{VoiceId, WaveGenerator, DEFAULT_VOICE_ID};

pub const MAX_BLOCK_SIZE: usize = 2048;
