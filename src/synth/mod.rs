// Purpose: voice table, per-voice envelopes, shared master bus
// This layer sits above the dsp primitives and owns every sounding voice

pub mod generator;
pub mod voice;

pub use generator::{WaveGenerator, ATTACK_TIME, RELEASE_TIME};
pub use voice::{Voice, VoiceState};

/// Identifies a voice. One per pointer/touch contact.
pub type VoiceId = usize;

/// Voice used by the primary pointer and the space bar.
pub const DEFAULT_VOICE_ID: VoiceId = 0;
