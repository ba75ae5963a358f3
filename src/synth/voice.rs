use crate::dsp::{amplify::multiply_in_place, GainParam, Oscillator, Waveform};

/*
Voice Envelope
==============

A voice is an oscillator followed by its own gain stage. The oscillator keeps
running while the voice is silent; turning the voice "on" or "off" only moves
the gain:

    play  -> ramp gain to 1.0 over the attack time
    stop  -> ramp gain to 0.0 over the release time

The state is read back from the gain curve rather than stored separately, so
it can never disagree with what is actually being rendered.

    ┌────────┐   play    ┌─────────────┐  ramp done  ┌────┐
    │ Silent │ ────────→ │ RampingToOn │ ──────────→ │ On │
    └────────┘           └─────────────┘             └────┘
        ↑                  │     ↑                      │
        │                  │stop │play                  │ stop
        │                  ↓     │                      ↓
        │  ramp done    ┌──────────────┐ ←──────────────┘
        └────────────── │ RampingToOff │
                        └──────────────┘

A voice that does not exist yet is "uninitialized"; that state lives in the
generator's table (no entry), not here.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Silent,      // gain settled at 0
    RampingToOn, // attack in progress
    On,          // gain settled at 1
    RampingToOff, // release in progress
}

#[derive(Debug, Clone)]
pub struct Voice {
    oscillator: Oscillator,
    gain: GainParam,
}

impl Voice {
    /// A running but silent voice.
    pub fn new(waveform: Waveform, frequency: f32) -> Self {
        Self {
            oscillator: Oscillator::new(waveform, frequency),
            gain: GainParam::new(0.0),
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.oscillator.set_frequency(frequency);
    }

    pub fn frequency(&self) -> f32 {
        self.oscillator.frequency()
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.oscillator.set_waveform(waveform);
    }

    /// Instantaneous gain at `now`.
    pub fn gain(&self, now: f64) -> f32 {
        self.gain.value_at(now)
    }

    /// Gain the voice is heading to (or sitting at).
    pub fn gain_target(&self) -> f32 {
        self.gain.target()
    }

    pub fn state(&self, now: f64) -> VoiceState {
        let on = self.gain.target() >= 1.0;
        match (on, self.gain.is_settled(now)) {
            (true, true) => VoiceState::On,
            (true, false) => VoiceState::RampingToOn,
            (false, true) => VoiceState::Silent,
            (false, false) => VoiceState::RampingToOff,
        }
    }

    pub(crate) fn attack(&mut self, now: f64, duration: f64) {
        self.gain.ramp_to(1.0, now, duration);
    }

    pub(crate) fn release(&mut self, now: f64, duration: f64) {
        self.gain.ramp_to(0.0, now, duration);
    }

    /// Render oscillator × gain into `out`. `scratch` must be the same
    /// length and is clobbered.
    pub fn render(
        &mut self,
        out: &mut [f32],
        scratch: &mut [f32],
        start_time: f64,
        sample_rate: f32,
    ) {
        // Settled at zero: keep the phase running but skip the samples.
        if self.gain.is_settled(start_time) && self.gain.target() == 0.0 {
            self.oscillator.advance(out.len(), sample_rate);
            out.fill(0.0);
            return;
        }

        self.oscillator.render(out, sample_rate);
        self.gain.render(scratch, start_time, sample_rate);
        multiply_in_place(out, scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_voice_is_silent() {
        let voice = Voice::new(Waveform::Sine, 440.0);
        assert_eq!(voice.state(0.0), VoiceState::Silent);
        assert_eq!(voice.gain(0.0), 0.0);
    }

    #[test]
    fn attack_then_release_walks_the_states() {
        let mut voice = Voice::new(Waveform::Sine, 440.0);

        voice.attack(0.0, 0.01);
        assert_eq!(voice.state(0.005), VoiceState::RampingToOn);
        assert_eq!(voice.state(0.02), VoiceState::On);

        voice.release(0.02, 0.1);
        assert_eq!(voice.state(0.05), VoiceState::RampingToOff);
        assert_eq!(voice.state(0.5), VoiceState::Silent);
    }

    #[test]
    fn silent_voice_renders_zeros() {
        let mut voice = Voice::new(Waveform::Square, 440.0);
        let mut out = [1.0f32; 32];
        let mut scratch = [0.0f32; 32];
        voice.render(&mut out, &mut scratch, 0.0, 48_000.0);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn silent_voice_keeps_its_phase_running() {
        let mut voice = Voice::new(Waveform::Sawtooth, 100.0);
        let mut out = [0.0f32; 3];
        let mut scratch = [0.0f32; 3];
        voice.render(&mut out, &mut scratch, 0.0, 1_000.0);

        // Three silent samples at 100 Hz put the phase at 0.3.
        voice.attack(0.003, 0.0);
        let mut out = [0.0f32; 1];
        let mut scratch = [0.0f32; 1];
        voice.render(&mut out, &mut scratch, 0.003, 1_000.0);
        assert!((out[0] - (2.0 * 0.3 - 1.0)).abs() < 1e-5, "got {}", out[0]);
    }

    #[test]
    fn sounding_voice_follows_gain() {
        let mut voice = Voice::new(Waveform::Square, 10.0);
        voice.attack(0.0, 0.0);
        let mut out = [0.0f32; 8];
        let mut scratch = [0.0f32; 8];
        voice.render(&mut out, &mut scratch, 0.0, 1_000.0);
        assert!(out.iter().all(|&s| s == 1.0));
    }
}
