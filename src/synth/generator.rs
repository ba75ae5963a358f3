use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    config::ThereminConfig,
    dsp::{
        amplify::{accumulate, multiply_in_place, normalized_bus_gain},
        GainParam, Waveform,
    },
    synth::{
        voice::{Voice, VoiceState},
        VoiceId,
    },
    tone::normalized_to_frequency,
    MAX_BLOCK_SIZE,
};

/// Seconds for a voice to ramp from its current gain to 1.
pub const ATTACK_TIME: f64 = 0.01;
/// Seconds for a voice to ramp to 0, and for the master bus to settle.
pub const RELEASE_TIME: f64 = 0.1;

/// Owns every voice and the master bus they are summed on.
///
/// Voices are created lazily, one per caller-supplied id, and are never
/// removed: a released voice stays in the table, silent but running, ready
/// for the same id to play again.
///
/// All commands are stamped with the generator's own clock, which advances
/// only as audio is rendered. Control calls never wait on the audio side;
/// they just replace gain ramps that `render_block` then follows.
pub struct WaveGenerator {
    sample_rate: f32,
    frames: u64,
    voices: BTreeMap<VoiceId, Voice>,
    master: GainParam,
    active_voices: usize,
    global_volume: f32,
    min: f64,
    max: f64,
    waveform: Waveform,
    voice_buf: Vec<f32>,
    gain_buf: Vec<f32>,
}

impl WaveGenerator {
    pub fn new(sample_rate: f32) -> Self {
        let global_volume = 1.0;
        Self {
            sample_rate,
            frames: 0,
            voices: BTreeMap::new(),
            master: GainParam::new(global_volume),
            active_voices: 0,
            global_volume,
            min: 20.0,
            max: 20_000.0,
            waveform: Waveform::Sine,
            voice_buf: vec![0.0; MAX_BLOCK_SIZE],
            gain_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Build a generator spanning the configured initial range.
    pub fn from_config(config: &ThereminConfig, sample_rate: f32) -> Self {
        Self::new(sample_rate)
            .with_range(config.init_start, config.init_end)
            .with_volume(config.volume)
            .with_waveform(config.waveform)
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.set_range(min, max);
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.set_volume(volume);
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.set_waveform(waveform);
        self
    }

    /// Seconds of audio rendered so far.
    pub fn current_time(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Create voice `id`, silent and tuned to the middle of the range.
    /// Does nothing if the voice already exists.
    pub fn init_voice(&mut self, id: VoiceId) {
        if self.voices.contains_key(&id) {
            return;
        }

        let frequency = normalized_to_frequency(0.5, self.min, self.max);
        self.voices
            .insert(id, Voice::new(self.waveform, frequency as f32));
        debug!(id, frequency, "voice initialized");
    }

    pub fn is_voice_initialized(&self, id: VoiceId) -> bool {
        self.voices.contains_key(&id)
    }

    /// Retune voice `id` immediately. Unknown ids and non-finite
    /// frequencies are ignored.
    pub fn set_frequency(&mut self, frequency: f64, id: VoiceId) {
        if !frequency.is_finite() {
            return;
        }
        let nyquist = self.sample_rate / 2.0;
        if let Some(voice) = self.voices.get_mut(&id) {
            voice.set_frequency((frequency as f32).clamp(0.0, nyquist));
        }
    }

    /// Start voice `id`: ramp its gain to 1 and rebalance the bus.
    pub fn play(&mut self, id: VoiceId) {
        let now = self.current_time();
        let Some(voice) = self.voices.get_mut(&id) else {
            return;
        };
        if voice.gain_target() >= 1.0 {
            return;
        }

        voice.attack(now, ATTACK_TIME);
        self.active_voices += 1;
        trace!(id, active = self.active_voices, "voice on");

        self.adjust_volume(now);
    }

    /// Release voice `id`: ramp its gain to 0 and rebalance the bus.
    pub fn stop(&mut self, id: VoiceId) {
        let now = self.current_time();
        let Some(voice) = self.voices.get_mut(&id) else {
            return;
        };
        if voice.gain_target() <= 0.0 {
            return;
        }

        voice.release(now, RELEASE_TIME);
        self.active_voices = self.active_voices.saturating_sub(1);
        trace!(id, active = self.active_voices, "voice off");

        self.adjust_volume(now);
    }

    /// Set the overall volume (clamped to [0, 1]). Applied to the bus
    /// immediately, without a ramp.
    pub fn set_volume(&mut self, volume: f32) {
        self.global_volume = volume.clamp(0.0, 1.0);
        let now = self.current_time();
        self.master.set(
            normalized_bus_gain(self.global_volume, self.active_voices),
            now,
        );
    }

    /// Update the frequency domain new voices are centred in.
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Switch every voice, present and future, to `waveform`.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        for voice in self.voices.values_mut() {
            voice.set_waveform(waveform);
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn active_voice_count(&self) -> usize {
        self.active_voices
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn global_volume(&self) -> f32 {
        self.global_volume
    }

    /// Value the master bus is ramping toward.
    pub fn bus_gain_target(&self) -> f32 {
        self.master.target()
    }

    /// Instantaneous master bus gain.
    pub fn bus_gain(&self) -> f32 {
        self.master.value_at(self.current_time())
    }

    pub fn voice_state(&self, id: VoiceId) -> Option<VoiceState> {
        let now = self.current_time();
        self.voices.get(&id).map(|voice| voice.state(now))
    }

    pub fn voice_gain(&self, id: VoiceId) -> Option<f32> {
        let now = self.current_time();
        self.voices.get(&id).map(|voice| voice.gain(now))
    }

    pub fn voice_frequency(&self, id: VoiceId) -> Option<f32> {
        self.voices.get(&id).map(Voice::frequency)
    }

    /// Render mono output into `out`, advancing the clock by `out.len()`
    /// frames.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        let len = out.len();
        let now = self.current_time();
        let voice_buf = &mut self.voice_buf[..len];
        let gain_buf = &mut self.gain_buf[..len];

        out.fill(0.0);
        for voice in self.voices.values_mut() {
            voice.render(voice_buf, gain_buf, now, self.sample_rate);
            accumulate(out, voice_buf);
        }

        self.master.render(gain_buf, now, self.sample_rate);
        multiply_in_place(out, gain_buf);

        self.frames += len as u64;
    }

    /// Ramp the bus toward volume / sounding voices.
    fn adjust_volume(&mut self, now: f64) {
        debug_assert_eq!(
            self.active_voices,
            self.voices
                .values()
                .filter(|voice| voice.gain_target() >= 1.0)
                .count()
        );

        let target = normalized_bus_gain(self.global_volume, self.active_voices);
        self.master.ramp_to(target, now, RELEASE_TIME);
    }
}
