//! Event handling layer between the input surface and the generator.
//!
//! A [`Session`] is built once at startup and receives every pointer, key and
//! slider event. It turns positions into frequencies over the selected range,
//! drives the shared [`WaveGenerator`], keeps the grids in step with the
//! range selector and hands back [`Readout`]s for the labels.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    config::ThereminConfig,
    grid::LogGrid,
    range::RangeModel,
    synth::{VoiceId, WaveGenerator, DEFAULT_VOICE_ID},
    tone::{nearest_tone_frequency, normalized_to_frequency, Readout},
};

/// Relative slack when checking a snapped note against the range ends.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Generator shared between the event side and the audio callback.
pub type SharedGenerator = Arc<Mutex<WaveGenerator>>;

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Plays the default voice while held.
    Space,
}

pub struct Session {
    generator: SharedGenerator,
    range: RangeModel,
    /// Grid behind the picker, spanning the selected range.
    picker: LogGrid,
    /// Grid behind the range selector, spanning the whole domain.
    background: LogGrid,
    snap: bool,
    readouts: BTreeMap<VoiceId, Readout>,
}

impl Session {
    pub fn new(config: &ThereminConfig, generator: SharedGenerator) -> Self {
        let range = RangeModel::from_config(config).on_input({
            let generator = Arc::clone(&generator);
            move |start, end| lock(&generator).set_range(start, end)
        });

        let (start, end) = range.span();
        lock(&generator).set_range(start, end);

        Self {
            generator,
            range,
            picker: LogGrid::new(start, end).with_labels(config.show_labels),
            background: LogGrid::new(config.min, config.max),
            snap: config.snap,
            readouts: BTreeMap::new(),
        }
    }

    pub fn generator(&self) -> &SharedGenerator {
        &self.generator
    }

    pub fn range(&self) -> &RangeModel {
        &self.range
    }

    pub fn picker_grid(&self) -> &LogGrid {
        &self.picker
    }

    pub fn background_grid(&self) -> &LogGrid {
        &self.background
    }

    pub fn snap(&self) -> bool {
        self.snap
    }

    pub fn set_snap(&mut self, snap: bool) {
        self.snap = snap;
    }

    pub fn toggle_labels(&mut self) {
        self.picker.show_labels = !self.picker.show_labels;
    }

    /// Labels for every pointer currently held down.
    pub fn readouts(&self) -> impl Iterator<Item = (VoiceId, &Readout)> {
        self.readouts.iter().map(|(&id, readout)| (id, readout))
    }

    /// Frequency under a pointer at `norm` across the picker, rounded to
    /// hundredths of a Hz, snapped to the nearest semitone if enabled.
    ///
    /// A snapped note never leaves the selected range: past either end it
    /// steps one semitone back inside. A range holding no note at all falls
    /// back to the unsnapped frequency.
    pub fn frequency_at(&self, norm: f64) -> f64 {
        let (min, max) = self.range.span();
        let frequency = normalized_to_frequency(norm, min, max);
        if self.snap {
            let low = min * (1.0 - SNAP_TOLERANCE);
            let high = max * (1.0 + SNAP_TOLERANCE);
            let note = nearest_tone_frequency(frequency, 0.0);
            let note = if note > high {
                nearest_tone_frequency(frequency, -1.0)
            } else if note < low {
                nearest_tone_frequency(frequency, 1.0)
            } else {
                note
            };
            if (low..=high).contains(&note) {
                return note;
            }
        }
        (frequency * 100.0).round() / 100.0
    }

    /// A pointer pressed at `norm`: create its voice if needed, tune it and
    /// start it.
    pub fn pointer_down(&mut self, id: VoiceId, norm: f64) -> Readout {
        let frequency = self.frequency_at(norm);
        {
            let mut generator = lock(&self.generator);
            generator.init_voice(id);
            generator.set_frequency(frequency, id);
            generator.play(id);
        }
        self.track(id, frequency)
    }

    /// A pointer moved to `norm`. Ignored for pointers whose voice was never
    /// created.
    pub fn pointer_move(&mut self, id: VoiceId, norm: f64) -> Option<Readout> {
        let frequency = self.frequency_at(norm);
        {
            let mut generator = lock(&self.generator);
            if !generator.is_voice_initialized(id) {
                return None;
            }
            generator.set_frequency(frequency, id);
        }
        Some(self.track(id, frequency))
    }

    /// A pointer released.
    pub fn pointer_up(&mut self, id: VoiceId) {
        lock(&self.generator).stop(id);
        self.readouts.remove(&id);
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Space => {
                let mut generator = lock(&self.generator);
                if generator.is_voice_initialized(DEFAULT_VOICE_ID) {
                    generator.play(DEFAULT_VOICE_ID);
                }
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Space => {
                let mut generator = lock(&self.generator);
                if generator.is_voice_initialized(DEFAULT_VOICE_ID) {
                    generator.stop(DEFAULT_VOICE_ID);
                }
            }
        }
    }

    pub fn volume_input(&mut self, volume: f32) {
        lock(&self.generator).set_volume(volume);
    }

    /// Range start slider moved to `norm`.
    pub fn range_start_input(&mut self, norm: f64) -> (f64, f64) {
        let span = self.range.set_start(norm);
        self.picker.set_scale(span.0, span.1);
        span
    }

    /// Range end slider moved to `norm`.
    pub fn range_end_input(&mut self, norm: f64) -> (f64, f64) {
        let span = self.range.set_end(norm);
        self.picker.set_scale(span.0, span.1);
        span
    }

    /// A range slider was let go.
    pub fn range_change(&mut self) -> (f64, f64) {
        self.range.finish()
    }

    fn track(&mut self, id: VoiceId, frequency: f64) -> Readout {
        let readout = Readout::new(frequency);
        self.readouts.insert(id, readout);
        readout
    }
}

/// Lock the generator. A panic on another thread cannot leave it half
/// updated, so a poisoned lock is still usable.
pub fn lock(generator: &SharedGenerator) -> MutexGuard<'_, WaveGenerator> {
    generator.lock().unwrap_or_else(PoisonError::into_inner)
}
