/*
Gain Automation
===============

A gain stage in this synth never jumps straight from one value to another
while sound is flowing: an instant step from 0.0 to 1.0 is a discontinuity in
the waveform and we hear it as a click. Instead every change is a short
straight-line ramp.

Vocabulary
----------

  value       The gain multiplier at a given instant (0.0 to 1.0).

  target      Where the current ramp is heading. Once the ramp ends, value
              stays at target until the next command.

  segment     One ramp: (start_time, start_value) -> (end_time, target).
              Times are seconds on the generator's clock.


The Shape
---------

    value
    1.0 ┤        ╭──────────────╮
        │       ╱               ╎╲
        │      ╱                ╎ ╲  ← ramp_to(0.0) issued here; the new
        │     ╱                 ╎  ╲   segment starts from the held value
    0.0 ┼────╯                  ╎   ╰────────
        └──────────────────────────────────→ time
            ramp_to(1.0)     ramp_to(0.0)


Cancel and Hold
---------------

A new command may arrive while a ramp is still running (the user taps twice
quickly). The new segment must start from the value the old one had reached
at that instant, not from its original start or its target. `ramp_to`
evaluates the old segment at `now`, pins that as the new origin, and replaces
the segment. The curve stays continuous no matter how commands interleave.

Only one segment is kept; a newer command always wins.
*/

/// A linearly automated parameter with a single active segment.
#[derive(Debug, Clone, Copy)]
pub struct GainParam {
    start_time: f64,
    start_value: f32,
    end_time: f64,
    target: f32,
}

impl GainParam {
    pub fn new(value: f32) -> Self {
        Self {
            start_time: 0.0,
            start_value: value,
            end_time: 0.0,
            target: value,
        }
    }

    /// Jump to `value` at `now`, dropping any ramp in progress.
    pub fn set(&mut self, value: f32, now: f64) {
        self.start_time = now;
        self.start_value = value;
        self.end_time = now;
        self.target = value;
    }

    /// Ramp linearly from the current value at `now` to `target`, arriving
    /// `duration` seconds later.
    pub fn ramp_to(&mut self, target: f32, now: f64, duration: f64) {
        let held = self.value_at(now);
        self.start_time = now;
        self.start_value = held;
        self.end_time = now + duration.max(0.0);
        self.target = target;
    }

    /// Value of the curve at `time`.
    pub fn value_at(&self, time: f64) -> f32 {
        if time >= self.end_time {
            return self.target;
        }
        if time <= self.start_time {
            return self.start_value;
        }
        let progress = ((time - self.start_time) / (self.end_time - self.start_time)) as f32;
        self.start_value + (self.target - self.start_value) * progress
    }

    /// Where the current segment ends up.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True once the segment has reached its target.
    pub fn is_settled(&self, time: f64) -> bool {
        time >= self.end_time
    }

    /// Fill `out` with the curve sampled every `1 / sample_rate` seconds,
    /// starting at `start_time`.
    pub fn render(&self, out: &mut [f32], start_time: f64, sample_rate: f32) {
        let dt = 1.0 / sample_rate as f64;

        // Fast path: nothing moving during this block.
        if self.is_settled(start_time) {
            out.fill(self.target);
            return;
        }

        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.value_at(start_time + i as f64 * dt);
        }
    }
}
