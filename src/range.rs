/*
Dual-Handle Range Selector
==========================

Two handles pick a sub-range [start, end] out of the full frequency domain
[min, max]. Handles move in normalized log-space (0..1, equal distance =
equal musical interval), and every move is mirrored into absolute Hz so the
picker grid and the generator can use it directly.

    min                                                      max
     ├─────────────[start]════════════════════[end]──────────┤
     0.0            0.2                        0.8           1.0
                      ╰───── ≥ min_closure ─────╯

The handles may never come closer than `min_closure` (in normalized units).
A handle pushed into the other one stops exactly `min_closure` short of it;
the caller's raw position is discarded.

Callbacks
---------

  on_input    fired on every committed move (while dragging)
  on_change   fired when the drag ends (`finish`)

Both receive (start_hz, end_hz).
*/

use tracing::debug;

use crate::{
    config::ThereminConfig,
    tone::{frequency_to_normalized, normalized_to_frequency},
};

type RangeCallback = Box<dyn FnMut(f64, f64) + Send>;

pub struct RangeModel {
    min: f64,
    max: f64,
    min_closure_norm: f64,
    start_norm: f64,
    end_norm: f64,
    start_abs: f64,
    end_abs: f64,
    on_input: Option<RangeCallback>,
    on_change: Option<RangeCallback>,
}

impl RangeModel {
    /// `init_start`/`init_end` default to the domain ends when `None` and are
    /// clamped into `[min, max]` otherwise. Initial handles closer than
    /// `min_closure_norm` are moved apart.
    pub fn new(
        min: f64,
        max: f64,
        init_start: Option<f64>,
        init_end: Option<f64>,
        min_closure_norm: f64,
    ) -> Self {
        let min_closure_norm = min_closure_norm.clamp(0.0, 1.0);
        let mut start_abs = init_start.unwrap_or(min).clamp(min, max);
        let mut end_abs = init_end.unwrap_or(max).clamp(min, max);
        let mut start_norm = frequency_to_normalized(start_abs, min, max);
        let mut end_norm = frequency_to_normalized(end_abs, min, max);

        // Handles that start too close: pull start down, then push end up
        // if start already sits at the bottom.
        if start_norm + min_closure_norm > end_norm {
            start_norm = (end_norm - min_closure_norm).max(0.0);
            end_norm = end_norm.max(start_norm + min_closure_norm).min(1.0);
            start_abs = normalized_to_frequency(start_norm, min, max);
            end_abs = normalized_to_frequency(end_norm, min, max);
            debug!(start_norm, end_norm, "initial range widened to the closure");
        }

        Self {
            min,
            max,
            min_closure_norm,
            start_norm,
            end_norm,
            start_abs,
            end_abs,
            on_input: None,
            on_change: None,
        }
    }

    pub fn from_config(config: &ThereminConfig) -> Self {
        Self::new(
            config.min,
            config.max,
            Some(config.init_start),
            Some(config.init_end),
            config.min_closure_norm,
        )
    }

    /// Register the callback fired on every committed move.
    pub fn on_input(mut self, callback: impl FnMut(f64, f64) + Send + 'static) -> Self {
        self.on_input = Some(Box::new(callback));
        self
    }

    /// Register the callback fired when a drag finishes.
    pub fn on_change(mut self, callback: impl FnMut(f64, f64) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Move the start handle to `norm`. Returns the committed (start, end)
    /// pair in Hz.
    pub fn set_start(&mut self, norm: f64) -> (f64, f64) {
        let norm = norm.clamp(0.0, 1.0);
        self.start_norm = if norm + self.min_closure_norm <= self.end_norm {
            norm
        } else {
            let clamped = (self.end_norm - self.min_closure_norm).max(0.0);
            debug!(requested = norm, clamped, "range start held back by closure");
            clamped
        };
        self.start_abs = self.to_frequency(self.start_norm);
        self.emit_input()
    }

    /// Move the end handle to `norm`. Returns the committed (start, end)
    /// pair in Hz.
    pub fn set_end(&mut self, norm: f64) -> (f64, f64) {
        let norm = norm.clamp(0.0, 1.0);
        self.end_norm = if self.start_norm <= norm - self.min_closure_norm {
            norm
        } else {
            let clamped = (self.start_norm + self.min_closure_norm).min(1.0);
            debug!(requested = norm, clamped, "range end held back by closure");
            clamped
        };
        self.end_abs = self.to_frequency(self.end_norm);
        self.emit_input()
    }

    /// Signal that the user has let go of a handle.
    pub fn finish(&mut self) -> (f64, f64) {
        let span = self.span();
        if let Some(callback) = self.on_change.as_mut() {
            callback(span.0, span.1);
        }
        span
    }

    /// Selected range in Hz.
    pub fn span(&self) -> (f64, f64) {
        (self.start_abs, self.end_abs)
    }

    /// Selected range in normalized units.
    pub fn span_norm(&self) -> (f64, f64) {
        (self.start_norm, self.end_norm)
    }

    /// Full domain in Hz.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn min_closure_norm(&self) -> f64 {
        self.min_closure_norm
    }

    fn to_frequency(&self, norm: f64) -> f64 {
        normalized_to_frequency(norm, self.min, self.max)
    }

    fn emit_input(&mut self) -> (f64, f64) {
        let span = self.span();
        if let Some(callback) = self.on_input.as_mut() {
            callback(span.0, span.1);
        }
        span
    }
}
