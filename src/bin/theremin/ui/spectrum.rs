//! Spectrum analyzer widget
//!
//! FFT-based spectrum over the picker's range. Bins are spaced the same way
//! as the picker, so a peak lines up with the column that produced it.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use theremin_dsp::tone::normalized_to_frequency;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 64;

const FLOOR_DB: f64 = -100.0;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    sample_rate: f32,
    /// Displayed range in Hz
    range: (f64, f64),
    /// FFT bin index for each displayed bin
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (position across the range, magnitude_db)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// Create a new spectrum analyzer
    ///
    /// # Arguments
    /// * `buffer_len` - FFT size (should match audio buffer length)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let mut analyzer = Self {
            window,
            sample_rate,
            range: (0.0, 0.0),
            bin_indices: Vec::with_capacity(SPECTRUM_BINS),
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum: Vec::with_capacity(SPECTRUM_BINS),
        };
        analyzer.set_range(20.0, (sample_rate as f64 / 2.0).min(20_000.0));
        analyzer
    }

    /// Re-space the bins over `[min, max]` Hz. No-op if unchanged.
    pub fn set_range(&mut self, min: f64, max: f64) {
        if self.range == (min, max) {
            return;
        }
        self.range = (min, max);

        let buffer_len = self.window.len();
        let half = (buffer_len / 2).max(1);
        self.bin_indices.clear();
        self.spectrum.clear();

        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = normalized_to_frequency(t, min, max);
            let index = (freq * buffer_len as f64 / self.sample_rate as f64).round() as usize;
            self.bin_indices.push(index.min(half - 1));
            self.spectrum.push((t, FLOOR_DB));
        }
    }

    /// Update the spectrum from new audio samples
    ///
    /// Ignored unless the buffer length matches the FFT size.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, sample), w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        for ((_, magnitude_db), &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *magnitude_db = 10.0 * (power as f64).log10();
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let (min, max) = analyzer.range();
    let block = Block::default()
        .title(format!(" Spectrum {:.0}-{:.0} Hz ", min, max))
        .borders(Borders::ALL);

    let spectrum = analyzer.data();
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_peaks_at_its_own_bin() {
        let sample_rate = 48_000.0;
        let len = 4096;
        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);
        analyzer.set_range(100.0, 10_000.0);

        let freq = normalized_to_frequency(0.5, 100.0, 10_000.0) as f32;
        let buffer: Vec<f32> = (0..len)
            .map(|i| (std::f32::consts::TAU * freq * i as f32 / sample_rate).sin())
            .collect();
        analyzer.update(&buffer);

        let (peak_pos, _) = analyzer
            .data()
            .iter()
            .copied()
            .fold((0.0, f64::MIN), |best, bin| if bin.1 > best.1 { bin } else { best });
        assert!((peak_pos - 0.5).abs() < 0.05);
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(256, 48_000.0);
        analyzer.update(&[1.0; 100]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == FLOOR_DB));
    }
}
