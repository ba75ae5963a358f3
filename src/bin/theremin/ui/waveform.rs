//! Waveform oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown at once.
const SCOPE_WINDOW: usize = 1024;

/// Render the waveform oscilloscope, triggered on a rising zero crossing so
/// a steady tone stands still.
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let block = Block::default()
        .title(" Waveform ")
        .borders(Borders::ALL);

    let window = triggered(audio_buffer, SCOPE_WINDOW);
    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let x = i as f64 / window.len() as f64;
            (x, sample as f64)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

/// The latest `len` samples that start on a rising zero crossing, or simply
/// the latest `len` if there is none.
fn triggered(buffer: &[f32], len: usize) -> &[f32] {
    let len = len.min(buffer.len());
    let latest = buffer.len() - len;
    let start = (1..=latest)
        .rev()
        .find(|&i| buffer[i - 1] < 0.0 && buffer[i] >= 0.0)
        .unwrap_or(latest);
    &buffer[start..start + len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_on_rising_edge() {
        let buffer: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin()).collect();
        let window = triggered(&buffer, 16);
        assert_eq!(window.len(), 16);
        assert!(window[0] >= 0.0);
    }

    #[test]
    fn short_buffer_is_shown_whole() {
        let buffer = [0.1, -0.2, 0.3];
        assert_eq!(triggered(&buffer, 1024), &buffer);
    }
}
