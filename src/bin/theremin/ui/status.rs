//! Status bar widget - voices, volume, range and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use theremin_dsp::{session::lock, Session};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    sample_rate: f32,
    audio_stats: &AudioStats,
) {
    let block = Block::default()
        .title(" theremin ")
        .borders(Borders::ALL);

    let (active, voices, volume, bus, waveform) = {
        let generator = lock(session.generator());
        (
            generator.active_voice_count(),
            generator.voice_count(),
            generator.global_volume(),
            generator.bus_gain(),
            generator.waveform(),
        )
    };

    let (start, end) = session.range().span();
    let playing = active > 0;
    let play_symbol = if playing { "▶" } else { "⏸" };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}/{} voices  ", play_symbol, active, voices),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Vol {:.2} (bus {:.2})  ", volume, bus),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:.1}-{:.1} Hz  ", start, end),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:?}  ", waveform),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Snap {}  ", if session.snap() { "on" } else { "off" }),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_full_scale_square() {
        let stats = AudioStats::from_buffer(&[1.0, -1.0, 1.0, -1.0]);
        assert_eq!(stats.peak, 1.0);
        assert_eq!(stats.rms, 1.0);
    }
}
