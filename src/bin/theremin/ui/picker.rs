//! Frequency picker widget
//!
//! Columns are painted like piano keys, one band per semitone. Every held
//! pointer gets a cursor line and a label; the label fades towards grey the
//! further the pitch is from a note, and its lower row marks where inside
//! the note's cell the pitch sits.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use theremin_dsp::{
    grid::{KeyColor, LogGrid},
    tone::{frequency_to_normalized, Readout},
    Session, VoiceId,
};

const BLACK_KEY: Color = Color::Rgb(0x11, 0x11, 0x11);
const WHITE_KEY: Color = Color::Rgb(0x88, 0x88, 0x88);
const CURSOR: Color = Color::Yellow;

/// Hue and lightness of the readout label; saturation tracks tuning.
const LABEL_HUE: f64 = 215.0;
const LABEL_LIGHTNESS: f64 = 0.54;

pub fn render_picker(frame: &mut Frame, area: Rect, session: &Session) {
    let (start, end) = session.range().span();
    let snap = if session.snap() { " [snap]" } else { "" };
    let block = Block::default()
        .title(format!(" {:.1} Hz - {:.1} Hz{} ", start, end, snap))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = session.picker_grid();
    let buf = frame.buffer_mut();
    paint_grid(buf, inner, grid);
    if grid.show_labels {
        paint_labels(buf, inner, grid);
    }

    for (row, (id, readout)) in session.readouts().enumerate() {
        paint_readout(buf, inner, grid, id, readout, row);
    }
}

/// Fill `area` with key-coloured bands, one per grid line.
pub fn paint_grid(buf: &mut Buffer, area: Rect, grid: &LogGrid) {
    if area.is_empty() {
        return;
    }

    let band = grid.line_width(area.width as f64).round().max(1.0) as u16;
    for line in grid.lines() {
        let Some(col) = column_at(area, line.position) else {
            continue;
        };
        let color = key_background(line.key);
        let left = col.saturating_sub(band / 2).max(area.left());
        let right = left.saturating_add(band).min(area.right());
        for x in left..right {
            for y in area.top()..area.bottom() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_bg(color);
                }
            }
        }
    }
}

/// Note labels run top to bottom along each band.
fn paint_labels(buf: &mut Buffer, area: Rect, grid: &LogGrid) {
    for line in grid.lines() {
        let Some(col) = column_at(area, line.position) else {
            continue;
        };
        let fg = match line.key {
            KeyColor::Black => WHITE_KEY,
            KeyColor::White => BLACK_KEY,
        };
        for (y, ch) in (area.top()..area.bottom()).zip(line.label().chars()) {
            if let Some(cell) = buf.cell_mut((col, y)) {
                cell.set_char(ch).set_fg(fg);
            }
        }
    }
}

fn paint_readout(
    buf: &mut Buffer,
    area: Rect,
    grid: &LogGrid,
    id: VoiceId,
    readout: &Readout,
    row: usize,
) {
    if area.height < 2 {
        return;
    }
    let position = frequency_to_normalized(readout.frequency, grid.scale_min, grid.scale_max);
    let Some(col) = column_at(area, position.clamp(0.0, 1.0)) else {
        return;
    };

    for y in area.top()..area.bottom() {
        if let Some(cell) = buf.cell_mut((col, y)) {
            cell.set_char('┃').set_fg(CURSOR);
        }
    }

    let text = format!(" {} #{} ", readout, id);
    let width = (text.chars().count() as u16).min(area.width);

    // Stack labels from the middle down; keep them inside the picker.
    let top = (area.top() + area.height / 2 + 2 * row as u16).min(area.bottom() - 2);
    let left = col
        .saturating_sub(width / 2)
        .clamp(area.left(), area.right() - width);

    let style = Style::default()
        .fg(Color::White)
        .bg(label_color(readout.saturation() / 100.0));
    buf.set_stringn(left, top, &text, width as usize, style);

    // Lower row: where the pitch sits inside its note's cell.
    let marker = (readout.tone_offset * (width.saturating_sub(1)) as f64).round() as u16;
    for x in 0..width {
        let ch = if x == marker { '●' } else { '─' };
        if let Some(cell) = buf.cell_mut((left + x, top + 1)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

fn key_background(key: KeyColor) -> Color {
    match key {
        KeyColor::Black => BLACK_KEY,
        KeyColor::White => WHITE_KEY,
    }
}

/// Column for a normalized position, `None` if it falls outside `area`.
pub fn column_at(area: Rect, position: f64) -> Option<u16> {
    if area.is_empty() || !(0.0..=1.0).contains(&position) {
        return None;
    }
    let span = area.width.saturating_sub(1) as f64;
    Some(area.left() + (position * span).round() as u16)
}

/// Normalized position of a column, clamped to the area.
pub fn norm_at(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.left()) as f64;
    (offset / (area.width - 1) as f64).clamp(0.0, 1.0)
}

/// HSL to RGB at the label's hue and lightness.
fn label_color(saturation: f64) -> Color {
    let s = saturation.clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * LABEL_LIGHTNESS - 1.0).abs()) * s;
    let sector = LABEL_HUE / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = LABEL_LIGHTNESS - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round() as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}
