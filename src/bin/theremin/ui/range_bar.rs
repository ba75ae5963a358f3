//! Range bar widget - the whole domain with the selected slice highlighted

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use theremin_dsp::Session;

use super::picker::{column_at, paint_grid};

pub fn render_range_bar(frame: &mut Frame, area: Rect, session: &Session) {
    let (min, max) = session.range().bounds();
    let block = Block::default()
        .title(format!(" Range {:.0} Hz - {:.0} Hz ", min, max))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let keys = Rect { height: 1, ..inner };
    let track = Rect {
        y: inner.y + 1,
        height: 1,
        ..inner
    };

    let buf = frame.buffer_mut();
    paint_grid(buf, keys, session.background_grid());

    let (start, end) = session.range().span_norm();
    let (Some(start_col), Some(end_col)) = (column_at(track, start), column_at(track, end)) else {
        return;
    };

    for x in track.left()..track.right() {
        let (ch, color) = if x == start_col || x == end_col {
            ('◆', Color::White)
        } else if (start_col..end_col).contains(&x) {
            ('━', Color::Cyan)
        } else {
            ('─', Color::DarkGray)
        };
        if let Some(cell) = buf.cell_mut((x, track.y)) {
            cell.set_char(ch).set_style(Style::default().fg(color));
        }
    }
}
