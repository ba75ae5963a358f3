//! Piano-roll style gridlines for a log-scaled frequency axis.
//!
//! One line per semitone, centred on the note's frequency, coloured like a
//! piano key. Drawing is left to the caller: this module only works out where
//! the lines go.

use crate::tone::{
    converter::name_index, frequency_to_normalized, nearest_tone_frequency, semitone_count,
    BASE_FREQUENCY, OCTAVE, TONE_NAMES,
};

/// Semitones (relative to A) that fall on black piano keys: A#, C#, D#, F#, G#.
const BLACK_KEYS: [usize; 5] = [1, 4, 6, 9, 11];

/// Gap left between neighbouring lines, in the caller's width units.
const SEPARATION_LINE_WIDTH: f64 = 1.0;

/// Stop walking after this many semitones above the reference (~14 MHz).
const MAX_NOTE: i32 = 12 * 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColor {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    /// Semitones above [`BASE_FREQUENCY`].
    pub note: i32,
    pub frequency: f64,
    /// Position along the axis. The last line may sit slightly past 1.0.
    pub position: f64,
    pub name: &'static str,
    pub key: KeyColor,
}

impl GridLine {
    fn new(note: i32, frequency: f64, min: f64, max: f64) -> Self {
        let index = name_index(note as f64);
        Self {
            note,
            frequency,
            position: frequency_to_normalized(frequency, min, max),
            name: TONE_NAMES[index],
            key: if BLACK_KEYS.contains(&index) {
                KeyColor::Black
            } else {
                KeyColor::White
            },
        }
    }

    /// Label drawn next to the line, e.g. `A (440.0)`.
    pub fn label(&self) -> String {
        format!("{} ({:.1})", self.name, self.frequency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogGrid {
    pub scale_min: f64,
    pub scale_max: f64,
    pub show_labels: bool,
}

impl LogGrid {
    pub fn new(scale_min: f64, scale_max: f64) -> Self {
        Self {
            scale_min,
            scale_max,
            show_labels: false,
        }
    }

    pub fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    pub fn set_scale(&mut self, scale_min: f64, scale_max: f64) {
        self.scale_min = scale_min;
        self.scale_max = scale_max;
    }

    /// Number of semitones the grid spans.
    pub fn notes_count(&self) -> i32 {
        semitone_count(self.scale_min, self.scale_max)
    }

    /// Width of each line so the lines tile `total_width` with a one-unit gap.
    pub fn line_width(&self, total_width: f64) -> f64 {
        let notes = self.notes_count();
        if notes <= 0 {
            return total_width.max(SEPARATION_LINE_WIDTH);
        }
        (total_width / notes as f64 - SEPARATION_LINE_WIDTH).max(SEPARATION_LINE_WIDTH)
    }

    /// Walk every semitone whose cell overlaps the scale, lowest first.
    pub fn lines(&self) -> GridLines {
        let valid = self.scale_min > 0.0
            && self.scale_max.is_finite()
            && self.scale_max > self.scale_min;
        GridLines {
            min: self.scale_min,
            max: self.scale_max,
            note: 0,
            done: !valid,
        }
    }
}

/// Iterator over a grid's lines. See [`LogGrid::lines`].
pub struct GridLines {
    min: f64,
    max: f64,
    note: i32,
    done: bool,
}

impl Iterator for GridLines {
    type Item = GridLine;

    fn next(&mut self) -> Option<GridLine> {
        while !self.done {
            let note = self.note + 1;
            let frequency = BASE_FREQUENCY * (note as f64 / OCTAVE).exp2();

            // Cell starts at or above the top: nothing left to draw.
            if note > MAX_NOTE || nearest_tone_frequency(frequency, -0.5) >= self.max {
                self.done = true;
                break;
            }
            self.note = note;

            // Cell ends below the bottom: not visible yet.
            if nearest_tone_frequency(frequency, 0.5) < self.min {
                continue;
            }

            return Some(GridLine::new(note, frequency, self.min, self.max));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_octave_of_a_has_thirteen_lines() {
        // 220 .. 440 Hz: every semitone from A3 up to and including A4.
        let grid = LogGrid::new(220.0, 440.0);
        let lines: Vec<_> = grid.lines().collect();

        assert_eq!(lines.first().map(|l| l.name), Some("A"));
        assert_eq!(lines.last().map(|l| l.name), Some("A"));
        assert_eq!(lines.len(), 13);
        assert!((lines[0].position).abs() < 1e-9);
        assert!((lines[12].position - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lines_are_ascending_semitones() {
        let grid = LogGrid::new(108.0, 5_000.0);
        let lines: Vec<_> = grid.lines().collect();

        assert!(lines.windows(2).all(|w| w[1].note == w[0].note + 1));
        assert!(lines.windows(2).all(|w| w[1].position > w[0].position));
        assert!(lines.iter().all(|l| l.position > -0.05 && l.position < 1.05));
    }

    #[test]
    fn black_keys_follow_the_piano() {
        let grid = LogGrid::new(220.0, 440.0);
        let blacks: Vec<_> = grid
            .lines()
            .filter(|l| l.key == KeyColor::Black)
            .map(|l| l.name)
            .collect();
        assert_eq!(blacks, ["A#", "C#", "D#", "F#", "G#"]);
    }

    #[test]
    fn line_width_tiles_the_axis() {
        let grid = LogGrid::new(220.0, 440.0);
        assert_eq!(grid.notes_count(), 12);
        assert!((grid.line_width(1200.0) - 99.0).abs() < 1e-9);

        // Never thinner than the gap, never divided by zero.
        assert_eq!(grid.line_width(6.0), 1.0);
        assert_eq!(LogGrid::new(440.0, 440.0).line_width(80.0), 80.0);
    }

    #[test]
    fn degenerate_scales_yield_nothing() {
        assert_eq!(LogGrid::new(440.0, 440.0).lines().count(), 0);
        assert_eq!(LogGrid::new(0.0, 440.0).lines().count(), 0);
        assert_eq!(LogGrid::new(20.0, f64::INFINITY).lines().count(), 0);
    }

    #[test]
    fn narrow_scale_inside_one_cell_keeps_its_note() {
        let lines: Vec<_> = LogGrid::new(430.0, 450.0).lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "A");
        assert!((lines[0].frequency - 440.0).abs() < 1e-9);
    }

    #[test]
    fn labels_show_name_and_frequency() {
        let line = LogGrid::new(430.0, 450.0).lines().next().unwrap();
        assert_eq!(line.label(), "A (440.0)");
    }
}
