//! TUI module for theremin
//!
//! The picker fills most of the screen: press a mouse button over it to
//! sound a voice, drag to bend it. The range bar below picks which slice of
//! the spectrum the picker covers.

mod picker;
mod range_bar;
mod spectrum;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use theremin_dsp::{
    session::lock,
    synth::VoiceState,
    Key, Session, VoiceId, DEFAULT_VOICE_ID,
};

use picker::{norm_at, render_picker};
use range_bar::render_range_bar;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size (also the FFT size)
const VIS_BUFFER_SIZE: usize = 4096;

const VOLUME_STEP: f32 = 0.05;

/// Keyboard nudge for a range handle, in normalized units.
const RANGE_STEP: f64 = 0.01;

const HELP: &str = " [Mouse] Play  [Space] Default voice  [+/-] Volume  [[/]] Start  [{/}] End  [N] Snap  [L] Labels  [Q] Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handle {
    Start,
    End,
}

/// Screen regions from the last draw, used for hit testing.
#[derive(Debug, Clone, Copy, Default)]
struct Areas {
    status: Rect,
    picker: Rect,
    range: Rect,
    waveform: Rect,
    spectrum: Rect,
    help: Rect,
}

impl Areas {
    fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(8),    // Picker
                Constraint::Length(4), // Range bar
                Constraint::Length(8), // Scopes
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);

        Self {
            status: rows[0],
            picker: rows[1],
            range: rows[2],
            waveform: scopes[0],
            spectrum: scopes[1],
            help: rows[4],
        }
    }

    fn picker_inner(&self) -> Rect {
        Block::bordered().inner(self.picker)
    }

    fn range_inner(&self) -> Rect {
        Block::bordered().inner(self.range)
    }
}

/// UI application state
pub struct UiApp {
    session: Session,
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    sample_rate: f32,
    /// The terminal reports key releases, so space can be held.
    key_releases: bool,
    /// Range handle being dragged with the left button.
    dragging: Option<Handle>,
    areas: Areas,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        session: Session,
        audio_rx: Consumer<f32>,
        sample_rate: f32,
        key_releases: bool,
    ) -> Self {
        let mut spectrum = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate);
        let (start, end) = session.range().span();
        spectrum.set_range(start, end);

        Self {
            session,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum,
            sample_rate,
            key_releases,
            dragging: None,
            areas: Areas::default(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();

            let (start, end) = self.session.range().span();
            self.spectrum.set_range(start, end);
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char(' ') {
            self.handle_space(key.kind);
            return;
        }

        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_volume(VOLUME_STEP),
            KeyCode::Char('-') | KeyCode::Char('_') => self.nudge_volume(-VOLUME_STEP),
            KeyCode::Char('[') => self.nudge_handle(Handle::Start, -RANGE_STEP),
            KeyCode::Char(']') => self.nudge_handle(Handle::Start, RANGE_STEP),
            KeyCode::Char('{') => self.nudge_handle(Handle::End, -RANGE_STEP),
            KeyCode::Char('}') => self.nudge_handle(Handle::End, RANGE_STEP),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let snap = !self.session.snap();
                self.session.set_snap(snap);
            }
            KeyCode::Char('l') | KeyCode::Char('L') => self.session.toggle_labels(),
            _ => {}
        }
    }

    fn handle_space(&mut self, kind: KeyEventKind) {
        match kind {
            KeyEventKind::Press if self.key_releases => self.session.key_down(Key::Space),
            KeyEventKind::Release => self.session.key_up(Key::Space),
            // No release events: each press flips the default voice.
            KeyEventKind::Press => {
                let sounding = matches!(
                    lock(self.session.generator()).voice_state(DEFAULT_VOICE_ID),
                    Some(VoiceState::On | VoiceState::RampingToOn)
                );
                if sounding {
                    self.session.key_up(Key::Space);
                } else {
                    self.session.key_down(Key::Space);
                }
            }
            KeyEventKind::Repeat => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let picker = self.areas.picker_inner();
        let range = self.areas.range_inner();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if range.contains(position) => {
                let norm = norm_at(range, mouse.column);
                let (start, end) = self.session.range().span_norm();
                let handle = if (norm - start).abs() <= (norm - end).abs() {
                    Handle::Start
                } else {
                    Handle::End
                };
                self.dragging = Some(handle);
                self.move_handle(handle, norm);
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging.is_some() => {
                if let Some(handle) = self.dragging {
                    self.move_handle(handle, norm_at(range, mouse.column));
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging.is_some() => {
                self.dragging = None;
                self.session.range_change();
            }
            MouseEventKind::Down(button) if picker.contains(position) => {
                self.session
                    .pointer_down(voice_for(button), norm_at(picker, mouse.column));
            }
            MouseEventKind::Drag(button) if picker.contains(position) => {
                self.session
                    .pointer_move(voice_for(button), norm_at(picker, mouse.column));
            }
            // Hovering retunes the primary voice without starting it.
            MouseEventKind::Moved if picker.contains(position) => {
                self.session
                    .pointer_move(DEFAULT_VOICE_ID, norm_at(picker, mouse.column));
            }
            // Releases count anywhere on screen.
            MouseEventKind::Up(button) => self.session.pointer_up(voice_for(button)),
            _ => {}
        }
    }

    fn nudge_volume(&mut self, step: f32) {
        let volume = lock(self.session.generator()).global_volume();
        self.session.volume_input((volume + step).clamp(0.0, 1.0));
    }

    fn nudge_handle(&mut self, handle: Handle, step: f64) {
        let (start, end) = self.session.range().span_norm();
        match handle {
            Handle::Start => self.move_handle(handle, start + step),
            Handle::End => self.move_handle(handle, end + step),
        }
        self.session.range_change();
    }

    fn move_handle(&mut self, handle: Handle, norm: f64) {
        match handle {
            Handle::Start => self.session.range_start_input(norm),
            Handle::End => self.session.range_end_input(norm),
        };
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let areas = Areas::split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, areas.status, &self.session, self.sample_rate, &stats);
        render_picker(frame, areas.picker, &self.session);
        render_range_bar(frame, areas.range, &self.session);
        render_waveform(frame, areas.waveform, &self.audio_buffer);
        render_spectrum(frame, areas.spectrum, &self.spectrum);

        let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, areas.help);

        self.areas = areas;
    }
}

/// Each mouse button drives its own voice.
fn voice_for(button: MouseButton) -> VoiceId {
    match button {
        MouseButton::Left => DEFAULT_VOICE_ID,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}
