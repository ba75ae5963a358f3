//! Theremin - audio device setup and terminal lifecycle

use std::{
    io::stdout,
    sync::{Arc, Mutex},
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use rtrb::RingBuffer;
use tracing::{error, info};

use theremin_dsp::{
    session::lock, Session, SharedGenerator, ThereminConfig, WaveGenerator, MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Samples buffered between the audio callback and the scope.
const SCOPE_QUEUE_SIZE: usize = 16_384;

pub struct Theremin {
    config: ThereminConfig,
}

impl Theremin {
    pub fn new(config: ThereminConfig) -> Self {
        Self { config }
    }

    /// Open the audio device, then hand the terminal to the UI until it quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;
        info!(sample_rate, channels, "audio device ready");

        let generator: SharedGenerator = Arc::new(Mutex::new(WaveGenerator::from_config(
            &self.config,
            sample_rate,
        )));
        let session = Session::new(&self.config, Arc::clone(&generator));

        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE_SIZE);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &stream_config.into(),
                move |data: &mut [f32], _| {
                    let mut generator = lock(&generator);
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames];
                        generator.render_block(block);

                        // Mono to all channels; the scope drops samples when full.
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                            let _ = scope_tx.push(s);
                        }

                        frames_written += frames;
                    }
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        execute!(stdout(), EnableMouseCapture)?;

        // Without release events the space bar falls back to toggling.
        let key_releases = supports_keyboard_enhancement().unwrap_or(false);
        if key_releases {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = UiApp::new(session, scope_rx, sample_rate, key_releases).run(&mut terminal);

        if key_releases {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }
}
