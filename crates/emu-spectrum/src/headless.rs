//! Windowless host for batch runs and capture.

use std::sync::Arc;

use sinclair_ula::{Beeper, FrameBuffer, SAMPLE_RATE, SpeakerLine};

use crate::config::FRAMES_PER_SECOND;
use crate::spectrum::{Host, HostEvent};

/// Runs a fixed number of frames, then quits.
///
/// With a speaker attached, one frame's worth of samples is pulled from the
/// synthesizer after every frame, the same way an audio callback would.
pub struct HeadlessHost {
    frames_left: u64,
    beeper: Option<Beeper>,
    audio: Vec<i16>,
    last_border: u8,
}

impl HeadlessHost {
    /// A host that stops after `frames` frames (at least one always runs).
    #[must_use]
    pub fn new(frames: u64) -> Self {
        Self {
            frames_left: frames,
            beeper: None,
            audio: Vec::new(),
            last_border: 0,
        }
    }

    /// Record the beeper while running.
    #[must_use]
    pub fn with_audio(mut self, speaker: Arc<SpeakerLine>) -> Self {
        self.beeper = Some(Beeper::new(speaker));
        self
    }

    /// Samples recorded so far (mono, [`SAMPLE_RATE`] Hz).
    #[must_use]
    pub fn audio(&self) -> &[i16] {
        &self.audio
    }

    /// Border colour of the last presented frame.
    #[must_use]
    pub fn last_border(&self) -> u8 {
        self.last_border
    }
}

impl Host for HeadlessHost {
    fn poll_events(&mut self, events: &mut Vec<HostEvent>) {
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            events.push(HostEvent::Quit);
        }
    }

    fn present(&mut self, _frame: &FrameBuffer, border: u8) {
        self.last_border = border;
        if let Some(beeper) = self.beeper.as_mut() {
            let samples = (u64::from(SAMPLE_RATE) / FRAMES_PER_SECOND) as usize;
            let start = self.audio.len();
            self.audio.resize(start + samples, 0);
            beeper.fill(&mut self.audio[start..]);
        }
    }
}
