//! Beeper: the speaker line driven by port $FE bit 4, and the square-wave
//! synthesizer the host audio callback pulls samples from.
//!
//! The two halves run on different threads. The frame loop writes the line
//! through [`SpeakerLine`]; the audio callback owns a [`Beeper`] and reads
//! the line once per sample. Only the `on` level and an edge counter cross
//! the thread boundary, both as atomics. The oscillator phase never leaves
//! the audio thread: when the beeper sees a new edge it restarts the wave
//! from phase 0 before producing the next sample.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Tone frequency while the speaker is on.
pub const TONE_HZ: f32 = 440.0;

/// Peak sample value, well below `i16::MAX` to leave headroom.
pub const AMPLITUDE: i16 = 1500;

/// Speaker state shared between the frame loop and the audio callback.
#[derive(Debug, Default)]
pub struct SpeakerLine {
    on: AtomicBool,
    edges: AtomicU32,
}

impl SpeakerLine {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Is the speaker currently driven?
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    /// Drive the speaker on or off.
    ///
    /// `edge` is true when the drive bit changed since the previous write;
    /// it asks the synthesizer to restart its wave at phase 0.
    pub fn drive(&self, on: bool, edge: bool) {
        if edge {
            self.edges.fetch_add(1, Ordering::AcqRel);
        }
        self.on.store(on, Ordering::Release);
    }

    /// Number of level changes seen so far. Wraps.
    #[must_use]
    pub fn edges(&self) -> u32 {
        self.edges.load(Ordering::Acquire)
    }
}

/// Continuous-phase square-wave synthesizer.
pub struct Beeper {
    line: Arc<SpeakerLine>,
    /// Oscillator phase in `[0, 1)`.
    phase: f32,
    /// Phase advance per sample.
    step: f32,
    /// Edge count at the last sample.
    seen_edges: u32,
}

impl Beeper {
    /// Create a synthesizer for the given line at [`SAMPLE_RATE`].
    #[must_use]
    pub fn new(line: Arc<SpeakerLine>) -> Self {
        Self::with_rate(line, SAMPLE_RATE)
    }

    /// Create a synthesizer for a host running at a different rate.
    #[must_use]
    pub fn with_rate(line: Arc<SpeakerLine>, sample_rate: u32) -> Self {
        let seen_edges = line.edges();
        Self {
            line,
            phase: 0.0,
            step: TONE_HZ / sample_rate as f32,
            seen_edges,
        }
    }

    /// Produce one sample.
    ///
    /// Silence while the speaker is off; the phase only advances while on.
    pub fn next_sample(&mut self) -> i16 {
        let edges = self.line.edges();
        if edges != self.seen_edges {
            self.seen_edges = edges;
            self.phase = 0.0;
        }

        if !self.line.is_on() {
            return 0;
        }

        let sample = if self.phase < 0.5 {
            AMPLITUDE
        } else {
            -AMPLITUDE
        };
        self.phase += self.step;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        sample
    }

    /// Fill a host buffer (mono, signed 16-bit).
    pub fn fill(&mut self, buffer: &mut [i16]) {
        for sample in buffer {
            *sample = self.next_sample();
        }
    }

    /// Current oscillator phase.
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}
