//! Top-level Spectrum machine and its frame loop.
//!
//! Each frame runs the CPU for 70,000 T-states, raises one maskable
//! interrupt and decodes the screen. The CPU engine is supplied by the
//! caller; it reaches memory, keyboard and ports through [`SpectrumBus`].

use std::sync::Arc;
use std::time::Duration;

use emu_core::{Cpu, KeyCode, Ticks};
use sinclair_ula::{FLASH_FRAME_COUNT, FrameBuffer, SpeakerLine};

use crate::SpectrumError;
use crate::bus::SpectrumBus;
use crate::config::SpectrumConfig;
use crate::keyboard_map::map_key;
use crate::memory::Memory;
use crate::pacing::FramePacer;

/// Data byte placed on the bus during interrupt acknowledge.
const INTERRUPT_DATA: u8 = 0x00;

/// Input delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Quit,
}

/// Lifecycle of the frame loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Presentation layer driven by [`Spectrum::host_frame`].
///
/// [`Spectrum::run`] owns the loop for hosts that can block; event-loop
/// hosts such as the winit window call `host_frame` once per turn instead.
pub trait Host {
    /// Append input received since the last call.
    fn poll_events(&mut self, events: &mut Vec<HostEvent>);

    /// Show a finished frame. `border` is the current border colour index.
    fn present(&mut self, frame: &FrameBuffer, border: u8);
}

/// ZX Spectrum 48K.
pub struct Spectrum<C> {
    cpu: C,
    bus: SpectrumBus,
    frame: FrameBuffer,
    cycles_per_frame: Ticks,
    frame_duration: Duration,
    paced: bool,
    flash_counter: u32,
    flash_phase: bool,
    frame_count: u64,
    state: RunState,
    /// Host keys currently down, in press order.
    held: Vec<KeyCode>,
    pending: Vec<HostEvent>,
}

impl<C: Cpu<SpectrumBus>> Spectrum<C> {
    /// Build a machine around `cpu`. Fails if the ROM is not 16K.
    pub fn new(config: &SpectrumConfig, cpu: C) -> Result<Self, SpectrumError> {
        let mut memory = Memory::new();
        memory.load_rom(&config.rom)?;

        Ok(Self {
            cpu,
            bus: SpectrumBus::new(memory, config.features, SpeakerLine::new()),
            frame: FrameBuffer::new(),
            cycles_per_frame: config.cycles_per_frame(),
            frame_duration: config.frame_duration(),
            paced: config.paced,
            flash_counter: 0,
            flash_phase: false,
            frame_count: 0,
            state: RunState::Running,
            held: Vec::new(),
            pending: Vec::new(),
        })
    }

    /// Run one frame: flash timing, input, CPU budget, interrupt, decode.
    ///
    /// A `Quit` among `events` still lets this frame finish; the machine is
    /// `Stopped` afterwards and further calls do nothing.
    pub fn step_frame(&mut self, events: impl IntoIterator<Item = HostEvent>) -> RunState {
        if self.state == RunState::Stopped {
            return self.state;
        }

        self.flash_counter += 1;
        if self.flash_counter >= FLASH_FRAME_COUNT {
            self.flash_counter = 0;
            self.flash_phase = !self.flash_phase;
        }

        for event in events {
            self.handle_event(event);
        }

        let start = self.cpu.cycles();
        while self.cpu.cycles() - start < self.cycles_per_frame {
            self.cpu.step(&mut self.bus);
        }
        self.cpu.interrupt(&mut self.bus, INTERRUPT_DATA);

        let memory = &self.bus.memory;
        self.frame.render(|addr| memory.peek(addr), self.flash_phase);
        self.frame_count += 1;

        self.state
    }

    /// Collect the host's input, run one frame and hand it back to the host.
    pub fn host_frame(&mut self, host: &mut impl Host) -> RunState {
        let mut events = std::mem::take(&mut self.pending);
        host.poll_events(&mut events);
        let state = self.step_frame(events.drain(..));
        self.pending = events;
        host.present(&self.frame, self.bus.ports.border());
        state
    }

    /// Run frames until the host asks to quit.
    pub fn run(&mut self, host: &mut impl Host) {
        let mut pacer = FramePacer::new(self.frame_duration);
        log::info!(
            "Running: {} T-states per frame, {:?} per frame",
            self.cycles_per_frame.get(),
            self.frame_duration
        );

        while self.state == RunState::Running {
            pacer.begin();
            self.host_frame(host);
            if self.paced {
                pacer.finish();
            }
        }
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::KeyDown(key) => self.set_key(key, true),
            HostEvent::KeyUp(key) => self.set_key(key, false),
            HostEvent::Quit => {
                log::debug!("Quit requested at frame {}", self.frame_count);
                self.state = RunState::Stopped;
            }
        }
    }

    fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if !self.held.contains(&key) {
                self.held.push(key);
            }
        } else {
            self.held.retain(|&k| k != key);
        }

        for &position in map_key(key) {
            // Shift is shared by plain and compound keys; it opens only when
            // no held key still closes it.
            let closed =
                pressed || self.held.iter().any(|&k| map_key(k).contains(&position));
            self.bus.keyboard.set(position.0, position.1, closed);
        }
    }

    /// Release every key, e.g. when the host loses keyboard focus.
    pub fn release_all_keys(&mut self) {
        self.held.clear();
        self.bus.keyboard.reset_all();
    }

    /// Copy a SCREEN$ dump into video memory.
    pub fn load_screen(&mut self, screen: &[u8]) -> Result<(), SpectrumError> {
        self.bus.memory.load_screen(screen)?;
        log::info!("Loaded SCREEN$ ({} bytes)", screen.len());
        Ok(())
    }

    /// The most recently decoded frame.
    #[must_use]
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Current border colour index (0-7).
    #[must_use]
    pub fn border(&self) -> u8 {
        self.bus.ports.border()
    }

    /// Shared speaker line, for handing to an audio callback.
    #[must_use]
    pub fn speaker(&self) -> Arc<SpeakerLine> {
        Arc::clone(self.bus.ports.speaker())
    }

    #[must_use]
    pub fn cpu(&self) -> &C {
        &self.cpu
    }

    #[must_use]
    pub fn bus(&self) -> &SpectrumBus {
        &self.bus
    }

    /// Frames completed since construction.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether FLASH cells currently show swapped colours.
    #[must_use]
    pub fn flash_phase(&self) -> bool {
        self.flash_phase
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }
}
