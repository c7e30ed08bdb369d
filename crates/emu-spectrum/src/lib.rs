//! ZX Spectrum 48K peripheral layer.
//!
//! Everything around the Z80 except the Z80 itself: the 64K memory image
//! with its protected ROM, the ULA port (keyboard, beeper, border), the
//! screen decoder and the 50 Hz frame loop. The CPU engine is any
//! `emu_core::Cpu` over [`SpectrumBus`]; [`IdleCpu`] stands in when no core
//! is available.

mod bus;
#[cfg(feature = "native")]
pub mod capture;
mod config;
mod error;
pub mod headless;
#[cfg(feature = "native")]
pub mod host;
mod idle;
pub mod keyboard_map;
mod memory;
mod pacing;
mod spectrum;

pub use bus::SpectrumBus;
pub use config::{FRAMES_PER_SECOND, SpectrumConfig, read_rom};
pub use error::SpectrumError;
pub use headless::HeadlessHost;
pub use idle::IdleCpu;
pub use memory::{MEMORY_SIZE, Memory, ROM_SIZE};
pub use pacing::FramePacer;
pub use spectrum::{Host, HostEvent, RunState, Spectrum};
