//! Machine configuration and image loading.

use std::path::Path;
use std::time::Duration;

use emu_core::{MasterClock, Ticks};
use sinclair_ula::PortFeatures;

use crate::SpectrumError;
use crate::memory::ROM_SIZE;

/// PAL field rate.
pub const FRAMES_PER_SECOND: u64 = 50;

/// Configuration for creating a Spectrum instance.
#[derive(Clone)]
pub struct SpectrumConfig {
    /// ROM data. Must be exactly 16,384 bytes.
    pub rom: Vec<u8>,
    /// Which devices answer on the ULA port.
    pub features: PortFeatures,
    pub clock: MasterClock,
    /// Sleep out the rest of each frame in [`Spectrum::run`](crate::Spectrum::run).
    pub paced: bool,
}

impl SpectrumConfig {
    /// A stock 48K configuration around the given ROM.
    #[must_use]
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            features: PortFeatures::default(),
            clock: MasterClock::SPECTRUM_48K,
            paced: true,
        }
    }

    /// T-states the CPU runs between interrupts.
    #[must_use]
    pub fn cycles_per_frame(&self) -> Ticks {
        self.clock.ticks_per_frame(FRAMES_PER_SECOND)
    }

    /// Wall-clock length of one frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / FRAMES_PER_SECOND)
    }
}

/// Read a ROM image from disk, rejecting anything but a 16K file.
pub fn read_rom(path: &Path) -> Result<Vec<u8>, SpectrumError> {
    let rom = std::fs::read(path).map_err(|e| SpectrumError::io(path, e))?;
    if rom.len() != ROM_SIZE {
        return Err(SpectrumError::RomSize {
            expected: ROM_SIZE,
            actual: rom.len(),
        });
    }
    log::info!("Loaded ROM {} ({} bytes)", path.display(), rom.len());
    Ok(rom)
}
