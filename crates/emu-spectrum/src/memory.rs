//! Flat 64K address space with a write-protected ROM at the bottom.
//!
//! Layout:
//! - $0000-$3FFF: ROM (writes ignored)
//! - $4000-$5AFF: screen bitmap and attributes
//! - $5B00-$FFFF: general RAM

use sinclair_ula::{BITMAP_BASE, SCREEN_BYTES};

use crate::SpectrumError;

/// Size of the Z80 address space.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Size of the 48K ROM image.
pub const ROM_SIZE: usize = 0x4000;

/// The machine's memory image.
///
/// Every read succeeds. Writes below [`rom_top`](Self::rom_top) are
/// discarded, so a program can never overwrite the ROM.
pub struct Memory {
    data: Box<[u8]>,
    rom_top: u16,
}

impl Memory {
    /// All-zero memory with the standard 16K ROM boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rom_top(ROM_SIZE as u16)
    }

    /// All-zero memory protecting `$0000..rom_top`.
    #[must_use]
    pub fn with_rom_top(rom_top: u16) -> Self {
        Self {
            data: vec![0; MEMORY_SIZE].into_boxed_slice(),
            rom_top,
        }
    }

    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Write a byte. ROM writes are silently ignored.
    pub fn write(&mut self, addr: u16, val: u8) {
        if addr >= self.rom_top {
            self.data[addr as usize] = val;
        }
    }

    /// Read without side effects (used for screen fetches).
    #[must_use]
    pub fn peek(&self, addr: u16) -> u8 {
        self.read(addr)
    }

    /// First writable address.
    #[must_use]
    pub fn rom_top(&self) -> u16 {
        self.rom_top
    }

    /// Install a ROM image and clear everything above it.
    ///
    /// The image must fill the protected region exactly.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), SpectrumError> {
        let expected = self.rom_top as usize;
        if rom.len() != expected {
            return Err(SpectrumError::RomSize {
                expected,
                actual: rom.len(),
            });
        }
        self.data[..expected].copy_from_slice(rom);
        self.data[expected..].fill(0);
        Ok(())
    }

    /// Copy a SCREEN$ dump (bitmap followed by attributes) to $4000.
    pub fn load_screen(&mut self, screen: &[u8]) -> Result<(), SpectrumError> {
        if screen.len() != SCREEN_BYTES {
            return Err(SpectrumError::ScreenSize {
                expected: SCREEN_BYTES,
                actual: screen.len(),
            });
        }
        self.load(BITMAP_BASE, screen);
        Ok(())
    }

    /// Copy bytes in at `addr`, bypassing ROM protection. Stops at $FFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        let len = bytes.len().min(MEMORY_SIZE - start);
        self.data[start..start + len].copy_from_slice(&bytes[..len]);
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
