//! Spectrum bus: memory and I/O routing.
//!
//! The CPU engine reaches everything through this struct. Memory accesses go
//! straight to the 64K image; every I/O access goes to the port dispatcher,
//! which consults the key matrix on reads.

use std::sync::Arc;

use emu_core::{Bus, IoBus};
use sinclair_ula::{KeyMatrix, PortDispatcher, PortFeatures, SpeakerLine};

use crate::memory::Memory;

/// The Spectrum bus, implementing `emu_core::Bus` and `emu_core::IoBus`.
pub struct SpectrumBus {
    pub memory: Memory,
    pub keyboard: KeyMatrix,
    pub ports: PortDispatcher,
}

impl SpectrumBus {
    #[must_use]
    pub fn new(memory: Memory, features: PortFeatures, speaker: Arc<SpeakerLine>) -> Self {
        Self {
            memory,
            keyboard: KeyMatrix::new(),
            ports: PortDispatcher::new(features, speaker),
        }
    }
}

impl Bus for SpectrumBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory.read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory.write(address, value);
    }
}

impl IoBus for SpectrumBus {
    fn port_read(&mut self, port: u16) -> u8 {
        self.ports.read(port, &self.keyboard)
    }

    fn port_write(&mut self, port: u16, value: u8) {
        self.ports.write(port, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bus() -> SpectrumBus {
        SpectrumBus::new(Memory::new(), PortFeatures::default(), SpeakerLine::new())
    }

    #[test]
    fn memory_routing_respects_rom() {
        let mut bus = make_bus();
        bus.write(0x1000, 0xAB);
        bus.write(0x9000, 0xCD);
        assert_eq!(bus.read(0x1000), 0x00);
        assert_eq!(bus.read(0x9000), 0xCD);
    }

    #[test]
    fn keyboard_scan_through_port() {
        let mut bus = make_bus();
        bus.keyboard.set(1, 0, true); // A
        assert_eq!(bus.port_read(0xFDFE), 0xFE);
        assert_eq!(bus.port_read(0xFEFE), 0xFF);
        assert_eq!(bus.port_read(0xFDFF), 0xFF);
    }

    #[test]
    fn speaker_write_through_port() {
        let mut bus = make_bus();
        bus.port_write(0x00FE, 0x10);
        assert!(bus.ports.speaker().is_on());
        bus.port_write(0x00FE, 0x00);
        assert!(!bus.ports.speaker().is_on());
    }
}
