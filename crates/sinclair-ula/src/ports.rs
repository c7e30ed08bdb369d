//! Port $FE decode.
//!
//! The ULA answers every I/O access whose low address bit is clear. Reads
//! return the keyboard half-rows selected by the high address byte; writes
//! drive the beeper (bit 4) and, when enabled, latch the border colour.
//! Odd ports have no device behind them: reads float to $FF and writes are
//! dropped.

use std::sync::Arc;

use crate::beeper::SpeakerLine;
use crate::keyboard::KeyMatrix;

/// Value read from a port with no device attached.
pub const NO_DEVICE: u8 = 0xFF;

/// Speaker drive bit in a port $FE write.
const SPEAKER_BIT: u8 = 0x10;

/// Which peripherals the dispatcher decodes.
///
/// Earlier hardware-less builds of the machine had no keyboard or beeper and
/// only drove the border; these switches select between those behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortFeatures {
    /// Decode keyboard reads. When off, every read returns [`NO_DEVICE`].
    pub keyboard: bool,
    /// Decode the speaker bit on writes.
    pub beeper: bool,
    /// Latch the border colour on writes.
    pub border: bool,
}

impl Default for PortFeatures {
    fn default() -> Self {
        Self {
            keyboard: true,
            beeper: true,
            border: false,
        }
    }
}

/// Is `port` decoded by the ULA?
#[must_use]
pub fn is_ula_port(port: u16) -> bool {
    port & 0x01 == 0
}

/// Port $FE dispatcher.
pub struct PortDispatcher {
    features: PortFeatures,
    speaker: Arc<SpeakerLine>,
    /// Last speaker drive bit written.
    speaker_latch: bool,
    /// Border colour index (0-7).
    border: u8,
}

impl PortDispatcher {
    #[must_use]
    pub fn new(features: PortFeatures, speaker: Arc<SpeakerLine>) -> Self {
        Self {
            features,
            speaker,
            speaker_latch: false,
            border: 0,
        }
    }

    /// Handle an I/O read.
    ///
    /// The high byte of `port` is the row-select register; its complement
    /// picks the half-rows to scan.
    #[must_use]
    pub fn read(&self, port: u16, keys: &KeyMatrix) -> u8 {
        if !is_ula_port(port) || !self.features.keyboard {
            return NO_DEVICE;
        }
        let selector = !((port >> 8) as u8);
        keys.scan(selector)
    }

    /// Handle an I/O write.
    pub fn write(&mut self, port: u16, value: u8) {
        if !is_ula_port(port) {
            return;
        }

        if self.features.beeper {
            let on = value & SPEAKER_BIT != 0;
            let edge = on != self.speaker_latch;
            self.speaker_latch = on;
            self.speaker.drive(on, edge);
        }

        if self.features.border {
            self.border = (value >> 1) & 0x07;
        }
    }

    /// Current border colour index (0-7). Stays 0 unless the border feature
    /// is enabled.
    #[must_use]
    pub fn border(&self) -> u8 {
        self.border
    }

    /// Shared handle to the speaker line, for wiring up an audio callback.
    #[must_use]
    pub fn speaker(&self) -> &Arc<SpeakerLine> {
        &self.speaker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(features: PortFeatures) -> PortDispatcher {
        PortDispatcher::new(features, SpeakerLine::new())
    }

    #[test]
    fn idle_row_reads_all_ones() {
        let ports = dispatcher(PortFeatures::default());
        let keys = KeyMatrix::new();
        // B = 0xFE selects row 0
        assert_eq!(ports.read(0xFEFE, &keys), 0xFF);
    }

    #[test]
    fn pressed_key_clears_its_bit() {
        let ports = dispatcher(PortFeatures::default());
        let mut keys = KeyMatrix::new();
        keys.set(2, 3, true); // R

        assert_eq!(ports.read(0xFBFE, &keys), 0xF7);
        assert_eq!(ports.read(0xFDFE, &keys), 0xFF);
    }

    #[test]
    fn multiple_rows_wire_and() {
        let ports = dispatcher(PortFeatures::default());
        let mut keys = KeyMatrix::new();
        keys.set(7, 0, true); // Space
        keys.set(5, 4, true); // Y

        // B = 0x5F: rows 5 and 7 selected
        assert_eq!(ports.read(0x5FFE, &keys), 0xEE);
        // B = 0x00: full scan
        assert_eq!(ports.read(0x00FE, &keys), 0xEE);
    }

    #[test]
    fn odd_port_reads_no_device() {
        let ports = dispatcher(PortFeatures::default());
        let mut keys = KeyMatrix::new();
        keys.set(0, 0, true);
        assert_eq!(ports.read(0x00FF, &keys), NO_DEVICE);
        assert_eq!(ports.read(0x001F, &keys), NO_DEVICE);
    }

    #[test]
    fn keyboard_disabled_reads_no_device() {
        let ports = dispatcher(PortFeatures {
            keyboard: false,
            beeper: false,
            border: true,
        });
        let mut keys = KeyMatrix::new();
        keys.set(0, 0, true);
        assert_eq!(ports.read(0x00FE, &keys), NO_DEVICE);
    }

    #[test]
    fn speaker_bit_drives_line_and_counts_edges() {
        let mut ports = dispatcher(PortFeatures::default());
        let line = Arc::clone(ports.speaker());

        ports.write(0x00FE, 0x10);
        assert!(line.is_on());
        assert_eq!(line.edges(), 1);

        // Same level again: no edge
        ports.write(0x00FE, 0x17);
        assert!(line.is_on());
        assert_eq!(line.edges(), 1);

        ports.write(0x00FE, 0x07);
        assert!(!line.is_on());
        assert_eq!(line.edges(), 2);
    }

    #[test]
    fn odd_port_write_ignored() {
        let mut ports = dispatcher(PortFeatures {
            border: true,
            ..PortFeatures::default()
        });
        ports.write(0x00FF, 0x1E);
        assert!(!ports.speaker().is_on());
        assert_eq!(ports.border(), 0);
    }

    #[test]
    fn border_latched_from_bits_1_to_3() {
        let mut ports = dispatcher(PortFeatures {
            border: true,
            ..PortFeatures::default()
        });
        ports.write(0x00FE, 0b0000_1010);
        assert_eq!(ports.border(), 5);
        ports.write(0x00FE, 0b1111_0001);
        assert_eq!(ports.border(), 0);
    }

    #[test]
    fn border_ignored_when_disabled() {
        let mut ports = dispatcher(PortFeatures::default());
        ports.write(0x00FE, 0x0E);
        assert_eq!(ports.border(), 0);
    }

    #[test]
    fn beeper_disabled_leaves_line_alone() {
        let mut ports = dispatcher(PortFeatures {
            keyboard: true,
            beeper: false,
            border: false,
        });
        ports.write(0x00FE, 0x10);
        assert!(!ports.speaker().is_on());
        assert_eq!(ports.speaker().edges(), 0);
    }
}
