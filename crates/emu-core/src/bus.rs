//! Memory and I/O port capability offered to the CPU engine.

/// Memory interface.
///
/// The CPU engine performs every memory access through this trait. Calls are
/// synchronous: a write is visible to the next read, and to the rasterizer,
/// within the same frame.
pub trait Bus {
    /// Read a byte from the given address. Every address is readable.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address. Writes to read-only regions are
    /// dropped silently.
    fn write(&mut self, address: u16, value: u8);
}

/// A bus that also decodes the Z80's separate I/O port space.
///
/// The full 16-bit port address is passed through. For `IN r,(C)` and
/// `OUT (C),r` the high byte is the B register, which is how the keyboard
/// row-select reaches the peripheral layer.
pub trait IoBus: Bus {
    /// Read a byte from the given I/O port.
    fn port_read(&mut self, port: u16) -> u8;

    /// Write a byte to the given I/O port.
    fn port_write(&mut self, port: u16, value: u8);
}
