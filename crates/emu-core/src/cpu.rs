use crate::{IoBus, Ticks};

/// An instruction-level CPU engine.
///
/// The engine itself lives outside this workspace. The frame scheduler only
/// needs to single-step it, read its elapsed-cycle counter, and raise the
/// once-per-frame interrupt. The type parameter `B` is the bus the engine
/// reaches memory and ports through.
pub trait Cpu<B: IoBus> {
    /// Execute one instruction.
    ///
    /// Instructions have variable length, so the number of T-states consumed
    /// varies from call to call.
    fn step(&mut self, bus: &mut B);

    /// Total T-states executed since power-on. Monotonic.
    fn cycles(&self) -> Ticks;

    /// Raise the maskable interrupt.
    ///
    /// `data` is the byte the peripheral places on the data bus during the
    /// acknowledge cycle.
    fn interrupt(&mut self, bus: &mut B, data: u8);
}
