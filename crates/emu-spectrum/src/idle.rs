//! Stand-in CPU engine for running the machine without a Z80 core.

use emu_core::{Cpu, IoBus, Ticks};

/// T-states per HALT cycle (an internal NOP).
const HALT_TICKS: u64 = 4;

/// A processor parked on HALT.
///
/// Each step burns one 4 T-state NOP and touches nothing on the bus; an
/// interrupt is counted and execution resumes at HALT. This is enough to
/// drive the frame loop, show a SCREEN$ image and exercise the host.
#[derive(Debug, Default)]
pub struct IdleCpu {
    cycles: Ticks,
    interrupts: u64,
}

impl IdleCpu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interrupts accepted so far.
    #[must_use]
    pub fn interrupts(&self) -> u64 {
        self.interrupts
    }
}

impl<B: IoBus> Cpu<B> for IdleCpu {
    fn step(&mut self, _bus: &mut B) {
        self.cycles += Ticks::new(HALT_TICKS);
    }

    fn cycles(&self) -> Ticks {
        self.cycles
    }

    fn interrupt(&mut self, _bus: &mut B, _data: u8) {
        self.interrupts += 1;
    }
}
