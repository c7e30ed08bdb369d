//! CPU clock configuration.

use crate::Ticks;

/// Clock configuration for the emulated machine.
///
/// The frame budget is derived from the CPU frequency and the frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterClock {
    /// CPU frequency in Hz (`3_500_000` for the 48K Spectrum).
    pub frequency_hz: u64,
}

impl MasterClock {
    /// The nominal 3.5 MHz Spectrum clock.
    pub const SPECTRUM_48K: Self = Self::new(3_500_000);

    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// T-states per frame at the given frame rate (integer division).
    #[must_use]
    pub const fn ticks_per_frame(&self, frames_per_second: u64) -> Ticks {
        Ticks::new(self.frequency_hz / frames_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_frame_budget() {
        assert_eq!(MasterClock::SPECTRUM_48K.ticks_per_frame(50), Ticks(70_000));
    }
}
