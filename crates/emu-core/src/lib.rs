//! Core traits and types for the Spectrum peripheral layer.
//!
//! The CPU engine is an external collaborator. It reaches memory and I/O
//! ports through [`Bus`] and [`IoBus`], and the frame scheduler drives it
//! through [`Cpu`]. Time is counted in CPU T-states ([`Ticks`]).

mod bus;
mod clock;
mod cpu;
mod keys;
mod ticks;

pub use bus::{Bus, IoBus};
pub use clock::MasterClock;
pub use cpu::Cpu;
pub use keys::KeyCode;
pub use ticks::Ticks;
