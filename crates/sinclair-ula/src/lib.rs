//! Sinclair ULA (Uncommitted Logic Array), 48K peripheral decode.
//!
//! The ULA sits between the Z80 and everything else: it decodes the screen
//! memory into pixels, answers keyboard scans on port $FE, and drives the
//! beeper from the same port.
//!
//! # Standalone IC
//!
//! This crate has no dependencies. The rasterizer reads VRAM through a
//! closure passed by the caller, and the port dispatcher is handed the key
//! matrix on each read, so neither is tied to a particular memory model.
//!
//! # Screen memory layout
//!
//! Bitmap at $4000-$57FF (6144 bytes), attributes at $5800-$5AFF (768 bytes).
//! Bitmap address: `010Y7 Y6Y2 Y1Y0 Y5Y4Y3 X4X3X2X1X0`
//! Attribute address: `0101 10Y7 Y6Y5 Y4Y3 X4X3X2X1X0`
//!
//! # Timing
//!
//! There is no beam model. The machine decodes one whole frame at the end of
//! each 70,000 T-state budget, and FLASH flips every 16 frames.

mod beeper;
mod keyboard;
mod palette;
mod ports;
mod video;

pub use beeper::{AMPLITUDE, Beeper, SAMPLE_RATE, SpeakerLine, TONE_HZ};
pub use keyboard::{KEYS_PER_ROW, KeyMatrix, ROWS};
pub use palette::PALETTE;
pub use ports::{NO_DEVICE, PortDispatcher, PortFeatures, is_ula_port};
pub use video::{
    ATTR_BASE, Attribute, BITMAP_BASE, BORDER, CANVAS_HEIGHT, CANVAS_WIDTH, FrameBuffer,
    SCREEN_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH, attribute_address, bitmap_address, line_offset,
};

/// Number of frames between FLASH toggles.
pub const FLASH_FRAME_COUNT: u32 = 16;
