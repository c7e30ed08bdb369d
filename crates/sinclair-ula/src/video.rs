//! Display decode.
//!
//! Screen memory is 6912 bytes: a 6144-byte bitmap at $4000 and a 768-byte
//! attribute map at $5800. The bitmap is not row-major. Address bits for
//! scanline `y` are `010 Y7Y6 Y2Y1Y0 Y5Y4Y3 X4..X0`: the screen splits into
//! three 64-line thirds, and within each third the pixel lines of a
//! character row are 256 bytes apart.

use crate::palette::PALETTE;

/// Active display width in pixels.
pub const SCREEN_WIDTH: usize = 256;
/// Active display height in pixels.
pub const SCREEN_HEIGHT: usize = 192;

/// Start of the bitmap.
pub const BITMAP_BASE: u16 = 0x4000;
/// Start of the attribute map.
pub const ATTR_BASE: u16 = 0x5800;
/// Bitmap plus attributes.
pub const SCREEN_BYTES: usize = 6912;

/// Border width around the active area on a bordered canvas.
pub const BORDER: usize = 32;
/// Bordered canvas width.
pub const CANVAS_WIDTH: usize = SCREEN_WIDTH + 2 * BORDER;
/// Bordered canvas height.
pub const CANVAS_HEIGHT: usize = SCREEN_HEIGHT + 2 * BORDER;

/// Offset of scanline `y` within the bitmap.
#[must_use]
pub const fn line_offset(y: usize) -> u16 {
    (((y & 0xC0) << 5) | ((y & 0x07) << 8) | ((y & 0x38) << 2)) as u16
}

/// Address of the bitmap byte holding pixel (`x`, `y`).
#[must_use]
pub const fn bitmap_address(x: usize, y: usize) -> u16 {
    BITMAP_BASE + line_offset(y) + (x >> 3) as u16
}

/// Address of the attribute byte for the cell containing pixel (`x`, `y`).
#[must_use]
pub const fn attribute_address(x: usize, y: usize) -> u16 {
    ATTR_BASE + ((y / 8) * 32 + x / 8) as u16
}

/// A decoded attribute byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub ink: u8,
    pub paper: u8,
    pub bright: bool,
    pub flash: bool,
}

impl Attribute {
    /// Decode `FBPPPIII`.
    #[must_use]
    pub const fn decode(byte: u8) -> Self {
        Self {
            ink: byte & 0x07,
            paper: (byte >> 3) & 0x07,
            bright: byte & 0x40 != 0,
            flash: byte & 0x80 != 0,
        }
    }

    /// ARGB colours for set and clear pixels, after the flash swap.
    #[must_use]
    pub const fn colours(self, flash_phase: bool) -> (u32, u32) {
        let (ink, paper) = if self.flash && flash_phase {
            (self.paper, self.ink)
        } else {
            (self.ink, self.paper)
        };
        let bright = if self.bright { 8 } else { 0 };
        (
            PALETTE[(ink + bright) as usize],
            PALETTE[(paper + bright) as usize],
        )
    }
}

/// One decoded frame: 256×192 opaque ARGB32 pixels.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: Vec<u32>,
}

impl FrameBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pixels: vec![PALETTE[0]; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Colour at (`x`, `y`).
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Row-major pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Decode a whole frame from screen memory.
    ///
    /// `read_vram` reads a byte from the 64K address space without side
    /// effects. Each bitmap and attribute byte is fetched once and expanded
    /// to 8 pixels.
    pub fn render(&mut self, read_vram: impl Fn(u16) -> u8, flash_phase: bool) {
        for (y, row) in self.pixels.chunks_exact_mut(SCREEN_WIDTH).enumerate() {
            for (column, cell) in row.chunks_exact_mut(8).enumerate() {
                let x = column * 8;
                let bits = read_vram(bitmap_address(x, y));
                let attr = Attribute::decode(read_vram(attribute_address(x, y)));
                let (ink, paper) = attr.colours(flash_phase);
                for (bit, pixel) in cell.iter_mut().enumerate() {
                    *pixel = if bits & (0x80 >> bit) != 0 { ink } else { paper };
                }
            }
        }
    }

    /// Compose the frame onto a [`CANVAS_WIDTH`]×[`CANVAS_HEIGHT`] canvas
    /// surrounded by a solid border.
    ///
    /// `canvas` must hold at least `CANVAS_WIDTH * CANVAS_HEIGHT` pixels.
    pub fn compose_with_border(&self, border: u8, canvas: &mut [u32]) {
        debug_assert!(
            canvas.len() >= CANVAS_WIDTH * CANVAS_HEIGHT,
            "border canvas needs {} pixels, got {}",
            CANVAS_WIDTH * CANVAS_HEIGHT,
            canvas.len()
        );
        let border_colour = PALETTE[(border & 0x07) as usize];
        canvas[..CANVAS_WIDTH * CANVAS_HEIGHT].fill(border_colour);
        for (y, row) in self.pixels.chunks_exact(SCREEN_WIDTH).enumerate() {
            let start = (y + BORDER) * CANVAS_WIDTH + BORDER;
            canvas[start..start + SCREEN_WIDTH].copy_from_slice(row);
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Screen memory backed by a flat 64K image.
    fn vram() -> Vec<u8> {
        vec![0u8; 0x10000]
    }

    fn render(mem: &[u8], flash_phase: bool) -> FrameBuffer {
        let mut fb = FrameBuffer::new();
        fb.render(|addr| mem[addr as usize], flash_phase);
        fb
    }

    #[test]
    fn line_offsets_interleave() {
        assert_eq!(line_offset(0), 0x0000);
        assert_eq!(line_offset(1), 0x0100);
        assert_eq!(line_offset(7), 0x0700);
        assert_eq!(line_offset(8), 0x0020);
        assert_eq!(line_offset(63), 0x07E0);
        assert_eq!(line_offset(64), 0x0800);
        assert_eq!(line_offset(191), 0x17E0);
    }

    #[test]
    fn bitmap_addresses() {
        assert_eq!(bitmap_address(0, 0), 0x4000);
        assert_eq!(bitmap_address(8, 0), 0x4001);
        assert_eq!(bitmap_address(255, 0), 0x401F);
        assert_eq!(bitmap_address(0, 1), 0x4100);
        assert_eq!(bitmap_address(255, 191), 0x57FF);
    }

    #[test]
    fn attribute_addresses() {
        assert_eq!(attribute_address(0, 0), 0x5800);
        assert_eq!(attribute_address(8, 0), 0x5801);
        assert_eq!(attribute_address(0, 8), 0x5820);
        assert_eq!(attribute_address(255, 191), 0x5AFF);
    }

    #[test]
    fn every_bitmap_byte_used_once() {
        let mut seen = vec![false; 6144];
        for y in 0..SCREEN_HEIGHT {
            for x in (0..SCREEN_WIDTH).step_by(8) {
                let index = (bitmap_address(x, y) - BITMAP_BASE) as usize;
                assert!(!seen[index], "byte {index:#06X} mapped twice");
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn attribute_decode() {
        let attr = Attribute::decode(0x6F);
        assert_eq!(attr.ink, 7);
        assert_eq!(attr.paper, 5);
        assert!(attr.bright);
        assert!(!attr.flash);

        let attr = Attribute::decode(0x80);
        assert!(attr.flash);
        assert!(!attr.bright);
    }

    #[test]
    fn white_ink_black_paper() {
        let mut mem = vram();
        mem[0x5800] = 0x07; // ink 7, paper 0
        mem[0x4000] = 0b1000_0000;
        let fb = render(&mem, false);
        assert_eq!(fb.pixel(0, 0), PALETTE[7]);
        assert_eq!(fb.pixel(1, 0), PALETTE[0]);
    }

    #[test]
    fn bright_selects_upper_half() {
        let mut mem = vram();
        mem[0x5800] = 0x47; // bright white ink on black
        mem[0x4000] = 0xFF;
        let fb = render(&mem, false);
        assert_eq!(fb.pixel(0, 0), PALETTE[15]);
    }

    #[test]
    fn flash_swaps_only_in_flash_phase() {
        let mut mem = vram();
        mem[0x5800] = 0x80 | (2 << 3) | 6; // flash, paper red, ink yellow
        mem[0x4000] = 0xF0;

        let fb = render(&mem, false);
        assert_eq!(fb.pixel(0, 0), PALETTE[6]);
        assert_eq!(fb.pixel(7, 0), PALETTE[2]);

        let fb = render(&mem, true);
        assert_eq!(fb.pixel(0, 0), PALETTE[2]);
        assert_eq!(fb.pixel(7, 0), PALETTE[6]);
    }

    #[test]
    fn non_flash_cell_ignores_flash_phase() {
        let mut mem = vram();
        mem[0x5800] = 0x0E; // paper blue, ink yellow
        mem[0x4000] = 0x80;
        let fb = render(&mem, true);
        assert_eq!(fb.pixel(0, 0), PALETTE[6]);
        assert_eq!(fb.pixel(1, 0), PALETTE[1]);
    }

    #[test]
    fn second_pixel_line_reads_next_bitmap_page() {
        let mut mem = vram();
        mem[0x5800] = 0x07;
        mem[0x4100] = 0x01; // y = 1, rightmost pixel of first cell
        let fb = render(&mem, false);
        assert_eq!(fb.pixel(7, 1), PALETTE[7]);
        assert_eq!(fb.pixel(7, 0), PALETTE[0]);
    }

    #[test]
    fn blank_memory_renders_black() {
        let fb = render(&vram(), true);
        assert!(fb.pixels().iter().all(|&p| p == PALETTE[0]));
    }

    #[test]
    fn border_surrounds_active_area() {
        let mut mem = vram();
        mem[0x5800] = 0x38; // white paper
        let fb = render(&mem, false);

        let mut canvas = vec![0u32; CANVAS_WIDTH * CANVAS_HEIGHT];
        fb.compose_with_border(2, &mut canvas);
        assert_eq!(canvas[0], PALETTE[2]);
        assert_eq!(canvas[CANVAS_WIDTH * CANVAS_HEIGHT - 1], PALETTE[2]);
        assert_eq!(canvas[BORDER * CANVAS_WIDTH + BORDER], PALETTE[7]);
        assert_eq!(canvas[BORDER * CANVAS_WIDTH + BORDER - 1], PALETTE[2]);
    }

    #[test]
    #[should_panic(expected = "border canvas needs 81920 pixels")]
    fn short_canvas_is_rejected() {
        let fb = FrameBuffer::new();
        let mut canvas = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        fb.compose_with_border(0, &mut canvas);
    }
}
