//! Headless capture: PNG screenshots and WAV audio dumps.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use sinclair_ula::{CANVAS_HEIGHT, CANVAS_WIDTH, FrameBuffer, SAMPLE_RATE, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::SpectrumError;

/// Convert ARGB32 pixels to packed RGBA bytes.
pub fn argb_to_rgba(pixels: &[u32], out: &mut [u8]) {
    for (&argb, rgba) in pixels.iter().zip(out.chunks_exact_mut(4)) {
        rgba[0] = (argb >> 16) as u8;
        rgba[1] = (argb >> 8) as u8;
        rgba[2] = argb as u8;
        rgba[3] = 0xFF;
    }
}

/// Save a frame as a PNG file.
///
/// With `border` set, the 320×256 bordered canvas is written; otherwise just
/// the 256×192 display area.
pub fn save_screenshot(
    frame: &FrameBuffer,
    border: Option<u8>,
    path: &Path,
) -> Result<(), SpectrumError> {
    let (width, height, pixels) = match border {
        Some(colour) => {
            let mut canvas = vec![0; CANVAS_WIDTH * CANVAS_HEIGHT];
            frame.compose_with_border(colour, &mut canvas);
            (CANVAS_WIDTH, CANVAS_HEIGHT, canvas)
        }
        None => (SCREEN_WIDTH, SCREEN_HEIGHT, frame.pixels().to_vec()),
    };

    let file = fs::File::create(path).map_err(|e| SpectrumError::io(path, e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut rgba = vec![0; width * height * 4];
    argb_to_rgba(&pixels, &mut rgba);
    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Save beeper samples as a WAV file (mono, 44.1 kHz, 16-bit PCM).
pub fn save_audio(samples: &[i16], path: &Path) -> Result<(), SpectrumError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
