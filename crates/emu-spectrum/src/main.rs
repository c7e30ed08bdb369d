//! ZX Spectrum 48K binary.
//!
//! Opens a window with a winit/pixels framebuffer and a cpal beeper, or runs
//! headless for screenshots and audio capture. No Z80 core is bundled: the
//! machine runs a CPU parked on HALT, which is enough to view SCREEN$ dumps
//! and exercise the ULA.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use emu_spectrum::host::{AudioOutput, WindowHost, WindowOptions};
use emu_spectrum::{
    FramePacer, HeadlessHost, IdleCpu, Spectrum, SpectrumConfig, SpectrumError, capture, read_rom,
};

#[derive(Parser, Debug)]
#[command(name = "emu-spectrum", about = "ZX Spectrum 48K")]
struct Args {
    /// 16K ROM image.
    #[arg(long, default_value = "48.rom")]
    rom: PathBuf,

    /// SCREEN$ dump (6912 bytes) to place in video memory.
    #[arg(long)]
    screen: Option<PathBuf>,

    /// Window zoom.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Decode border writes and show the border.
    #[arg(long)]
    border: bool,

    /// Don't open an audio device.
    #[arg(long)]
    mute: bool,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode.
    #[arg(long, default_value_t = 100)]
    frames: u64,

    /// Save a PNG of the last frame (headless).
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Save a WAV of the beeper (headless).
    #[arg(long)]
    audio: Option<PathBuf>,
}

fn make_spectrum(args: &Args) -> Result<(Spectrum<IdleCpu>, SpectrumConfig), SpectrumError> {
    let mut config = SpectrumConfig::new(read_rom(&args.rom)?);
    config.features.border = args.border;
    config.paced = !args.headless;

    let mut spectrum = Spectrum::new(&config, IdleCpu::new())?;
    if let Some(path) = &args.screen {
        let screen = std::fs::read(path).map_err(|e| SpectrumError::io(path, e))?;
        spectrum.load_screen(&screen)?;
    }
    Ok((spectrum, config))
}

fn run_headless(args: &Args) -> Result<(), SpectrumError> {
    let (mut spectrum, _) = make_spectrum(args)?;
    let mut host = HeadlessHost::new(args.frames);
    if args.audio.is_some() {
        host = host.with_audio(spectrum.speaker());
    }

    spectrum.run(&mut host);
    log::info!("Ran {} frames", spectrum.frame_count());

    if let Some(path) = &args.screenshot {
        let border = args.border.then_some(host.last_border());
        capture::save_screenshot(spectrum.framebuffer(), border, path)?;
        log::info!("Screenshot saved to {}", path.display());
    }
    if let Some(path) = &args.audio {
        capture::save_audio(host.audio(), path)?;
        log::info!("Audio saved to {}", path.display());
    }
    Ok(())
}

fn run_windowed(args: &Args) -> Result<(), SpectrumError> {
    let (spectrum, config) = make_spectrum(args)?;

    // Held for the life of the window; dropping it stops the stream.
    let _audio = if args.mute {
        None
    } else {
        match AudioOutput::new(spectrum.speaker()) {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("Audio unavailable, running silent: {e}");
                None
            }
        }
    };

    let options = WindowOptions {
        scale: args.scale,
        bordered: args.border,
    };
    WindowHost::new(spectrum, options, FramePacer::new(config.frame_duration())).run()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let result = if args.headless {
        run_headless(&args)
    } else {
        run_windowed(&args)
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}
