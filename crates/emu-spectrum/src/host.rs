//! Windowed front end (winit + pixels) and beeper output (cpal).

use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, Stream, StreamConfig};
use emu_core::{Cpu, KeyCode};
use pixels::{Pixels, SurfaceTexture};
use sinclair_ula::{
    Beeper, CANVAS_HEIGHT, CANVAS_WIDTH, FrameBuffer, SAMPLE_RATE, SCREEN_HEIGHT, SCREEN_WIDTH,
    SpeakerLine,
};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::SpectrumError;
use crate::bus::SpectrumBus;
use crate::capture::argb_to_rgba;
use crate::pacing::FramePacer;
use crate::spectrum::{Host, HostEvent, RunState, Spectrum};

/// Beeper output stream. Dropping it stops the sound.
pub struct AudioOutput {
    _stream: Stream,
}

impl AudioOutput {
    /// Open the default output device and start pulling samples from the
    /// speaker line.
    ///
    /// The stream runs at the device's preferred rate, falling back to
    /// 44.1 kHz when the device doesn't report one.
    pub fn new(speaker: Arc<SpeakerLine>) -> Result<Self, SpectrumError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| SpectrumError::Host("no audio output device".to_string()))?;

        let sample_rate = device
            .default_output_config()
            .map_or(SAMPLE_RATE, |config| config.sample_rate().0);
        let config = StreamConfig {
            channels: 1,
            sample_rate: SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let mut beeper = Beeper::with_rate(speaker, sample_rate);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for sample in data.iter_mut() {
                        *sample = f32::from(beeper.next_sample()) / 32768.0;
                    }
                },
                |err| log::error!("Audio stream error: {err}"),
                None,
            )
            .map_err(|e| SpectrumError::Host(e.to_string()))?;
        stream
            .play()
            .map_err(|e| SpectrumError::Host(e.to_string()))?;

        log::info!("Audio: mono {sample_rate} Hz");
        Ok(Self { _stream: stream })
    }
}

/// Window settings.
#[derive(Debug, Clone, Copy)]
pub struct WindowOptions {
    /// Integer zoom applied to the logical window size.
    pub scale: u32,
    /// Present the 320×256 bordered canvas instead of the bare display.
    pub bordered: bool,
}

/// The window surface: queues input and shows frames.
struct Screen {
    options: WindowOptions,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    events: Vec<HostEvent>,
    canvas: Vec<u32>,
}

impl Screen {
    fn size(&self) -> (u32, u32) {
        if self.options.bordered {
            (CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32)
        } else {
            (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
        }
    }
}

impl Host for Screen {
    fn poll_events(&mut self, events: &mut Vec<HostEvent>) {
        events.append(&mut self.events);
    }

    fn present(&mut self, frame: &FrameBuffer, border: u8) {
        let Some(pixels) = self.pixels.as_mut() else {
            return;
        };

        // Convert ARGB32 → RGBA8 for the pixels buffer
        if self.options.bordered {
            frame.compose_with_border(border, &mut self.canvas);
            argb_to_rgba(&self.canvas, pixels.frame_mut());
        } else {
            argb_to_rgba(frame.pixels(), pixels.frame_mut());
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// The winit application. Owns the machine and runs one frame per
/// event-loop turn through [`Spectrum::host_frame`].
pub struct WindowHost<C> {
    spectrum: Spectrum<C>,
    screen: Screen,
    pacer: FramePacer,
    error: Option<SpectrumError>,
}

impl<C: Cpu<SpectrumBus>> WindowHost<C> {
    #[must_use]
    pub fn new(spectrum: Spectrum<C>, options: WindowOptions, pacer: FramePacer) -> Self {
        Self {
            spectrum,
            screen: Screen {
                options,
                window: None,
                pixels: None,
                events: Vec::new(),
                canvas: vec![0; CANVAS_WIDTH * CANVAS_HEIGHT],
            },
            pacer,
            error: None,
        }
    }

    /// Run the event loop until the window closes.
    pub fn run(mut self) -> Result<(), SpectrumError> {
        let event_loop = EventLoop::new().map_err(|e| SpectrumError::Host(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop
            .run_app(&mut self)
            .map_err(|e| SpectrumError::Host(e.to_string()))?;
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SpectrumError) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl<C: Cpu<SpectrumBus>> ApplicationHandler for WindowHost<C> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.screen.window.is_some() {
            return;
        }

        let (width, height) = self.screen.size();
        let scale = self.screen.options.scale.max(1);
        let attrs = WindowAttributes::default()
            .with_title("ZX Spectrum 48K")
            .with_inner_size(winit::dpi::LogicalSize::new(width * scale, height * scale))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, SpectrumError::Host(e.to_string())),
        };
        let inner = window.inner_size();
        let surface = SurfaceTexture::new(inner.width, inner.height, Arc::clone(&window));
        match Pixels::new(width, height, surface) {
            Ok(pixels) => self.screen.pixels = Some(pixels),
            Err(e) => return self.fail(event_loop, SpectrumError::Host(e.to_string())),
        }
        self.screen.window = Some(window);
        self.pacer.begin();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.screen.events.push(HostEvent::Quit),
            WindowEvent::Focused(false) => self.spectrum.release_all_keys(),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = convert_keycode(code) else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                self.screen.events.push(match key {
                    KeyCode::Escape if pressed => HostEvent::Quit,
                    _ if pressed => HostEvent::KeyDown(key),
                    _ => HostEvent::KeyUp(key),
                });
            }
            WindowEvent::RedrawRequested => {
                if let Some(pixels) = self.screen.pixels.as_ref() {
                    if let Err(e) = pixels.render() {
                        self.fail(event_loop, SpectrumError::Host(e.to_string()));
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.screen.window.is_none() {
            return;
        }

        if self.spectrum.host_frame(&mut self.screen) == RunState::Stopped {
            log::info!("Stopped after {} frames", self.spectrum.frame_count());
            event_loop.exit();
            return;
        }
        self.pacer.finish();
        self.pacer.begin();
    }
}

/// Translate a winit key into the machine's key code.
fn convert_keycode(code: WinitKeyCode) -> Option<KeyCode> {
    Some(match code {
        WinitKeyCode::KeyA => KeyCode::KeyA,
        WinitKeyCode::KeyB => KeyCode::KeyB,
        WinitKeyCode::KeyC => KeyCode::KeyC,
        WinitKeyCode::KeyD => KeyCode::KeyD,
        WinitKeyCode::KeyE => KeyCode::KeyE,
        WinitKeyCode::KeyF => KeyCode::KeyF,
        WinitKeyCode::KeyG => KeyCode::KeyG,
        WinitKeyCode::KeyH => KeyCode::KeyH,
        WinitKeyCode::KeyI => KeyCode::KeyI,
        WinitKeyCode::KeyJ => KeyCode::KeyJ,
        WinitKeyCode::KeyK => KeyCode::KeyK,
        WinitKeyCode::KeyL => KeyCode::KeyL,
        WinitKeyCode::KeyM => KeyCode::KeyM,
        WinitKeyCode::KeyN => KeyCode::KeyN,
        WinitKeyCode::KeyO => KeyCode::KeyO,
        WinitKeyCode::KeyP => KeyCode::KeyP,
        WinitKeyCode::KeyQ => KeyCode::KeyQ,
        WinitKeyCode::KeyR => KeyCode::KeyR,
        WinitKeyCode::KeyS => KeyCode::KeyS,
        WinitKeyCode::KeyT => KeyCode::KeyT,
        WinitKeyCode::KeyU => KeyCode::KeyU,
        WinitKeyCode::KeyV => KeyCode::KeyV,
        WinitKeyCode::KeyW => KeyCode::KeyW,
        WinitKeyCode::KeyX => KeyCode::KeyX,
        WinitKeyCode::KeyY => KeyCode::KeyY,
        WinitKeyCode::KeyZ => KeyCode::KeyZ,

        WinitKeyCode::Digit0 => KeyCode::Digit0,
        WinitKeyCode::Digit1 => KeyCode::Digit1,
        WinitKeyCode::Digit2 => KeyCode::Digit2,
        WinitKeyCode::Digit3 => KeyCode::Digit3,
        WinitKeyCode::Digit4 => KeyCode::Digit4,
        WinitKeyCode::Digit5 => KeyCode::Digit5,
        WinitKeyCode::Digit6 => KeyCode::Digit6,
        WinitKeyCode::Digit7 => KeyCode::Digit7,
        WinitKeyCode::Digit8 => KeyCode::Digit8,
        WinitKeyCode::Digit9 => KeyCode::Digit9,

        WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
        WinitKeyCode::ControlLeft => KeyCode::ControlLeft,
        WinitKeyCode::ControlRight => KeyCode::ControlRight,

        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Backspace => KeyCode::Backspace,
        WinitKeyCode::Escape => KeyCode::Escape,

        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

        _ => return None,
    })
}
