use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, OwnedDisplayHandle};
use winit::keyboard::{KeyCode as WinitKey, ModifiersState, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::{Backend, Frame};
use crate::core::error::{Error, Result};
use crate::core::logging::{debug, trace};
use crate::runtime::events::{InputEvent, MouseButton, MouseButtons};
use crate::runtime::keys::{KeyCode, KeyMod, code};

const LETTERS: [WinitKey; 26] = [
    WinitKey::KeyA,
    WinitKey::KeyB,
    WinitKey::KeyC,
    WinitKey::KeyD,
    WinitKey::KeyE,
    WinitKey::KeyF,
    WinitKey::KeyG,
    WinitKey::KeyH,
    WinitKey::KeyI,
    WinitKey::KeyJ,
    WinitKey::KeyK,
    WinitKey::KeyL,
    WinitKey::KeyM,
    WinitKey::KeyN,
    WinitKey::KeyO,
    WinitKey::KeyP,
    WinitKey::KeyQ,
    WinitKey::KeyR,
    WinitKey::KeyS,
    WinitKey::KeyT,
    WinitKey::KeyU,
    WinitKey::KeyV,
    WinitKey::KeyW,
    WinitKey::KeyX,
    WinitKey::KeyY,
    WinitKey::KeyZ,
];

const DIGITS: [WinitKey; 10] = [
    WinitKey::Digit0,
    WinitKey::Digit1,
    WinitKey::Digit2,
    WinitKey::Digit3,
    WinitKey::Digit4,
    WinitKey::Digit5,
    WinitKey::Digit6,
    WinitKey::Digit7,
    WinitKey::Digit8,
    WinitKey::Digit9,
];

/// Maps a physical key to the raw code space of [`crate::runtime::keys`].
/// Uses the US layout position, so shift handling stays with the translator.
pub fn raw_key_code(key: WinitKey) -> Option<KeyCode> {
    if let Some(i) = LETTERS.iter().position(|k| *k == key) {
        return Some(b'a' as KeyCode + i as KeyCode);
    }
    if let Some(i) = DIGITS.iter().position(|k| *k == key) {
        return Some(b'0' as KeyCode + i as KeyCode);
    }

    let ascii = |c: char| Some(c as KeyCode);
    match key {
        WinitKey::Minus => ascii('-'),
        WinitKey::Equal => ascii('='),
        WinitKey::BracketLeft => ascii('['),
        WinitKey::BracketRight => ascii(']'),
        WinitKey::Backslash => ascii('\\'),
        WinitKey::Semicolon => ascii(';'),
        WinitKey::Quote => ascii('\''),
        WinitKey::Comma => ascii(','),
        WinitKey::Period => ascii('.'),
        WinitKey::Slash => ascii('/'),
        WinitKey::Backquote => ascii('`'),
        WinitKey::Space => Some(code::SPACE),
        WinitKey::Enter | WinitKey::NumpadEnter => Some(code::ENTER),
        WinitKey::Tab => Some(code::TAB),
        WinitKey::Backspace => Some(code::BACKSPACE),
        WinitKey::Delete => Some(code::DELETE),
        WinitKey::Escape => Some(code::ESCAPE),
        WinitKey::ArrowRight => Some(code::RIGHT),
        WinitKey::ArrowLeft => Some(code::LEFT),
        WinitKey::ArrowDown => Some(code::DOWN),
        WinitKey::ArrowUp => Some(code::UP),
        WinitKey::ControlLeft => Some(code::LEFT_CTRL),
        WinitKey::ControlRight => Some(code::RIGHT_CTRL),
        WinitKey::ShiftLeft => Some(code::LEFT_SHIFT),
        WinitKey::ShiftRight => Some(code::RIGHT_SHIFT),
        WinitKey::AltLeft => Some(code::LEFT_ALT),
        WinitKey::AltRight => Some(code::RIGHT_ALT),
        _ => None,
    }
}

fn key_mods(state: ModifiersState) -> KeyMod {
    let mut mods = KeyMod::empty();
    mods.set(KeyMod::SHIFT, state.shift_key());
    mods.set(KeyMod::CTRL, state.control_key());
    mods.set(KeyMod::ALT, state.alt_key());
    mods.set(KeyMod::SUPER, state.super_key());
    mods
}

fn mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Primary,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Right => MouseButton::Secondary,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

// Fields drop in declaration order: surface, then context, then window.
struct Handler {
    surface: Option<Surface<OwnedDisplayHandle, Arc<Window>>>,
    context: Option<Context<OwnedDisplayHandle>>,
    window: Option<Arc<Window>>,
    attributes: Option<WindowAttributes>,
    create_error: Option<String>,
    queue: Vec<InputEvent>,
    mods: KeyMod,
    buttons: MouseButtons,
    cursor: (f32, f32),
    scale_factor: f64,
}

impl Handler {
    fn create(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let Some(attributes) = self.attributes.take() else {
            return Ok(());
        };
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| Error::Backend(e.to_string()))?,
        );
        let context = Context::new(event_loop.owned_display_handle())
            .map_err(|e| Error::Backend(e.to_string()))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| Error::Backend(e.to_string()))?;

        self.scale_factor = window.scale_factor();
        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }

    fn on_cursor(&mut self, position: PhysicalPosition<f64>) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        self.cursor = (logical.x as f32, logical.y as f32);
        self.queue.push(InputEvent::MouseMotion {
            x: self.cursor.0,
            y: self.cursor.1,
            buttons: self.buttons,
        });
    }

    fn on_key(&mut self, event: KeyEvent) {
        if event.repeat {
            return;
        }
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };
        let Some(code) = raw_key_code(key) else {
            trace!("Ignoring unmapped key {:?}", key);
            return;
        };
        let mods = self.mods;
        self.queue.push(match event.state {
            ElementState::Pressed => InputEvent::KeyDown { code, mods },
            ElementState::Released => InputEvent::KeyUp { code, mods },
        });
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.create(event_loop) {
            self.create_error = Some(e.to_string());
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.queue.push(InputEvent::Quit);
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.buttons = MouseButtons::NONE;
                self.queue.push(InputEvent::FocusLost);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.mods = key_mods(modifiers.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor(position);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = mouse_button(button);
                let (x, y) = self.cursor;
                let pressed = state == ElementState::Pressed;
                self.buttons.set(button, pressed);
                self.queue.push(if pressed {
                    InputEvent::MouseDown { x, y, button }
                } else {
                    InputEvent::MouseUp { x, y, button }
                });
            }
            WindowEvent::KeyboardInput { event, .. } => self.on_key(event),
            _ => {}
        }
    }
}

/// A single fixed-size `winit` window presented through `softbuffer`.
///
/// The event loop is pumped rather than run, so the runner keeps control of
/// its own loop.
pub struct WinitBackend {
    handler: Handler,
    event_loop: EventLoop<()>,
    start: Instant,
    exited: bool,
}

impl WinitBackend {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let mut event_loop =
            EventLoop::new().map_err(|e| Error::Backend(e.to_string()))?;

        let attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false);

        let mut handler = Handler {
            surface: None,
            context: None,
            window: None,
            attributes: Some(attributes),
            create_error: None,
            queue: Vec::new(),
            mods: KeyMod::empty(),
            buttons: MouseButtons::NONE,
            cursor: (0.0, 0.0),
            scale_factor: 1.0,
        };

        // Windows can only be created from inside `resumed`, which the
        // first pump delivers on desktop platforms.
        let _ = event_loop
            .pump_app_events(Some(Duration::from_millis(100)), &mut handler);

        if let Some(message) = handler.create_error.take() {
            return Err(Error::Backend(message));
        }
        if handler.window.is_none() {
            return Err(Error::Backend("window was never created".to_string()));
        }

        debug!("Opened {}x{} window {:?}", width, height, title);

        Ok(Self {
            handler,
            event_loop,
            start: Instant::now(),
            exited: false,
        })
    }

    fn pump(&mut self, timeout: Duration) {
        if self.exited {
            return;
        }
        let status = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with {}", code);
            self.exited = true;
        }
    }
}

impl Backend for WinitBackend {
    fn wait(&mut self, timeout: Duration) -> Result<()> {
        self.pump(timeout);
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pump(Duration::ZERO);
        std::mem::take(&mut self.handler.queue)
    }

    fn ticks_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn set_caption(&mut self, title: &str) {
        if let Some(window) = &self.handler.window {
            window.set_title(title);
        }
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let (Some(window), Some(surface)) =
            (&self.handler.window, &mut self.handler.surface)
        else {
            return Ok(());
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        surface
            .resize(w, h)
            .map_err(|e| Error::Backend(e.to_string()))?;

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| Error::Backend(e.to_string()))?;
        scale_into(&mut buffer, size.width, size.height, frame);

        window.pre_present_notify();
        buffer
            .present()
            .map_err(|e| Error::Backend(e.to_string()))?;
        Ok(())
    }
}

/// Nearest-neighbour copy so HiDPI windows show the logical frame at full
/// size.
fn scale_into(dst: &mut [u32], dst_w: u32, dst_h: u32, frame: &Frame) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    if dst_w == frame.width && dst_h == frame.height {
        dst.copy_from_slice(frame.pixels);
        return;
    }
    for y in 0..dst_h {
        let sy = (y as u64 * frame.height as u64 / dst_h as u64) as u32;
        for x in 0..dst_w {
            let sx = (x as u64 * frame.width as u64 / dst_w as u64) as u32;
            dst[(y * dst_w + x) as usize] =
                frame.pixels[(sy * frame.width + sx) as usize];
        }
    }
}
