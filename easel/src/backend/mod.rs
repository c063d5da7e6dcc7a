//! Window and input backends driven by the runner.

use std::time::Duration;

use crate::core::error::Result;
use crate::runtime::events::InputEvent;

pub mod headless;
pub mod winit_backend;

pub use headless::HeadlessBackend;
pub use winit_backend::WinitBackend;

/// A converted frame ready for presentation, one `0RGB` word per pixel.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub pixels: &'a [u32],
    pub width: u32,
    pub height: u32,
}

pub trait Backend {
    /// Blocks for at most `timeout` or until input arrives. Called outside
    /// the drawing lock.
    fn wait(&mut self, timeout: Duration) -> Result<()>;

    /// Drains every pending event without blocking, oldest first.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Milliseconds since the backend was created.
    fn ticks_ms(&self) -> u64;

    fn set_caption(&mut self, title: &str);

    fn present(&mut self, frame: &Frame) -> Result<()>;
}
