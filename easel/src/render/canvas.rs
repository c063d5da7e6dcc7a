use std::cell::RefCell;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use tiny_skia::{Pixmap, PixmapMut};

use crate::core::error::{Error, Result};
use crate::core::logging::info;
use crate::shapes::Color;

/// The off-screen RGBA surface plus the last frame handed to the backend.
#[derive(Debug)]
pub struct Canvas {
    surface: Pixmap,
    frame: Vec<u32>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let surface = Pixmap::new(width, height).ok_or_else(|| {
            Error::usage(format!(
                "Cannot create a {}x{} drawing surface",
                width, height
            ))
        })?;
        Ok(Self {
            surface,
            frame: vec![0; (width * height) as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &Pixmap {
        &self.surface
    }

    pub fn fill(&mut self, color: tiny_skia::Color) {
        self.surface.fill(color);
    }

    pub fn surface_mut(&mut self) -> PixmapMut<'_> {
        self.surface.as_mut()
    }

    /// Premultiplied RGBA bytes, row-major, no padding.
    pub fn surface_bytes(&self) -> &[u8] {
        self.surface.data()
    }

    /// Last converted frame, one `0RGB` word per pixel.
    pub fn frame(&self) -> &[u32] {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut Vec<u32> {
        &mut self.frame
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.surface.pixel(x, y)?.demultiply();
        Some(Color::rgba(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Encodes the surface as an 8-bit RGBA PNG.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let rgba = self
            .surface
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect::<Vec<u8>>();

        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        let mut encoder =
            png::Encoder::new(&mut writer, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::Filter::Sub);
        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&rgba)?;
        drop(png_writer);
        writer.flush()?;

        Ok(())
    }
}

/// The single reentrant lock guarding the canvas. Clones share the lock.
///
/// The loop holds it for its whole locked section and user callbacks run
/// inside that section, so a screenshot taken from a callback re-enters the
/// lock on the same thread instead of deadlocking. Only short `RefCell`
/// borrows are taken while the guard is held.
#[derive(Clone)]
pub struct DrawingLock(Arc<ReentrantMutex<RefCell<Canvas>>>);

impl DrawingLock {
    pub fn new(canvas: Canvas) -> Self {
        Self(Arc::new(ReentrantMutex::new(RefCell::new(canvas))))
    }

    pub fn lock(&self) -> ReentrantMutexGuard<'_, RefCell<Canvas>> {
        self.0.lock()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Canvas) -> R) -> R {
        let guard = self.0.lock();
        let mut canvas = guard.borrow_mut();
        f(&mut canvas)
    }

    pub fn screenshot(&self, path: &Path) -> Result<()> {
        let guard = self.0.lock();
        let canvas = guard.borrow();
        canvas.write_png(path)?;
        info!("Saved screenshot to {}", path.display());
        Ok(())
    }

    pub fn is_locked(&self) -> bool {
        self.0.is_locked()
    }
}
