use super::app::App;
use super::dispatch;
use super::frame_clock::FrameClock;
use super::sketch::Sketch;
use crate::backend::{Backend, Frame};
use crate::core::error::Result;
use crate::core::logging::{debug, info, trace};
use crate::render::pipeline::{self, Scene};

/// Drives one program: wait for input, then under the drawing lock drain
/// events, maybe tick, render and present.
pub struct Runner<B: Backend, S: Sketch> {
    app: App,
    backend: B,
    sketch: S,
    clock: FrameClock,
    caption: String,
    started: bool,
}

impl<B: Backend, S: Sketch> Runner<B, S> {
    pub fn new(app: App, backend: B, sketch: S) -> Self {
        Self {
            app,
            backend,
            sketch,
            clock: FrameClock::new(),
            caption: String::new(),
            started: false,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Warms the text-input pool, sets the caption and runs `setup`.
    /// Called by the first [`Runner::iterate`] if not called explicitly.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        self.app.modal_pool_mut().warm_up();
        self.sync_caption();
        self.clock = FrameClock::new();

        let lock = self.app.drawing_lock().clone();
        let _guard = lock.lock();
        self.sketch.setup(&mut self.app)
    }

    /// One outer-loop iteration.
    pub fn iterate(&mut self) -> Result<()> {
        self.start()?;

        let now = self.backend.ticks_ms();
        let due = self
            .clock
            .time_until_due(now, self.app.steps_per_second());
        self.backend.wait(self.app.refresh_delay().min(due))?;

        let lock = self.app.drawing_lock().clone();
        let guard = lock.lock();

        for event in self.backend.poll_events() {
            trace!("{:?}", event);
            dispatch::dispatch(&mut self.app, &mut self.sketch, event)?;
        }

        let now = self.backend.ticks_ms();
        if self.clock.poll(now, self.app.steps_per_second())
            && self.app.run_state().steps_enabled()
        {
            self.sketch.on_step(&mut self.app)?;
            let held = self.app.held_keys();
            if !held.is_empty() {
                self.sketch.on_key_hold(&mut self.app, &held)?;
            }
        }

        self.sync_caption();

        let mut canvas = guard.borrow_mut();
        pipeline::redraw_all(
            &mut canvas,
            &Scene {
                background: self.app.background(),
                root: self.app.group(),
                inspector: self.app.inspector(),
                show_inspector: self.app.should_draw_inspector(),
                status: self.app.inspector_status(),
            },
        );
        self.backend.present(&Frame {
            pixels: canvas.frame(),
            width: canvas.width(),
            height: canvas.height(),
        })
    }

    /// Loops until a quit event or [`App::quit`], then stops the helpers.
    pub fn run(mut self) -> Result<()> {
        info!("Running {}", self.app.title());
        while !self.app.quitting() {
            self.iterate()?;
        }
        debug!("Run loop finished after {} ticks", self.clock.tick_count());
        self.app.modal_pool_mut().shutdown();
        Ok(())
    }

    fn sync_caption(&mut self) {
        if self.caption != self.app.title() {
            self.caption = self.app.title().to_string();
            self.backend.set_caption(&self.caption);
        }
    }
}
