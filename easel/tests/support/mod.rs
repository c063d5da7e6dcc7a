#![allow(dead_code)]

use easel::backend::HeadlessBackend;
use easel::core::config::AppConfig;
use easel::prelude::*;
use easel::runtime::events::{InputEvent, MouseButton, MouseButtons};
use easel::runtime::keys::{KeyCode, KeyMod};

/// Appends one line per callback so tests can assert on call order.
#[derive(Default)]
pub struct RecordingSketch {
    pub calls: Vec<String>,
    pub screenshot_on_step: Option<std::path::PathBuf>,
}

impl Sketch for RecordingSketch {
    fn setup(&mut self, _app: &mut App) -> Result<()> {
        self.calls.push("setup".to_string());
        Ok(())
    }

    fn on_step(&mut self, app: &mut App) -> Result<()> {
        self.calls.push("step".to_string());
        if let Some(path) = self.screenshot_on_step.take() {
            app.get_screenshot(path)?;
        }
        Ok(())
    }

    fn on_key_press(&mut self, _app: &mut App, key: &str) -> Result<()> {
        self.calls.push(format!("press {}", key));
        Ok(())
    }

    fn on_key_release(&mut self, _app: &mut App, key: &str) -> Result<()> {
        self.calls.push(format!("release {}", key));
        Ok(())
    }

    fn on_key_hold(&mut self, _app: &mut App, keys: &[String]) -> Result<()> {
        self.calls.push(format!("hold {}", keys.join(",")));
        Ok(())
    }

    fn on_mouse_press(&mut self, _app: &mut App, x: f32, y: f32) -> Result<()> {
        self.calls.push(format!("mouse press {} {}", x, y));
        Ok(())
    }

    fn on_mouse_release(&mut self, _app: &mut App, x: f32, y: f32) -> Result<()> {
        self.calls.push(format!("mouse release {} {}", x, y));
        Ok(())
    }

    fn on_mouse_move(&mut self, _app: &mut App, x: f32, y: f32) -> Result<()> {
        self.calls.push(format!("mouse move {} {}", x, y));
        Ok(())
    }

    fn on_mouse_drag(&mut self, _app: &mut App, x: f32, y: f32) -> Result<()> {
        self.calls.push(format!("mouse drag {} {}", x, y));
        Ok(())
    }
}

impl RecordingSketch {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }

    /// Calls other than `setup` and `step`.
    pub fn input_calls(&self) -> Vec<&str> {
        self.calls
            .iter()
            .map(String::as_str)
            .filter(|c| *c != "setup" && *c != "step")
            .collect()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        title: Some("Test".to_string()),
        width: 40,
        height: 30,
        modal_pool_size: 0,
        ..AppConfig::default()
    }
}

pub fn runner() -> Runner<HeadlessBackend, RecordingSketch> {
    runner_with(&test_config(), RecordingSketch::default())
}

pub fn runner_with(
    config: &AppConfig,
    sketch: RecordingSketch,
) -> Runner<HeadlessBackend, RecordingSketch> {
    let app = App::new(config).expect("app");
    Runner::new(app, HeadlessBackend::new(), sketch)
}

pub fn key_down(code: KeyCode, mods: KeyMod) -> InputEvent {
    InputEvent::KeyDown { code, mods }
}

pub fn key_up(code: KeyCode, mods: KeyMod) -> InputEvent {
    InputEvent::KeyUp { code, mods }
}

pub fn letter(c: char) -> KeyCode {
    c as KeyCode
}

pub fn mouse_down(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseDown {
        x,
        y,
        button: MouseButton::Primary,
    }
}

pub fn mouse_up(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseUp {
        x,
        y,
        button: MouseButton::Primary,
    }
}

pub fn motion(x: f32, y: f32, buttons: MouseButtons) -> InputEvent {
    InputEvent::MouseMotion { x, y, buttons }
}
