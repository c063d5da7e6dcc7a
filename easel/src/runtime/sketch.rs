use super::app::App;
use crate::core::config::AppConfig;
use crate::core::error::Result;

/// Static description of a registered program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SketchConfig {
    pub name: &'static str,
    pub display_name: &'static str,
    pub steps_per_second: f64,
    pub w: u32,
    pub h: u32,
}

impl SketchConfig {
    /// Layers this program's window settings over a base config.
    pub fn apply(&self, base: &AppConfig) -> AppConfig {
        AppConfig {
            title: Some(self.display_name.to_string()),
            width: self.w,
            height: self.h,
            steps_per_second: self.steps_per_second,
            ..base.clone()
        }
    }
}

/// A user program. Every callback is optional; errors end the run.
///
/// Position arguments are window coordinates in logical pixels.
pub trait Sketch {
    /// Called once before the first frame, with the drawing lock held.
    fn setup(&mut self, _app: &mut App) -> Result<()> {
        Ok(())
    }

    fn on_step(&mut self, _app: &mut App) -> Result<()> {
        Ok(())
    }

    fn on_key_press(&mut self, _app: &mut App, _key: &str) -> Result<()> {
        Ok(())
    }

    fn on_key_release(&mut self, _app: &mut App, _key: &str) -> Result<()> {
        Ok(())
    }

    /// Called after `on_step` while any key is held.
    fn on_key_hold(&mut self, _app: &mut App, _keys: &[String]) -> Result<()> {
        Ok(())
    }

    fn on_mouse_press(&mut self, _app: &mut App, _x: f32, _y: f32) -> Result<()> {
        Ok(())
    }

    fn on_mouse_release(
        &mut self,
        _app: &mut App,
        _x: f32,
        _y: f32,
    ) -> Result<()> {
        Ok(())
    }

    fn on_mouse_move(&mut self, _app: &mut App, _x: f32, _y: f32) -> Result<()> {
        Ok(())
    }

    fn on_mouse_drag(&mut self, _app: &mut App, _x: f32, _y: f32) -> Result<()> {
        Ok(())
    }
}

impl<S: Sketch + ?Sized> Sketch for Box<S> {
    fn setup(&mut self, app: &mut App) -> Result<()> {
        (**self).setup(app)
    }

    fn on_step(&mut self, app: &mut App) -> Result<()> {
        (**self).on_step(app)
    }

    fn on_key_press(&mut self, app: &mut App, key: &str) -> Result<()> {
        (**self).on_key_press(app, key)
    }

    fn on_key_release(&mut self, app: &mut App, key: &str) -> Result<()> {
        (**self).on_key_release(app, key)
    }

    fn on_key_hold(&mut self, app: &mut App, keys: &[String]) -> Result<()> {
        (**self).on_key_hold(app, keys)
    }

    fn on_mouse_press(&mut self, app: &mut App, x: f32, y: f32) -> Result<()> {
        (**self).on_mouse_press(app, x, y)
    }

    fn on_mouse_release(&mut self, app: &mut App, x: f32, y: f32) -> Result<()> {
        (**self).on_mouse_release(app, x, y)
    }

    fn on_mouse_move(&mut self, app: &mut App, x: f32, y: f32) -> Result<()> {
        (**self).on_mouse_move(app, x, y)
    }

    fn on_mouse_drag(&mut self, app: &mut App, x: f32, y: f32) -> Result<()> {
        (**self).on_mouse_drag(app, x, y)
    }
}
