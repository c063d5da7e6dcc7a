//! Routes drained input events to callbacks and run-state changes.

use super::app::App;
use super::events::{InputEvent, MouseButton};
use super::keys::{self, KeyCode, KeyMod};
use super::sketch::Sketch;
use crate::core::error::Result;

pub fn dispatch(
    app: &mut App,
    sketch: &mut dyn Sketch,
    event: InputEvent,
) -> Result<()> {
    if let InputEvent::MouseMotion { x, y, .. } = event {
        app.inspector_mut().set_pointer(x, y);
    }

    match event {
        InputEvent::Quit => {
            app.quit();
            return Ok(());
        }
        InputEvent::FocusLost => {
            app.release_all_keys();
            return Ok(());
        }
        _ => {}
    }

    if !app.run_state().input_enabled() {
        return Ok(());
    }

    match event {
        InputEvent::MouseDown {
            x,
            y,
            button: MouseButton::Primary,
        } => sketch.on_mouse_press(app, x, y),
        InputEvent::MouseUp {
            x,
            y,
            button: MouseButton::Primary,
        } => sketch.on_mouse_release(app, x, y),
        InputEvent::MouseMotion { x, y, buttons } => {
            if buttons.is_empty() {
                sketch.on_mouse_move(app, x, y)
            } else if buttons.primary {
                sketch.on_mouse_drag(app, x, y)
            } else {
                Ok(())
            }
        }
        InputEvent::KeyDown { code, mods } => key_press(app, sketch, code, mods),
        InputEvent::KeyUp { code, mods } => key_release(app, sketch, code, mods),
        _ => Ok(()),
    }
}

pub fn key_press(
    app: &mut App,
    sketch: &mut dyn Sketch,
    code: KeyCode,
    mods: KeyMod,
) -> Result<()> {
    let Some(key) = keys::translate(code, mods) else {
        return Ok(());
    };

    if key == keys::CTRL {
        app.set_ctrl_down(true);
        return Ok(());
    }

    if key == keys::SPACE && mods.contains(KeyMod::SHIFT) {
        app.toggle_pause();
        return Ok(());
    }

    app.press_key(&key);
    sketch.on_key_press(app, &key)
}

pub fn key_release(
    app: &mut App,
    sketch: &mut dyn Sketch,
    code: KeyCode,
    mods: KeyMod,
) -> Result<()> {
    let Some(key) = keys::translate(code, mods) else {
        return Ok(());
    };

    if key == keys::CTRL {
        app.set_ctrl_down(false);
        return Ok(());
    }

    app.release_key(&key);
    sketch.on_key_release(app, &key)
}
