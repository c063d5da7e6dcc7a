use super::keys::{KeyCode, KeyMod};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

/// Buttons held during a pointer motion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MouseButtons {
    pub primary: bool,
    pub middle: bool,
    pub secondary: bool,
}

impl MouseButtons {
    pub const NONE: Self = Self {
        primary: false,
        middle: false,
        secondary: false,
    };

    pub const PRIMARY: Self = Self {
        primary: true,
        middle: false,
        secondary: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.primary && !self.middle && !self.secondary
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Primary => self.primary = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Secondary => self.secondary = down,
            MouseButton::Other(_) => {}
        }
    }
}

/// Structured input drained from a backend, positions in logical pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown {
        x: f32,
        y: f32,
        button: MouseButton,
    },
    MouseUp {
        x: f32,
        y: f32,
        button: MouseButton,
    },
    MouseMotion {
        x: f32,
        y: f32,
        buttons: MouseButtons,
    },
    KeyDown {
        code: KeyCode,
        mods: KeyMod,
    },
    KeyUp {
        code: KeyCode,
        mods: KeyMod,
    },
    FocusLost,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_track_press_and_release() {
        let mut buttons = MouseButtons::default();
        assert!(buttons.is_empty());

        buttons.set(MouseButton::Primary, true);
        assert_eq!(buttons, MouseButtons::PRIMARY);

        buttons.set(MouseButton::Other(7), true);
        buttons.set(MouseButton::Primary, false);
        assert!(buttons.is_empty());
    }
}
