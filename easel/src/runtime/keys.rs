//! Raw key codes and their translation to semantic key names.
//!
//! Backends report keys in one platform-neutral code space: printable keys
//! use their unshifted ASCII value (`b'a'`, `b'1'`, `b'/'`), the editing keys
//! use their ASCII control values, and everything else lives above
//! [`code::EXTENDED`].

use bitflags::bitflags;

pub type KeyCode = u32;

pub mod code {
    use super::KeyCode;

    pub const BACKSPACE: KeyCode = 8;
    pub const TAB: KeyCode = 9;
    pub const ENTER: KeyCode = 13;
    pub const ESCAPE: KeyCode = 27;
    pub const SPACE: KeyCode = 32;
    pub const DELETE: KeyCode = 127;

    pub const EXTENDED: KeyCode = 0x4000_0000;
    pub const RIGHT: KeyCode = EXTENDED | 0x4F;
    pub const LEFT: KeyCode = EXTENDED | 0x50;
    pub const DOWN: KeyCode = EXTENDED | 0x51;
    pub const UP: KeyCode = EXTENDED | 0x52;
    pub const LEFT_CTRL: KeyCode = EXTENDED | 0xE0;
    pub const LEFT_SHIFT: KeyCode = EXTENDED | 0xE1;
    pub const LEFT_ALT: KeyCode = EXTENDED | 0xE2;
    pub const RIGHT_CTRL: KeyCode = EXTENDED | 0xE4;
    pub const RIGHT_SHIFT: KeyCode = EXTENDED | 0xE5;
    pub const RIGHT_ALT: KeyCode = EXTENDED | 0xE6;
}

bitflags! {
    /// Modifier keys held when a key event was produced.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct KeyMod: u16 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

pub const CTRL: &str = "ctrl";
pub const SPACE: &str = "space";

// Exclusive bounds of the directly printable band.
const PRINTABLE_LOW: KeyCode = 33;
const PRINTABLE_HIGH: KeyCode = 127;

const NAMED_KEYS: [(KeyCode, &str); 12] = [
    (code::TAB, "tab"),
    (code::ENTER, "enter"),
    (code::BACKSPACE, "backspace"),
    (code::DELETE, "delete"),
    (code::ESCAPE, "escape"),
    (code::SPACE, SPACE),
    (code::RIGHT, "right"),
    (code::LEFT, "left"),
    (code::UP, "up"),
    (code::DOWN, "down"),
    (code::RIGHT_CTRL, CTRL),
    (code::LEFT_CTRL, CTRL),
];

fn shifted(c: char) -> char {
    match c {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '[' => '{',
        ']' => '}',
        '/' => '?',
        '=' => '+',
        '\\' => '|',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '-' => '_',
        ';' => ':',
        '`' => '~',
        other => other.to_ascii_uppercase(),
    }
}

/// Maps a raw key code plus modifiers to its semantic name, or `None` when
/// the key has no name and the event should be ignored.
pub fn translate(code: KeyCode, mods: KeyMod) -> Option<String> {
    if code > PRINTABLE_LOW && code < PRINTABLE_HIGH {
        let c = char::from_u32(code)?;
        let c = if mods.contains(KeyMod::SHIFT) { shifted(c) } else { c };
        return Some(c.to_string());
    }

    NAMED_KEYS
        .iter()
        .find(|(named, _)| *named == code)
        .map(|(_, name)| (*name).to_string())
}
