//! Logical keyboard events produced by the scancode decoder.

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier and lock keys currently in effect.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Modifiers: u8 {
        const SHIFT      = 1 << 0;
        const CTRL       = 1 << 1;
        const ALT        = 1 << 2;
        const CAPS_LOCK  = 1 << 3;
        const NUM_LOCK   = 1 << 4;
        const RIGHT_CTRL = 1 << 5; // set together with CTRL
        const RIGHT_ALT  = 1 << 6; // set together with ALT
    }
}

impl Modifiers {
    /// Whether shift is held.
    pub const fn shift(self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    /// Whether either ctrl key is held.
    pub const fn ctrl(self) -> bool {
        self.contains(Modifiers::CTRL)
    }

    /// Whether either alt key is held.
    pub const fn alt(self) -> bool {
        self.contains(Modifiers::ALT)
    }

    /// Whether caps lock is on.
    pub const fn caps_lock(self) -> bool {
        self.contains(Modifiers::CAPS_LOCK)
    }

    /// Whether num lock is on.
    pub const fn num_lock(self) -> bool {
        self.contains(Modifiers::NUM_LOCK)
    }
}

impl Default for Modifiers {
    /// Num lock on, everything else released.
    fn default() -> Self {
        Modifiers::NUM_LOCK
    }
}

/// Non-printable keys reported as actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
}

impl Key {
    /// Short upper-case name shown when the key is pressed at the prompt.
    pub const fn label(self) -> &'static str {
        match self {
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::ArrowUp => "UP",
            Key::ArrowDown => "DOWN",
            Key::ArrowLeft => "LEFT",
            Key::ArrowRight => "RIGHT",
            Key::Home => "HOME",
            Key::End => "END",
            Key::Insert => "INSERT",
            Key::Delete => "DELETE",
            Key::PageUp => "PGUP",
            Key::PageDown => "PGDN",
        }
    }
}

/// A decoded key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeyEvent {
    /// A character, including the control characters `\n`, `\t`, `\x08` and `\x1b`.
    Character(char),
    /// A non-printable key.
    Action(Key),
    /// A modifier or lock key changed; carries the resulting set.
    ModifierChange(Modifiers),
}
