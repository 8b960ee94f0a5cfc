//! PS/2 Set 1 scancode decoding.
//!
//! # Architecture
//!
//! - `keymap`: scancode constants and the unshifted/shifted tables
//! - `source`: where scancodes come from (polled port, scripted bytes)
//! - `queue`: interrupt-fed scancode queue
//!
//! Decoding is a pure function over `(byte, KeyboardState)`; [`Decoder`] keeps
//! the state between bytes for callers that do not want to thread it through.

pub mod keymap;
pub mod queue;
pub mod source;

pub use queue::ScancodeQueue;
pub use source::{PolledKeyboard, ScancodeSource, ScriptedScancodes};

use konsoli_common::{Key, KeyEvent, Modifiers};

/// Where the decoder is inside a multi-byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Waiting for a fresh scancode.
    #[default]
    Normal,
    /// `0xE0` was seen; the next byte is an extended key.
    ExtendedPrefixSeen,
    /// Inside the Pause sequence; this many bytes remain to be swallowed.
    PauseSequence(u8),
}

/// Everything the decoder remembers between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardState {
    /// Held modifiers and lock toggles.
    pub modifiers: Modifiers,
    /// Prefix tracking.
    pub state: DecoderState,
}

impl KeyboardState {
    /// Whether the last byte was the extended prefix.
    pub fn extended_pending(&self) -> bool {
        self.state == DecoderState::ExtendedPrefixSeen
    }
}

/// Decodes one scancode byte.
///
/// Never fails: unknown or reserved codes yield no event and leave the
/// modifiers untouched. Every byte except the prefix itself clears the prefix.
/// The Pause key has no make/break pair and yields nothing.
pub fn decode(byte: u8, current: KeyboardState) -> (Option<KeyEvent>, KeyboardState) {
    if let DecoderState::PauseSequence(remaining) = current.state {
        let state = match remaining {
            0 | 1 => DecoderState::Normal,
            n => DecoderState::PauseSequence(n - 1),
        };
        return (None, KeyboardState { state, ..current });
    }

    if byte == keymap::PAUSE_PREFIX {
        let next = KeyboardState {
            state: DecoderState::PauseSequence(keymap::PAUSE_TAIL_LEN),
            ..current
        };
        return (None, next);
    }

    if byte == keymap::EXTENDED_PREFIX {
        let next = KeyboardState {
            state: DecoderState::ExtendedPrefixSeen,
            ..current
        };
        return (None, next);
    }

    let extended = current.extended_pending();
    let mut next = KeyboardState {
        modifiers: current.modifiers,
        state: DecoderState::Normal,
    };

    if byte & keymap::BREAK_BIT != 0 {
        let released = modifier_for(byte & !keymap::BREAK_BIT, extended);
        if released.is_empty() {
            return (None, next);
        }
        next.modifiers.remove(release_mask(released));
        return (Some(KeyEvent::ModifierChange(next.modifiers)), next);
    }

    let held = modifier_for(byte, extended);
    if !held.is_empty() {
        next.modifiers.insert(held);
        return (Some(KeyEvent::ModifierChange(next.modifiers)), next);
    }

    match byte {
        keymap::LEFT_SHIFT | keymap::RIGHT_SHIFT => {
            // E0 2A / E0 36 are fake shifts framing some navigation keys.
            return (None, next);
        }
        keymap::CAPS_LOCK if !extended => {
            next.modifiers.toggle(Modifiers::CAPS_LOCK);
            return (Some(KeyEvent::ModifierChange(next.modifiers)), next);
        }
        keymap::NUM_LOCK if !extended => {
            next.modifiers.toggle(Modifiers::NUM_LOCK);
            return (Some(KeyEvent::ModifierChange(next.modifiers)), next);
        }
        _ => {}
    }

    if let Some(key) = function_key(byte) {
        return (Some(KeyEvent::Action(key)), next);
    }

    if extended {
        let event = match byte {
            keymap::ENTER => Some(KeyEvent::Character('\n')),
            keymap::KEYPAD_SLASH => Some(KeyEvent::Character('/')),
            code => navigation_key(code).map(KeyEvent::Action),
        };
        if event.is_none() {
            log::trace!("unmapped extended scancode {:#04x}", byte);
        }
        return (event, next);
    }

    if !current.modifiers.num_lock() && (keymap::HOME..=keymap::DELETE).contains(&byte) {
        let event = navigation_key(byte).map(KeyEvent::Action);
        if event.is_some() || byte == keymap::KEYPAD_5 {
            return (event, next);
        }
    }

    let event = keymap::lookup(byte, current.modifiers.shift()).map(|mut c| {
        if current.modifiers.caps_lock() && c.is_ascii_alphabetic() {
            c ^= 0x20;
        }
        KeyEvent::Character(char::from(c))
    });
    if event.is_none() {
        log::trace!("unmapped scancode {:#04x}", byte);
    }
    (event, next)
}

/// Modifier flags set by make code `code`.
fn modifier_for(code: u8, extended: bool) -> Modifiers {
    match (code, extended) {
        (keymap::LEFT_SHIFT | keymap::RIGHT_SHIFT, false) => Modifiers::SHIFT,
        (keymap::CTRL, false) => Modifiers::CTRL,
        (keymap::CTRL, true) => Modifiers::CTRL | Modifiers::RIGHT_CTRL,
        (keymap::ALT, false) => Modifiers::ALT,
        (keymap::ALT, true) => Modifiers::ALT | Modifiers::RIGHT_ALT,
        _ => Modifiers::empty(),
    }
}

/// Flags cleared when the key behind `released` goes up.
///
/// Either ctrl/alt key releases the side marker too.
fn release_mask(released: Modifiers) -> Modifiers {
    if released.contains(Modifiers::CTRL) {
        Modifiers::CTRL | Modifiers::RIGHT_CTRL
    } else if released.contains(Modifiers::ALT) {
        Modifiers::ALT | Modifiers::RIGHT_ALT
    } else {
        released
    }
}

fn function_key(code: u8) -> Option<Key> {
    const KEYS: [Key; 10] = [
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
    ];
    match code {
        keymap::F1..=keymap::F10 => Some(KEYS[usize::from(code - keymap::F1)]),
        keymap::F11 => Some(Key::F11),
        keymap::F12 => Some(Key::F12),
        _ => None,
    }
}

fn navigation_key(code: u8) -> Option<Key> {
    match code {
        keymap::UP => Some(Key::ArrowUp),
        keymap::DOWN => Some(Key::ArrowDown),
        keymap::LEFT => Some(Key::ArrowLeft),
        keymap::RIGHT => Some(Key::ArrowRight),
        keymap::HOME => Some(Key::Home),
        keymap::END => Some(Key::End),
        keymap::INSERT => Some(Key::Insert),
        keymap::DELETE => Some(Key::Delete),
        keymap::PAGE_UP => Some(Key::PageUp),
        keymap::PAGE_DOWN => Some(Key::PageDown),
        _ => None,
    }
}

/// Stateful wrapper around [`decode`].
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: KeyboardState,
}

impl Decoder {
    /// A decoder with nothing held and num lock on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte, returning the event it completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<KeyEvent> {
        let (event, next) = decode(byte, self.state);
        self.state = next;
        event
    }

    /// Current modifier set.
    pub fn modifiers(&self) -> Modifiers {
        self.state.modifiers
    }

    /// Full decoder state.
    pub fn state(&self) -> KeyboardState {
        self.state
    }
}
