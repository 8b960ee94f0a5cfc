//! Scancode sources.

use konsoli_hal::KeyboardPort;

/// Status register bit set while the controller holds an unread byte.
pub const STATUS_OUTPUT_FULL: u8 = 1 << 0;

/// Something that yields raw scancodes in arrival order.
pub trait ScancodeSource {
    /// Returns the next scancode, or `None` when nothing new is available.
    fn next_scancode(&mut self) -> Option<u8>;
}

/// Polls a PS/2 controller.
///
/// A byte is only read while the status register says one is waiting. Zero
/// bytes and a repeat of the previously accepted scancode are dropped; the
/// latter also swallows typematic repeats of a held key.
pub struct PolledKeyboard<P> {
    port: P,
    last_scancode: u8,
}

impl<P: KeyboardPort> PolledKeyboard<P> {
    /// Wraps a controller.
    pub fn new(port: P) -> Self {
        PolledKeyboard {
            port,
            last_scancode: 0,
        }
    }

    /// The wrapped controller.
    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: KeyboardPort> ScancodeSource for PolledKeyboard<P> {
    fn next_scancode(&mut self) -> Option<u8> {
        if self.port.status() & STATUS_OUTPUT_FULL == 0 {
            return None;
        }
        let scancode = self.port.read_data();
        if scancode == 0 || scancode == self.last_scancode {
            log::trace!("debounced scancode {:#04x}", scancode);
            return None;
        }
        self.last_scancode = scancode;
        Some(scancode)
    }
}

/// Replays a fixed byte sequence.
pub struct ScriptedScancodes<'a> {
    bytes: core::slice::Iter<'a, u8>,
}

impl<'a> ScriptedScancodes<'a> {
    /// Replays `bytes` front to back.
    pub fn new(bytes: &'a [u8]) -> Self {
        ScriptedScancodes {
            bytes: bytes.iter(),
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ScancodeSource for ScriptedScancodes<'_> {
    fn next_scancode(&mut self) -> Option<u8> {
        self.bytes.next().copied()
    }
}
