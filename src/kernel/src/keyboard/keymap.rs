//! PS/2 Set 1 scancodes and the US layout lookup tables.

#![allow(missing_docs)]

/// Prefix byte announcing a two-byte extended scancode.
pub const EXTENDED_PREFIX: u8 = 0xE0;

/// Prefix byte of the Pause key's `E1 1D 45 E1 9D C5` sequence.
pub const PAUSE_PREFIX: u8 = 0xE1;

/// Bytes that follow [`PAUSE_PREFIX`] in the Pause sequence.
pub const PAUSE_TAIL_LEN: u8 = 5;

/// Bit that turns a make code into its break code.
pub const BREAK_BIT: u8 = 0x80;

pub const ESCAPE: u8 = 0x01;
pub const BACKSPACE: u8 = 0x0E;
pub const TAB: u8 = 0x0F;
pub const ENTER: u8 = 0x1C;
pub const CTRL: u8 = 0x1D;
pub const LEFT_SHIFT: u8 = 0x2A;
pub const RIGHT_SHIFT: u8 = 0x36;
pub const ALT: u8 = 0x38;
pub const SPACE: u8 = 0x39;
pub const CAPS_LOCK: u8 = 0x3A;
pub const F1: u8 = 0x3B;
pub const F10: u8 = 0x44;
pub const NUM_LOCK: u8 = 0x45;
pub const SCROLL_LOCK: u8 = 0x46;
pub const F11: u8 = 0x57;
pub const F12: u8 = 0x58;

// Navigation cluster (after 0xE0) and the keypad keys sharing the same codes.
pub const HOME: u8 = 0x47;
pub const UP: u8 = 0x48;
pub const PAGE_UP: u8 = 0x49;
pub const KEYPAD_MINUS: u8 = 0x4A;
pub const LEFT: u8 = 0x4B;
pub const KEYPAD_5: u8 = 0x4C;
pub const RIGHT: u8 = 0x4D;
pub const KEYPAD_PLUS: u8 = 0x4E;
pub const END: u8 = 0x4F;
pub const DOWN: u8 = 0x50;
pub const PAGE_DOWN: u8 = 0x51;
pub const INSERT: u8 = 0x52;
pub const DELETE: u8 = 0x53;

/// Keypad slash, sent as `E0 35`.
pub const KEYPAD_SLASH: u8 = 0x35;

/// Characters without shift. `0` means the key prints nothing.
pub static UNSHIFTED: [u8; 128] = [
    0, 0x1B, b'1', b'2', b'3', b'4', b'5', b'6', // 0x00-0x07
    b'7', b'8', b'9', b'0', b'-', b'=', 0x08, b'\t', // 0x08-0x0F
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i', // 0x10-0x17
    b'o', b'p', b'[', b']', b'\n', 0, b'a', b's', // 0x18-0x1F
    b'd', b'f', b'g', b'h', b'j', b'k', b'l', b';', // 0x20-0x27
    b'\'', b'`', 0, b'\\', b'z', b'x', b'c', b'v', // 0x28-0x2F
    b'b', b'n', b'm', b',', b'.', b'/', 0, b'*', // 0x30-0x37
    0, b' ', 0, 0, 0, 0, 0, 0, // 0x38-0x3F
    0, 0, 0, 0, 0, 0, 0, b'7', // 0x40-0x47
    b'8', b'9', b'-', b'4', b'5', b'6', b'+', b'1', // 0x48-0x4F
    b'2', b'3', b'0', b'.', 0, 0, 0, 0, // 0x50-0x57
    0, 0, 0, 0, 0, 0, 0, 0, // 0x58-0x5F
    0, 0, 0, 0, 0, 0, 0, 0, // 0x60-0x67
    0, 0, 0, 0, 0, 0, 0, 0, // 0x68-0x6F
    0, 0, 0, 0, 0, 0, 0, 0, // 0x70-0x77
    0, 0, 0, 0, 0, 0, 0, 0, // 0x78-0x7F
];

/// Characters with shift held.
pub static SHIFTED: [u8; 128] = [
    0, 0x1B, b'!', b'@', b'#', b'$', b'%', b'^', // 0x00-0x07
    b'&', b'*', b'(', b')', b'_', b'+', 0x08, b'\t', // 0x08-0x0F
    b'Q', b'W', b'E', b'R', b'T', b'Y', b'U', b'I', // 0x10-0x17
    b'O', b'P', b'{', b'}', b'\n', 0, b'A', b'S', // 0x18-0x1F
    b'D', b'F', b'G', b'H', b'J', b'K', b'L', b':', // 0x20-0x27
    b'"', b'~', 0, b'|', b'Z', b'X', b'C', b'V', // 0x28-0x2F
    b'B', b'N', b'M', b'<', b'>', b'?', 0, b'*', // 0x30-0x37
    0, b' ', 0, 0, 0, 0, 0, 0, // 0x38-0x3F
    0, 0, 0, 0, 0, 0, 0, b'7', // 0x40-0x47
    b'8', b'9', b'-', b'4', b'5', b'6', b'+', b'1', // 0x48-0x4F
    b'2', b'3', b'0', b'.', 0, 0, 0, 0, // 0x50-0x57
    0, 0, 0, 0, 0, 0, 0, 0, // 0x58-0x5F
    0, 0, 0, 0, 0, 0, 0, 0, // 0x60-0x67
    0, 0, 0, 0, 0, 0, 0, 0, // 0x68-0x6F
    0, 0, 0, 0, 0, 0, 0, 0, // 0x70-0x77
    0, 0, 0, 0, 0, 0, 0, 0, // 0x78-0x7F
];

/// Character for `make_code` from the table selected by `shifted`.
pub fn lookup(make_code: u8, shifted: bool) -> Option<u8> {
    let table = if shifted { &SHIFTED } else { &UNSHIFTED };
    match table.get(usize::from(make_code)) {
        Some(0) | None => None,
        Some(&byte) => Some(byte),
    }
}
