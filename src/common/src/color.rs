//! Text mode colors and screen cells.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

impl Color {
    /// Returns the color encoded in the low four bits of `nibble`.
    pub const fn from_nibble(nibble: u8) -> Color {
        match nibble & 0x0F {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::Pink,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// Combined foreground and background color.
///
/// Bits 3:0 hold the foreground, bits 7:4 the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct Attribute(u8);

impl Attribute {
    /// White on black.
    pub const DEFAULT: Attribute = Attribute::new(Color::White, Color::Black);

    /// Creates a new attribute from foreground and background colors.
    pub const fn new(foreground: Color, background: Color) -> Attribute {
        Attribute((background as u8) << 4 | (foreground as u8))
    }

    /// Wraps an already packed attribute byte.
    pub const fn from_byte(byte: u8) -> Attribute {
        Attribute(byte)
    }

    /// Returns the packed byte.
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Foreground color.
    pub const fn foreground(self) -> Color {
        Color::from_nibble(self.0)
    }

    /// Background color.
    pub const fn background(self) -> Color {
        Color::from_nibble(self.0 >> 4)
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Attribute::DEFAULT
    }
}

impl From<Attribute> for u8 {
    fn from(attribute: Attribute) -> u8 {
        attribute.0
    }
}

/// A single character cell of the text surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    /// Code page 437 character code.
    pub character: u8,
    /// Colors the character is drawn with.
    pub attribute: Attribute,
}

impl Cell {
    /// Creates a cell.
    pub const fn new(character: u8, attribute: Attribute) -> Cell {
        Cell {
            character,
            attribute,
        }
    }

    /// A space drawn with `attribute`.
    pub const fn blank(attribute: Attribute) -> Cell {
        Cell::new(b' ', attribute)
    }

    /// Packs the cell as stored in VGA memory.
    pub const fn to_raw(self) -> u16 {
        (self.attribute.0 as u16) << 8 | self.character as u16
    }

    /// Unpacks a cell read from VGA memory.
    pub const fn from_raw(raw: u16) -> Cell {
        Cell {
            character: (raw & 0xFF) as u8,
            attribute: Attribute((raw >> 8) as u8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_packing() {
        let attr = Attribute::new(Color::Yellow, Color::Blue);
        assert_eq!(attr.as_byte(), 0x1E);
        assert_eq!(attr.foreground(), Color::Yellow);
        assert_eq!(attr.background(), Color::Blue);
        assert_eq!(Attribute::DEFAULT.as_byte(), 0x0F);
    }

    #[test]
    fn test_cell_layout() {
        let cell = Cell::new(b'A', Attribute::new(Color::Green, Color::Black));
        assert_eq!(cell.to_raw(), 0x0241);
        assert_eq!(Cell::from_raw(0x4F20), Cell::blank(Attribute::new(Color::White, Color::Red)));
    }
}
