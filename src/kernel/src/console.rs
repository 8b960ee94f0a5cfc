//! Text console on top of a [`FrameBuffer`].
//!
//! Owns the cursor, the current attribute and scrolling. Every other component
//! writes to the screen through a [`Console`].

use crate::config;
use crate::framebuffer::FrameBuffer;
use core::fmt;
use core::time::Duration;
use konsoli_common::{Attribute, Cell, Color, ConsoleError};
use konsoli_hal::{Delay, TextBuffer};

/// Glyph drawn for characters the code page cannot show.
pub const PLACEHOLDER: u8 = 0xFE;

/// Cursor-tracking text console.
pub struct Console<B> {
    framebuffer: FrameBuffer<B>,
    /// Current column (0 to width-1).
    column: usize,
    /// Current row (0 to height-1).
    row: usize,
    /// Attribute for new characters.
    attribute: Attribute,
    /// Attribute restored by [`Console::init`].
    default_attribute: Attribute,
}

impl<B: TextBuffer> Console<B> {
    /// Creates a console with the configured default colors and initializes it.
    pub fn new(buffer: B) -> Self {
        Self::with_attribute(
            buffer,
            Attribute::new(config::DEFAULT_FOREGROUND, config::DEFAULT_BACKGROUND),
        )
    }

    /// Creates a console with `default_attribute` and initializes it.
    pub fn with_attribute(buffer: B, default_attribute: Attribute) -> Self {
        let mut console = Console {
            framebuffer: FrameBuffer::new(buffer),
            column: 0,
            row: 0,
            attribute: default_attribute,
            default_attribute,
        };
        console.init();
        console
    }

    /// Restores the default attribute, blanks the screen and homes the cursor.
    pub fn init(&mut self) {
        self.attribute = self.default_attribute;
        self.clear();
    }

    /// Width in columns.
    pub fn width(&self) -> usize {
        self.framebuffer.width()
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.framebuffer.height()
    }

    /// Sets the attribute for subsequent writes.
    pub fn set_color(&mut self, attribute: Attribute) {
        self.attribute = attribute;
    }

    /// Sets the foreground and background colors for subsequent writes.
    pub fn set_colors(&mut self, foreground: Color, background: Color) {
        self.attribute = Attribute::new(foreground, background);
    }

    /// Attribute used for subsequent writes.
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Writes a character at the cursor.
    ///
    /// Handles `\n`, `\r`, `\x08` and `\t`; anything outside printable ASCII is
    /// drawn as [`PLACEHOLDER`].
    pub fn put_char(&mut self, c: char) {
        let byte = match c {
            '\n' | '\r' | '\x08' | '\t' | ' '..='~' => c as u8,
            _ => PLACEHOLDER,
        };
        self.put_byte(byte);
    }

    /// Writes a raw code page byte at the cursor, interpreting control bytes.
    pub fn put_byte(&mut self, byte: u8) {
        let width = self.width();
        match byte {
            b'\n' => {
                self.column = 0;
                self.row += 1;
            }
            b'\r' => self.column = 0,
            0x08 => self.column = self.column.saturating_sub(1),
            b'\t' => {
                let next_stop = (self.column / config::TAB_WIDTH + 1) * config::TAB_WIDTH;
                self.column = next_stop.min(width - 1);
            }
            byte => {
                self.framebuffer
                    .put(self.column, self.row, byte, self.attribute);
                self.column += 1;
                if self.column >= width {
                    self.column = 0;
                    self.row += 1;
                }
            }
        }

        if self.row >= self.height() {
            self.scroll();
        }
        self.sync_cursor();
    }

    /// Scrolls the screen up by one row and homes the cursor on the last row.
    pub fn scroll(&mut self) {
        let height = self.height();
        for row in 1..height {
            self.framebuffer.copy_row(row, row - 1);
        }
        self.framebuffer
            .fill_row(height - 1, Cell::blank(self.attribute));
        self.row = height - 1;
        self.column = 0;
        self.sync_cursor();
    }

    /// Writes every character of `s`.
    pub fn write(&mut self, s: &str) {
        for c in s.chars() {
            self.put_char(c);
        }
    }

    /// Blanks the screen with the current attribute and homes the cursor.
    pub fn clear(&mut self) {
        let blank = Cell::blank(self.attribute);
        for row in 0..self.height() {
            self.framebuffer.fill_row(row, blank);
        }
        self.column = 0;
        self.row = 0;
        self.sync_cursor();
    }

    /// Blanks one row with the current attribute. The cursor does not move.
    pub fn clear_line(&mut self, row: usize) {
        self.framebuffer.fill_row(row, Cell::blank(self.attribute));
    }

    /// Cursor position as `(column, row)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.column, self.row)
    }

    /// Moves the cursor. Off-screen positions are rejected and leave it unchanged.
    pub fn set_cursor(&mut self, x: usize, y: usize) -> Result<(), ConsoleError> {
        if x >= self.width() || y >= self.height() {
            return Err(ConsoleError::CursorOutOfBounds { x, y });
        }
        self.column = x;
        self.row = y;
        self.sync_cursor();
        Ok(())
    }

    /// Writes one raw cell without moving the cursor.
    pub fn put_at(&mut self, x: usize, y: usize, byte: u8, attribute: Attribute) {
        self.framebuffer.put(x, y, byte, attribute);
    }

    /// Writes `text` starting at `(x, y)` without moving the cursor.
    ///
    /// No wrapping: whatever runs past the right edge is dropped.
    pub fn write_at(&mut self, text: &str, x: usize, y: usize, attribute: Attribute) {
        for (offset, byte) in text.bytes().enumerate() {
            self.framebuffer.put(x.saturating_add(offset), y, byte, attribute);
        }
    }

    /// Fills a rectangle with `byte`, clipped to the screen.
    pub fn fill_area(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        byte: u8,
        attribute: Attribute,
    ) {
        for row in y..y.saturating_add(height).min(self.height()) {
            for column in x..x.saturating_add(width).min(self.width()) {
                self.framebuffer.put(column, row, byte, attribute);
            }
        }
    }

    /// Writes `text` centered on the cursor row and moves to the next row.
    pub fn write_centered(&mut self, text: &str) {
        let start = self.width().saturating_sub(text.len()) / 2;
        self.write_at(text, start, self.row, self.attribute);
        self.put_byte(b'\n');
    }

    /// Writes `text` one character at a time, waiting `per_char` in between.
    pub fn typewriter(&mut self, text: &str, delay: &mut impl Delay, per_char: Duration) {
        for c in text.chars() {
            self.put_char(c);
            delay.wait(per_char);
        }
    }

    /// The underlying frame buffer.
    pub fn framebuffer(&self) -> &FrameBuffer<B> {
        &self.framebuffer
    }

    fn sync_cursor(&mut self) {
        self.framebuffer.move_cursor(self.column, self.row);
    }
}

impl<B: TextBuffer> fmt::Write for Console<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

impl<B: TextBuffer> konsoli_hal::Console for Console<B> {
    fn write_str(&mut self, s: &str) {
        self.write(s);
    }

    fn clear(&mut self) {
        Console::clear(self);
    }

    fn attribute(&self) -> u8 {
        self.attribute.as_byte()
    }

    fn set_attribute(&mut self, attribute: u8) {
        self.attribute = Attribute::from_byte(attribute);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::SimulatedClock;
    use crate::framebuffer::MemoryBuffer;
    use core::fmt::Write;
    use proptest::prelude::*;

    type Small = MemoryBuffer<10, 4>;

    fn console() -> Console<Small> {
        Console::new(Small::new())
    }

    fn row(console: &Console<Small>, y: usize) -> [u8; 10] {
        console.framebuffer().buffer().row_chars(y)
    }

    #[test]
    fn test_init_blanks_with_default_attribute() {
        let attr = Attribute::new(Color::Green, Color::Blue);
        let mut console = Console::with_attribute(Small::new(), attr);
        console.set_colors(Color::Red, Color::Black);
        console.write("xyz");
        console.init();

        assert_eq!(console.attribute(), attr);
        assert_eq!(console.cursor(), (0, 0));
        for y in 0..4 {
            for x in 0..10 {
                assert_eq!(console.framebuffer().get(x, y), Some(Cell::blank(attr)));
            }
        }
    }

    #[test]
    fn test_set_color_affects_later_writes_only() {
        let mut console = console();
        console.put_char('a');
        let red = Attribute::new(Color::LightRed, Color::Black);
        console.set_color(red);
        console.put_char('b');

        assert_eq!(console.framebuffer().get(0, 0).unwrap().attribute, Attribute::DEFAULT);
        assert_eq!(console.framebuffer().get(1, 0).unwrap().attribute, red);
    }

    #[test]
    fn test_control_characters() {
        let mut console = console();
        console.write("abc\r");
        assert_eq!(console.cursor(), (0, 0));

        console.write("ab\n");
        assert_eq!(console.cursor(), (0, 1));

        console.put_char('\x08');
        assert_eq!(console.cursor(), (0, 1), "backspace never crosses rows");

        console.write("xy\x08");
        assert_eq!(console.cursor(), (1, 1));
    }

    #[test]
    fn test_tab_stops_clamp_to_last_column() {
        let mut console = console();
        console.put_char('\t');
        assert_eq!(console.cursor(), (8, 0));
        console.put_char('\t');
        assert_eq!(console.cursor(), (9, 0));
    }

    #[test]
    fn test_wrap_to_next_row() {
        let mut console = console();
        console.write("0123456789A");
        assert_eq!(console.cursor(), (1, 1));
        assert_eq!(&row(&console, 0), b"0123456789");
        assert_eq!(row(&console, 1)[0], b'A');
    }

    #[test]
    fn test_newline_on_last_row_scrolls() {
        let mut console = console();
        console.write("r0\nr1\nr2\nr3\n");
        assert_eq!(console.cursor(), (0, 3));
        assert_eq!(&row(&console, 0)[..2], b"r1");
        assert_eq!(&row(&console, 2)[..2], b"r3");
        assert_eq!(&row(&console, 3), b"          ");
    }

    #[test]
    fn test_repeated_scrolls_blank_bottom_rows() {
        let mut console = console();
        console.write("a\nb\nc\nd");
        console.scroll();
        console.scroll();

        assert_eq!(row(&console, 0)[0], b'c');
        assert_eq!(row(&console, 1)[0], b'd');
        assert_eq!(&row(&console, 2), b"          ");
        assert_eq!(&row(&console, 3), b"          ");

        for _ in 0..5 {
            console.scroll();
        }
        for y in 0..4 {
            assert_eq!(&row(&console, y), b"          ");
        }
        assert_eq!(console.cursor(), (0, 3));
    }

    #[test]
    fn test_clear_keeps_attribute() {
        let mut console = console();
        let attr = Attribute::new(Color::White, Color::Red);
        console.set_color(attr);
        console.write("boom");
        console.clear();

        assert_eq!(console.attribute(), attr);
        assert_eq!(console.cursor(), (0, 0));
        assert_eq!(console.framebuffer().get(9, 3), Some(Cell::blank(attr)));
    }

    #[test]
    fn test_set_cursor_rejects_off_screen() {
        let mut console = console();
        assert_eq!(console.set_cursor(9, 3), Ok(()));
        assert_eq!(
            console.set_cursor(10, 0),
            Err(ConsoleError::CursorOutOfBounds { x: 10, y: 0 })
        );
        assert!(console.set_cursor(0, 4).is_err());
        assert_eq!(console.cursor(), (9, 3));
        assert_eq!(console.framebuffer().buffer().hardware_cursor(), (9, 3));
    }

    #[test]
    fn test_non_ascii_uses_placeholder() {
        let mut console = console();
        console.put_char('é');
        console.put_char('\x1b');
        assert_eq!(row(&console, 0)[..2], [PLACEHOLDER, PLACEHOLDER]);
    }

    #[test]
    fn test_positioned_helpers() {
        let mut console = console();
        let attr = Attribute::new(Color::Yellow, Color::Black);
        console.write_at("STATUS:OK", 5, 1, attr);
        assert_eq!(&row(&console, 1), b"     STATU");
        assert_eq!(console.cursor(), (0, 0));

        console.fill_area(8, 2, 5, 5, b'#', attr);
        assert_eq!(&row(&console, 3), b"        ##");

        console.clear_line(1);
        assert_eq!(&row(&console, 1), b"          ");
    }

    #[test]
    fn test_write_centered() {
        let mut console = console();
        console.write_centered("mid");
        assert_eq!(&row(&console, 0), b"   mid    ");
        assert_eq!(console.cursor(), (0, 1));
    }

    #[test]
    fn test_typewriter_waits_per_character() {
        let mut console = console();
        let mut clock = SimulatedClock::new();
        console.typewriter("hey", &mut clock, Duration::from_millis(20));
        assert_eq!(&row(&console, 0)[..3], b"hey");
        assert_eq!(clock.elapsed(), Duration::from_millis(60));
    }

    #[test]
    fn test_fmt_write_numbers() {
        let mut console = console();
        write!(console, "{:#06X}", 0x10u32).unwrap();
        assert_eq!(&row(&console, 0)[..6], b"0x0010");
    }

    proptest! {
        #[test]
        fn prop_printable_advances_one_column(
            x in 0usize..10,
            y in 0usize..4,
            c in proptest::char::range(' ', '~'),
        ) {
            let mut console = console();
            console.set_cursor(x, y).unwrap();
            console.put_char(c);

            let expected_row = if x == 9 { (y + 1).min(3) } else { y };
            prop_assert_eq!(console.cursor(), ((x + 1) % 10, expected_row));
        }
    }
}
