//! Command-line shell with input handling.
//!
//! Provides line editing on a fixed-capacity buffer and hands completed lines to
//! the command table.

use super::commands::{self, Command, CommandContext, BUILTIN_COMMANDS};
use super::TerminalConfig;
use crate::console::Console;
use crate::keyboard::{Decoder, ScancodeSource};
use konsoli_common::{Attribute, Key, KeyEvent, Modifiers};
use konsoli_hal::TextBuffer;

/// Maximum input line length, one VGA text row.
pub const MAX_LINE_LENGTH: usize = 80;

/// Pending input line.
///
/// Holds at most `capacity - 1` printable ASCII characters.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    bytes: [u8; MAX_LINE_LENGTH],
    len: usize,
    capacity: usize,
}

impl LineBuffer {
    /// An empty buffer of `capacity` slots, clamped to `1..=MAX_LINE_LENGTH`.
    pub fn with_capacity(capacity: usize) -> Self {
        LineBuffer {
            bytes: [0; MAX_LINE_LENGTH],
            len: 0,
            capacity: capacity.clamp(1, MAX_LINE_LENGTH),
        }
    }

    /// Appends `c`. Returns `false` and drops it when the buffer is full or `c`
    /// is not ASCII.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii() || self.len + 1 >= self.capacity {
            return false;
        }
        self.bytes[self.len] = c as u8;
        self.len += 1;
        true
    }

    /// Removes and returns the last character.
    pub fn pop(&mut self) -> Option<char> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(char::from(self.bytes[self.len]))
    }

    /// Drops every character.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Current contents.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    /// Number of buffered characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slots in the buffer; one is always kept free.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_capacity(MAX_LINE_LENGTH)
    }
}

/// Terminal shell: decoder, line editor and command table.
pub struct Terminal<'t> {
    /// Scancode decoder and modifier state.
    decoder: Decoder,
    /// Current input line.
    line: LineBuffer,
    /// Table searched on Enter.
    commands: &'t [Command],
    config: TerminalConfig,
}

impl Terminal<'static> {
    /// Create a terminal with the built-in commands and default configuration.
    pub fn new() -> Self {
        Self::with_commands(&BUILTIN_COMMANDS, TerminalConfig::DEFAULT)
    }
}

impl Default for Terminal<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Terminal<'t> {
    /// Create a terminal over a custom command table.
    pub fn with_commands(commands: &'t [Command], config: TerminalConfig) -> Self {
        Terminal {
            decoder: Decoder::new(),
            line: LineBuffer::with_capacity(config.line_capacity),
            commands,
            config,
        }
    }

    /// Pending input.
    pub fn input(&self) -> &str {
        self.line.as_str()
    }

    /// Modifier state seen by the decoder.
    pub fn modifiers(&self) -> Modifiers {
        self.decoder.modifiers()
    }

    /// Active configuration.
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Display the shell prompt.
    pub fn prompt<B: TextBuffer>(&self, console: &mut Console<B>) {
        if self.config.prompt.is_empty() {
            return;
        }
        let saved = console.attribute();
        console.set_color(Attribute::new(self.config.prompt_color, saved.background()));
        console.write(self.config.prompt);
        console.set_color(saved);
    }

    /// Drains `source`, handling every scancode it yields.
    ///
    /// Returns the number of bytes processed.
    pub fn pump<S, B>(&mut self, source: &mut S, console: &mut Console<B>) -> usize
    where
        S: ScancodeSource + ?Sized,
        B: TextBuffer,
    {
        let mut processed = 0;
        while let Some(scancode) = source.next_scancode() {
            self.handle_scancode(scancode, console);
            processed += 1;
        }
        processed
    }

    /// Decodes one scancode and applies the resulting event, if any.
    pub fn handle_scancode<B: TextBuffer>(
        &mut self,
        scancode: u8,
        console: &mut Console<B>,
    ) -> Option<KeyEvent> {
        let event = self.decoder.feed(scancode)?;
        self.handle_key(event, console);
        Some(event)
    }

    /// Handle a decoded key event.
    pub fn handle_key<B: TextBuffer>(&mut self, event: KeyEvent, console: &mut Console<B>) {
        match event {
            KeyEvent::Character(c) => self.handle_char(c, console),
            KeyEvent::Action(key) => self.handle_action(key, console),
            KeyEvent::ModifierChange(_) => {}
        }
    }

    fn handle_char<B: TextBuffer>(&mut self, c: char, console: &mut Console<B>) {
        if self.decoder.modifiers().ctrl() && c.is_ascii_alphabetic() {
            self.handle_control(c.to_ascii_lowercase(), console);
            return;
        }

        match c {
            '\n' | '\r' => self.submit(console),
            '\x08' | '\x7f' => {
                if self.line.pop().is_some() {
                    erase_previous_cell(console);
                }
            }
            ' '..='~' => {
                if self.line.push(c) {
                    console.put_char(c);
                } else {
                    log::trace!("line full, dropped {:?}", c);
                }
            }
            // Escape, tab and other control characters
            _ => {}
        }
    }

    fn handle_control<B: TextBuffer>(&mut self, c: char, console: &mut Console<B>) {
        match c {
            'l' => {
                console.clear();
                self.redraw(console);
            }
            'c' => {
                console.write("^C\n");
                self.line.clear();
                self.prompt(console);
            }
            _ => {}
        }
    }

    /// Print `[LABEL]` on its own line, then bring the prompt back.
    ///
    /// F2 clears the screen instead, like Ctrl+L.
    fn handle_action<B: TextBuffer>(&mut self, key: Key, console: &mut Console<B>) {
        if key == Key::F2 {
            console.clear();
            self.redraw(console);
            return;
        }
        if console.cursor().0 != 0 {
            console.put_char('\n');
        }
        let saved = console.attribute();
        console.set_color(Attribute::new(self.config.notice_color, saved.background()));
        console.put_char('[');
        console.write(key.label());
        console.put_char(']');
        console.set_color(saved);
        console.put_char('\n');
        self.redraw(console);
    }

    fn submit<B: TextBuffer>(&mut self, console: &mut Console<B>) {
        console.put_char('\n');
        if !self.line.is_empty() {
            let modifiers = self.decoder.modifiers();
            let mut context = CommandContext::new(console, modifiers, self.commands);
            commands::dispatch(self.commands, self.line.as_str(), &mut context);
        }
        self.line.clear();
        self.prompt(console);
    }

    fn redraw<B: TextBuffer>(&self, console: &mut Console<B>) {
        self.prompt(console);
        console.write(self.line.as_str());
    }
}

/// Steps the cursor back over the last echoed cell and blanks it.
///
/// At column 0 the previous cell is the last column of the row above.
fn erase_previous_cell<B: TextBuffer>(console: &mut Console<B>) {
    let (x, y) = match console.cursor() {
        (0, 0) => return,
        (0, row) => (console.width() - 1, row - 1),
        (column, row) => (column - 1, row),
    };
    if console.set_cursor(x, y).is_ok() {
        console.put_at(x, y, b' ', console.attribute());
    }
}
