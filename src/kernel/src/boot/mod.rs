//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets. Every line
//! is also forwarded to the `log` facade, so it shows up on serial.

pub mod banner;

use crate::console::Console;
use konsoli_common::{Attribute, Color};
use konsoli_hal::TextBuffer;

/// Column where messages start, after the status bracket and one space.
const MESSAGE_COLUMN: usize = 7;

/// Boot status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

impl Status {
    /// Bracketed label.
    pub const fn label(self) -> &'static str {
        match self {
            Status::Ok => "[ OK ]",
            Status::Fail => "[FAIL]",
            Status::Warn => "[WARN]",
            Status::Info => "[INFO]",
        }
    }

    /// Foreground of the label.
    pub const fn color(self) -> Color {
        match self {
            Status::Ok => Color::LightGreen,
            Status::Fail => Color::LightRed,
            Status::Warn => Color::Yellow,
            Status::Info => Color::LightCyan,
        }
    }
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log<B: TextBuffer>(console: &mut Console<B>, status: Status, message: &str) {
    print_status(console, status);
    console.put_char(' ');
    console.write(message);
    console.put_char('\n');
    forward(status, message);
}

/// Start a stage whose outcome is not known yet.
///
/// Prints the message after a blank bracket; [`log_end`] fills the bracket in.
pub fn log_start<B: TextBuffer>(console: &mut Console<B>, message: &str) {
    console.write("[    ] ");
    console.write(message);
}

/// Finish a stage started with [`log_start`].
pub fn log_end<B: TextBuffer>(console: &mut Console<B>, status: Status) {
    let (_, row) = console.cursor();
    let attribute = status_attribute(console, status);
    console.write_at(status.label(), 0, row, attribute);
    console.put_char('\n');
    log::info!("{} stage finished", status.label());
}

/// Log an indented detail line (for sub-items).
///
/// Format: `       Detail text` (aligned with message after status)
pub fn log_detail<B: TextBuffer>(console: &mut Console<B>, message: &str) {
    for _ in 0..MESSAGE_COLUMN {
        console.put_char(' ');
    }
    console.write(message);
    console.put_char('\n');
    log::debug!("  {}", message);
}

/// Log a section header.
///
/// Prints a blank line before the header for visual separation.
pub fn log_section<B: TextBuffer>(console: &mut Console<B>, name: &str) {
    let saved = console.attribute();
    console.put_char('\n');
    console.set_color(Attribute::new(Color::LightCyan, saved.background()));
    console.write("-- ");
    console.write(name);
    console.write(" --\n");
    console.set_color(saved);
}

fn print_status<B: TextBuffer>(console: &mut Console<B>, status: Status) {
    let saved = console.attribute();
    let attribute = status_attribute(console, status);
    console.set_color(attribute);
    console.write(status.label());
    console.set_color(saved);
}

fn status_attribute<B: TextBuffer>(console: &Console<B>, status: Status) -> Attribute {
    Attribute::new(status.color(), console.attribute().background())
}

fn forward(status: Status, message: &str) {
    match status {
        Status::Ok | Status::Info => log::info!("{}", message),
        Status::Warn => log::warn!("{}", message),
        Status::Fail => log::error!("{}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::MemoryBuffer;

    type Screen = MemoryBuffer<40, 6>;

    fn row_text(console: &Console<Screen>, y: usize) -> std::string::String {
        let row = console.framebuffer().buffer().row_chars(y);
        std::string::String::from_utf8_lossy(&row).trim_end().into()
    }

    #[test]
    fn test_status_line_layout() {
        let mut console = Console::new(Screen::new());
        log(&mut console, Status::Ok, "Console ready");
        log(&mut console, Status::Fail, "Keyboard missing");

        assert_eq!(row_text(&console, 0), "[ OK ] Console ready");
        assert_eq!(row_text(&console, 1), "[FAIL] Keyboard missing");
        let bracket = console.framebuffer().get(0, 1).unwrap();
        assert_eq!(bracket.attribute.foreground(), Color::LightRed);
        let text = console.framebuffer().get(7, 1).unwrap();
        assert_eq!(text.attribute, Attribute::DEFAULT);
    }

    #[test]
    fn test_start_end_fills_bracket() {
        let mut console = Console::new(Screen::new());
        log_start(&mut console, "Probing keyboard");
        log_end(&mut console, Status::Warn);
        log_detail(&mut console, "no controller answer");

        assert_eq!(row_text(&console, 0), "[WARN] Probing keyboard");
        assert_eq!(row_text(&console, 1), "       no controller answer");
        assert_eq!(console.cursor(), (0, 2));
    }

    #[test]
    fn test_section_header() {
        let mut console = Console::new(Screen::new());
        log_section(&mut console, "Input");
        assert_eq!(row_text(&console, 0), "");
        assert_eq!(row_text(&console, 1), "-- Input --");
        assert_eq!(console.attribute(), Attribute::DEFAULT);
    }
}
