//! Boot banner and the panic screen.

use super::{log, Status};
use crate::config;
use crate::console::Console;
use core::fmt::{self, Write};
use konsoli_common::{Attribute, Color};
use konsoli_hal::{Delay, TextBuffer};

/// Print the Konsoli boot banner.
///
/// The subtitle is typed out one character at a time through `delay`.
pub fn print_banner<B: TextBuffer>(console: &mut Console<B>, delay: &mut impl Delay) {
    let saved = console.attribute();
    let accent = Attribute::new(Color::Cyan, saved.background());
    console.set_color(accent);

    rule(console, accent);
    let mut title = LineWriter::<40>::new();
    let _ = write!(
        title,
        "Welcome to {} v{}",
        config::KERNEL_NAME,
        config::KERNEL_VERSION
    );
    console.write_centered(title.as_str());

    let mut subtitle = LineWriter::<40>::new();
    let _ = write!(subtitle, "{} text-mode console", config::KERNEL_ARCH);
    let start = console.width().saturating_sub(subtitle.as_str().len()) / 2;
    let row = console.cursor().1;
    if console.set_cursor(start, row).is_ok() {
        console.typewriter(subtitle.as_str(), delay, config::BANNER_CHAR_DELAY);
    }
    console.put_char('\n');
    rule(console, accent);
    console.put_char('\n');
    console.set_color(saved);

    let mut line = LineWriter::<40>::new();
    let _ = write!(
        line,
        "Display: VGA text mode {}x{}",
        console.width(),
        console.height()
    );
    log(console, Status::Info, line.as_str());
    log(console, Status::Info, "Input: PS/2 keyboard, scancode set 1");
}

/// A full-width row of `=` on the cursor row, then a line break.
fn rule<B: TextBuffer>(console: &mut Console<B>, attribute: Attribute) {
    let row = console.cursor().1;
    let width = console.width();
    console.fill_area(0, row, width, 1, b'=', attribute);
    console.put_char('\n');
}

/// Paint the panic screen: white on red, the message, and a halt notice.
///
/// The caller halts afterwards.
pub fn print_panic<B: TextBuffer>(console: &mut Console<B>, message: &dyn fmt::Display) {
    console.set_colors(Color::White, Color::Red);
    console.clear();
    console.write("*** KERNEL PANIC ***\n\n");
    let _ = writeln!(
        console,
        "System: {} v{}",
        config::KERNEL_NAME,
        config::KERNEL_VERSION
    );
    let _ = writeln!(console, "Architecture: {}\n", config::KERNEL_ARCH);
    console.write("A critical error has occurred:\n");
    let _ = writeln!(console, "{}\n", message);
    console.write("System halted.\n");
}

/// Fixed-size formatting target for short log messages.
struct LineWriter<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> LineWriter<N> {
    fn new() -> Self {
        LineWriter {
            bytes: [0; N],
            len: 0,
        }
    }

    fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }
}

impl<const N: usize> Write for LineWriter<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::{NoDelay, SimulatedClock};
    use crate::framebuffer::MemoryBuffer;

    type Screen = MemoryBuffer<80, 25>;

    fn row_text(console: &Console<Screen>, y: usize) -> std::string::String {
        let row = console.framebuffer().buffer().row_chars(y);
        std::string::String::from_utf8_lossy(&row).trim_end().into()
    }

    #[test]
    fn test_banner_names_kernel_and_display() {
        let mut console = Console::new(Screen::new());
        let mut clock = SimulatedClock::new();
        print_banner(&mut console, &mut clock);

        assert_eq!(row_text(&console, 0), "=".repeat(80));
        assert_eq!(
            row_text(&console, 1),
            format!("{}Welcome to Konsoli v0.1.0", " ".repeat(27))
        );
        assert_eq!(
            row_text(&console, 2),
            format!("{}x86_64 text-mode console", " ".repeat(28))
        );
        assert_eq!(row_text(&console, 3), "=".repeat(80));
        assert_eq!(row_text(&console, 4), "");
        assert_eq!(row_text(&console, 5), "[INFO] Display: VGA text mode 80x25");
        assert_eq!(console.attribute(), Attribute::DEFAULT);

        let rule_cell = console.framebuffer().get(79, 3).unwrap();
        assert_eq!(rule_cell.attribute.foreground(), Color::Cyan);
    }

    #[test]
    fn test_banner_types_subtitle() {
        let mut console = Console::new(Screen::new());
        let mut clock = SimulatedClock::new();
        print_banner(&mut console, &mut clock);

        let typed = "x86_64 text-mode console".len();
        assert_eq!(clock.waits(), typed);
        assert_eq!(clock.elapsed(), config::BANNER_CHAR_DELAY * typed as u32);
    }

    #[test]
    fn test_banner_on_narrow_screen_keeps_left_edge() {
        let mut console = Console::new(MemoryBuffer::<20, 12>::new());
        print_banner(&mut console, &mut NoDelay);
        let row = console.framebuffer().buffer().row_chars(1);
        assert_eq!(&row[..10], b"Welcome to");
    }

    #[test]
    fn test_panic_screen_is_white_on_red() {
        let mut console = Console::new(Screen::new());
        print_panic(&mut console, &"heap exhausted");
        assert_eq!(row_text(&console, 0), "*** KERNEL PANIC ***");
        assert_eq!(row_text(&console, 2), "System: Konsoli v0.1.0");
        assert_eq!(row_text(&console, 6), "heap exhausted");
        let corner = console.framebuffer().get(79, 24).unwrap();
        assert_eq!(corner.attribute, Attribute::new(Color::White, Color::Red));
    }

    #[test]
    fn test_line_writer_rejects_overflow() {
        let mut line = LineWriter::<4>::new();
        assert!(write!(line, "abc").is_ok());
        assert!(write!(line, "de").is_err());
        assert_eq!(line.as_str(), "abc");
    }
}
