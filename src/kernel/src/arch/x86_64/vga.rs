//! VGA text mode driver for x86_64.
//!
//! Provides the memory-mapped text buffer at 0xB8000 and the global console
//! used by `print!`, `println!` and the panic handler.

use crate::console::Console;
use core::fmt::{self, Write};
use core::ptr;
use konsoli_hal::TextBuffer;
use spin::Mutex;
use x86_64::instructions::port::Port;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// Number of rows in VGA text mode.
const BUFFER_HEIGHT: usize = 25;

/// Number of columns in VGA text mode.
const BUFFER_WIDTH: usize = 80;

/// CRTC index register.
const CRTC_INDEX: u16 = 0x3D4;

/// CRTC data register.
const CRTC_DATA: u16 = 0x3D5;

/// CRTC registers holding the cursor location, high and low byte.
const CURSOR_LOCATION_HIGH: u8 = 0x0E;
const CURSOR_LOCATION_LOW: u8 = 0x0F;

/// Global VGA console instance.
///
/// Uses a spinlock for safe concurrent access.
pub static CONSOLE: spin::Once<Mutex<Console<VgaTextBuffer>>> = spin::Once::new();

/// Initializes the global VGA console and clears the screen.
///
/// Idempotent - safe to call multiple times.
pub fn init() {
    console();
}

/// Returns the VGA console, initializing it if necessary.
pub fn console() -> &'static Mutex<Console<VgaTextBuffer>> {
    CONSOLE.call_once(|| Mutex::new(Console::new(VgaTextBuffer::new())))
}

/// The 80x25 hardware text buffer.
pub struct VgaTextBuffer {
    /// Pointer to the first cell.
    ///
    /// SAFETY: This pointer is valid for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 real/protected mode.
    cells: *mut u16,
    crtc_index: Port<u8>,
    crtc_data: Port<u8>,
}

// SAFETY: VgaTextBuffer only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
// Access is synchronized through the CONSOLE spinlock.
unsafe impl Send for VgaTextBuffer {}

impl VgaTextBuffer {
    /// Creates a handle on the VGA buffer.
    fn new() -> Self {
        VgaTextBuffer {
            // SAFETY: VGA_BUFFER_ADDR (0xB8000) is the standard VGA text buffer
            // address on x86 systems. This memory is always present and mapped
            // when running on x86 hardware or in QEMU.
            cells: VGA_BUFFER_ADDR as *mut u16,
            crtc_index: Port::new(CRTC_INDEX),
            crtc_data: Port::new(CRTC_DATA),
        }
    }

    fn write_crtc(&mut self, register: u8, value: u8) {
        // SAFETY: 0x3D4/0x3D5 are the color CRTC index/data ports. Writing the
        // cursor location registers has no effect beyond moving the cursor.
        unsafe {
            self.crtc_index.write(register);
            self.crtc_data.write(value);
        }
    }
}

impl TextBuffer for VgaTextBuffer {
    fn width(&self) -> usize {
        BUFFER_WIDTH
    }

    fn height(&self) -> usize {
        BUFFER_HEIGHT
    }

    fn store(&mut self, index: usize, cell: u16) {
        if index >= BUFFER_WIDTH * BUFFER_HEIGHT {
            return;
        }
        // SAFETY: index is inside the 80x25 cell array checked above. Using a
        // volatile 16-bit write because the buffer is memory-mapped I/O read by
        // the display hardware, and one store keeps character and attribute
        // together.
        unsafe {
            ptr::write_volatile(self.cells.add(index), cell);
        }
    }

    fn load(&self, index: usize) -> u16 {
        if index >= BUFFER_WIDTH * BUFFER_HEIGHT {
            return 0;
        }
        // SAFETY: index is inside the 80x25 cell array checked above.
        unsafe { ptr::read_volatile(self.cells.add(index)) }
    }

    fn move_cursor(&mut self, x: usize, y: usize) {
        let position = (y * BUFFER_WIDTH + x).min(BUFFER_WIDTH * BUFFER_HEIGHT - 1) as u16;
        let [low, high] = position.to_le_bytes();
        self.write_crtc(CURSOR_LOCATION_HIGH, high);
        self.write_crtc(CURSOR_LOCATION_LOW, low);
    }
}

/// Prints to the VGA console without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::vga::_print(format_args!($($arg)*))
    };
}

/// Prints to the VGA console with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let _ = console().lock().write_fmt(args);
}
