//! Serial port driver for x86_64.
//!
//! Provides serial output via COM1 (0x3F8) for debugging and logging.

use core::fmt::{self, Write};
use spin::Mutex;
use uart_16550::SerialPort;
use x86_64::instructions::port::PortReadOnly;

/// COM1 I/O port address.
const COM1_PORT: u16 = 0x3F8;

/// Line status register offset.
const LINE_STATUS: u16 = 5;

/// Line status bit set while a received byte is waiting.
const DATA_READY: u8 = 1;

/// Global serial port instance, lazily initialized.
///
/// Uses a spinlock for safe concurrent access. Interrupt handlers must not
/// take it; the keyboard handler only touches the scancode queue.
pub static SERIAL: spin::Once<Mutex<SerialPort>> = spin::Once::new();

/// Initializes the global serial port.
///
/// This function is idempotent - calling it multiple times has no effect
/// after the first successful initialization.
pub fn init() {
    get_serial();
}

/// Returns a reference to the serial port, initializing if necessary.
fn get_serial() -> &'static Mutex<SerialPort> {
    SERIAL.call_once(|| {
        // SAFETY: COM1_PORT (0x3F8) is a well-known x86 serial port address.
        // We're running in kernel mode with full I/O port access.
        // The uart_16550 crate handles the port initialization sequence correctly.
        let mut serial = unsafe { SerialPort::new(COM1_PORT) };
        serial.init();
        Mutex::new(serial)
    })
}

/// Prints to the serial port without a newline.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the serial port with a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let _ = get_serial().lock().write_fmt(args);
}

/// A wrapper to implement HAL traits for the serial port.
pub struct SerialWrapper;

impl konsoli_hal::Serial for SerialWrapper {
    fn write_byte(&mut self, byte: u8) {
        get_serial().lock().send(byte);
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut line_status = PortReadOnly::<u8>::new(COM1_PORT + LINE_STATUS);
        // SAFETY: reading the 16550 line status register has no side effects.
        let status = unsafe { line_status.read() };
        if status & DATA_READY != 0 {
            Some(get_serial().lock().receive())
        } else {
            None
        }
    }
}
