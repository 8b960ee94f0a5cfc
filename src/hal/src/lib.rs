//! Konsoli Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines traits that abstract away platform-specific hardware details,
//! so the console and input core can run against real VGA memory and PS/2 ports
//! or against in-memory stand-ins on a hosted build.

#![no_std]

use core::time::Duration;

/// Trait for a memory-mapped text surface made of 16-bit cells.
///
/// Cells are addressed by linear index `y * width + x`. Callers are expected to
/// stay inside `width * height`; implementations may ignore indices past the end.
pub trait TextBuffer {
    /// Number of columns.
    fn width(&self) -> usize;
    /// Number of rows.
    fn height(&self) -> usize;
    /// Stores one packed cell (low byte character, high byte attribute).
    fn store(&mut self, index: usize, cell: u16);
    /// Loads one packed cell.
    fn load(&self, index: usize) -> u16;
    /// Moves the hardware cursor, if the surface has one.
    fn move_cursor(&mut self, _x: usize, _y: usize) {}
}

/// Trait for a text-based console output.
pub trait Console {
    /// Writes a string to the console.
    fn write_str(&mut self, s: &str);
    /// Clears the console screen.
    fn clear(&mut self);
    /// Returns the packed attribute used for subsequent writes.
    fn attribute(&self) -> u8;
    /// Sets the packed attribute used for subsequent writes.
    fn set_attribute(&mut self, attribute: u8);
}

/// Trait for a serial port or similar character-based communication channel.
pub trait Serial {
    /// Writes a single byte to the serial port.
    fn write_byte(&mut self, byte: u8);
    /// Reads a single byte from the serial port, if available.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Trait for a PS/2 style keyboard controller.
pub trait KeyboardPort {
    /// Reads the controller status register. Bit 0 set means a byte is waiting.
    fn status(&mut self) -> u8;
    /// Reads the controller data register.
    fn read_data(&mut self) -> u8;
}

/// Trait for a blocking delay.
///
/// Bare-metal builds spin; hosted builds substitute a no-op or a simulated clock.
pub trait Delay {
    /// Blocks for roughly `duration`.
    fn wait(&mut self, duration: Duration);
}
