//! x86_64 architecture support.
//!
//! Provides VGA text mode output, the PS/2 keyboard controller, serial port
//! communication and interrupt handling for x86_64 platforms.

pub mod interrupts;
pub mod pic;
pub mod ps2;
pub mod serial;
pub mod vga;

pub use ps2::Ps2Port;
pub use serial::{SerialWrapper, SERIAL};
pub use vga::{VgaTextBuffer, CONSOLE};

/// Brings up serial, the VGA console and the exception handlers.
///
/// Hardware interrupts stay disabled; see [`interrupts::enable_keyboard_irq`].
pub fn init() {
    serial::init();
    vga::init();
    interrupts::init_idt();
}

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts until the next interrupt unless `has_work` reports pending work.
///
/// The check runs with interrupts disabled, so an interrupt that arrives
/// between the check and the halt still wakes the CPU.
pub fn sleep_unless(has_work: impl FnOnce() -> bool) {
    use x86_64::instructions::interrupts;

    interrupts::disable();
    if has_work() {
        interrupts::enable();
    } else {
        interrupts::enable_and_hlt();
    }
}

/// Halts the CPU in an infinite loop with interrupts disabled.
///
/// Used after unrecoverable errors (panics).
pub fn halt_loop() -> ! {
    x86_64::instructions::interrupts::disable();
    loop {
        hlt();
    }
}
