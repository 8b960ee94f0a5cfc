//! Konsoli Kernel
//!
//! A bare-metal text-mode console for x86_64: VGA text output, PS/2 keyboard
//! input and a small command shell.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `framebuffer`: bounds-checked cell access over a [`konsoli_hal::TextBuffer`]
//! - `console`: cursor, colors, wrapping and scrolling
//! - `keyboard`: PS/2 Set 1 scancode decoding and scancode sources
//! - `terminal`: line editor and command dispatcher
//! - `boot`: banner and status-line boot logging
//! - `delay`: busy-wait delays behind [`konsoli_hal::Delay`]
//! - `arch`: platform-specific code (VGA, PS/2 ports, serial, interrupts)
//!
//! Everything outside `arch`, `allocator` and the serial logger is plain
//! `no_std` code that also builds and tests on a hosted target.
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_os = "none", feature(abi_x86_interrupt))]
#![warn(missing_docs)]

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod allocator;
pub mod arch;
pub mod boot;
pub mod config;
pub mod console;
pub mod delay;
pub mod framebuffer;
pub mod keyboard;
pub mod logger;
pub mod terminal;

pub use console::Console;
pub use framebuffer::{FrameBuffer, MemoryBuffer};
pub use keyboard::{decode, Decoder, KeyboardState};
pub use terminal::{Terminal, TerminalConfig};

/// Initializes core kernel subsystems.
///
/// Called early in the boot process to set up the heap, serial logging, the
/// VGA console and exception handling.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub fn init() {
    allocator::init_heap();
    arch::x86_64::init();
    logger::init(config::LOG_LEVEL);
    log::info!("{} v{} starting", config::KERNEL_NAME, config::KERNEL_VERSION);
}
