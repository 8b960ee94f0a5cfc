//! PS/2 keyboard controller ports.

use konsoli_hal::KeyboardPort;
use x86_64::instructions::port::{Port, PortReadOnly};

/// Data port: the scancode byte.
pub const DATA_PORT: u16 = 0x60;

/// Status port: bit 0 set while the output buffer holds a byte.
pub const STATUS_PORT: u16 = 0x64;

/// The legacy 8042 controller.
pub struct Ps2Port {
    data: Port<u8>,
    status: PortReadOnly<u8>,
}

impl Ps2Port {
    /// Handle on the controller ports.
    pub const fn new() -> Self {
        Ps2Port {
            data: Port::new(DATA_PORT),
            status: PortReadOnly::new(STATUS_PORT),
        }
    }
}

impl Default for Ps2Port {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardPort for Ps2Port {
    fn status(&mut self) -> u8 {
        // SAFETY: reading the 8042 status register has no side effects.
        unsafe { self.status.read() }
    }

    fn read_data(&mut self) -> u8 {
        // SAFETY: 0x60 is the 8042 data port; reading it pops the output buffer,
        // which is what every caller wants.
        unsafe { self.data.read() }
    }
}
