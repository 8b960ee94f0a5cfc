//! `log` backend writing to a serial line.
//!
//! Records are written as `[LEVEL] target: message`, one per line. On bare
//! metal [`init`] installs a logger over COM1; hosted builds install nothing
//! and every `log` macro is a no-op.

use core::fmt::{self, Write};
use konsoli_hal::Serial;

/// `fmt::Write` adapter over a [`Serial`] line.
pub struct SerialWriter<S> {
    serial: S,
}

impl<S: Serial> SerialWriter<S> {
    /// Wraps a serial line.
    pub fn new(serial: S) -> Self {
        SerialWriter { serial }
    }

    /// Gives the line back.
    pub fn into_inner(self) -> S {
        self.serial
    }
}

impl<S: Serial> Write for SerialWriter<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.serial.write_byte(b'\r');
            }
            self.serial.write_byte(byte);
        }
        Ok(())
    }
}

/// Writes one record line.
pub fn write_record(out: &mut impl Write, record: &log::Record<'_>) -> fmt::Result {
    writeln!(
        out,
        "[{:<5}] {}: {}",
        record.level(),
        record.target(),
        record.args()
    )
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod kernel {
    use super::{write_record, SerialWriter};
    use crate::arch::x86_64::serial::SerialWrapper;

    /// Logger installed at boot.
    pub struct KernelLogger;

    static LOGGER: KernelLogger = KernelLogger;

    impl log::Log for KernelLogger {
        fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &log::Record<'_>) {
            if self.enabled(record.metadata()) {
                let _ = write_record(&mut SerialWriter::new(SerialWrapper), record);
            }
        }

        fn flush(&self) {}
    }

    /// Installs the serial logger with `level` as the filter.
    ///
    /// A second call leaves the first logger in place.
    pub fn init(level: log::LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub use kernel::{init, KernelLogger};

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[derive(Default)]
    struct Capture {
        bytes: Vec<u8>,
    }

    impl Serial for Capture {
        fn write_byte(&mut self, byte: u8) {
            self.bytes.push(byte);
        }

        fn read_byte(&mut self) -> Option<u8> {
            None
        }
    }

    #[test]
    fn test_record_format() {
        let mut writer = SerialWriter::new(Capture::default());
        write_record(
            &mut writer,
            &log::Record::builder()
                .level(log::Level::Warn)
                .target("konsoli::keyboard")
                .args(format_args!("queue full, {} dropped", 3))
                .build(),
        )
        .unwrap();

        let bytes = writer.into_inner().bytes;
        assert_eq!(bytes, b"[WARN ] konsoli::keyboard: queue full, 3 dropped\r\n");
    }
}
