//! Central kernel configuration constants.

use core::time::Duration;
use konsoli_common::Color;

/// Kernel name shown in the banner and on the panic screen.
pub const KERNEL_NAME: &str = "Konsoli";

/// Kernel version.
pub const KERNEL_VERSION: &str = "0.1.0";

/// Target architecture shown in the banner and the panic screen.
pub const KERNEL_ARCH: &str = "x86_64";

/// Text shown before every input line.
pub const PROMPT: &str = "konsoli> ";

/// Default foreground color after console init.
pub const DEFAULT_FOREGROUND: Color = Color::White;

/// Default background color after console init.
pub const DEFAULT_BACKGROUND: Color = Color::Black;

/// Pause between characters when the banner types out its subtitle.
pub const BANNER_CHAR_DELAY: Duration = Duration::from_millis(10);

/// Tab stops are placed every `TAB_WIDTH` columns.
pub const TAB_WIDTH: usize = 8;

/// Pause between two keyboard polls.
pub const POLL_INTERVAL: Duration = Duration::from_micros(500);

/// Spin iterations that take roughly one microsecond.
///
/// Calibrated for QEMU without KVM; real hardware spins faster.
pub const SPINS_PER_MICROSECOND: u64 = 50;

/// Capacity of the scancode queue filled by the keyboard interrupt.
pub const SCANCODE_QUEUE_CAPACITY: usize = 100;

/// Most verbose level the serial logger emits.
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
