//! Busy-wait delays behind the [`Delay`] capability.
//!
//! There is no timer interrupt in the polling build, so waiting means spinning.
//! Hosted builds and tests swap in [`NoDelay`] or [`SimulatedClock`].

use crate::config;
use core::time::Duration;
use konsoli_hal::Delay;

/// Spins the CPU for roughly the requested time.
#[derive(Debug, Clone, Copy)]
pub struct SpinDelay {
    spins_per_microsecond: u64,
}

impl SpinDelay {
    /// A delay calibrated with [`config::SPINS_PER_MICROSECOND`].
    pub const fn new() -> Self {
        Self::calibrated(config::SPINS_PER_MICROSECOND)
    }

    /// A delay with an explicit calibration.
    pub const fn calibrated(spins_per_microsecond: u64) -> Self {
        SpinDelay {
            spins_per_microsecond,
        }
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for SpinDelay {
    fn wait(&mut self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        for _ in 0..micros.saturating_mul(self.spins_per_microsecond) {
            core::hint::spin_loop();
        }
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn wait(&mut self, _duration: Duration) {}
}

/// Records requested waits instead of blocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedClock {
    elapsed: Duration,
    waits: usize,
}

impl SimulatedClock {
    /// A clock at zero.
    pub const fn new() -> Self {
        SimulatedClock {
            elapsed: Duration::ZERO,
            waits: 0,
        }
    }

    /// Total time waited so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of calls to [`Delay::wait`].
    pub fn waits(&self) -> usize {
        self.waits
    }
}

impl Delay for SimulatedClock {
    fn wait(&mut self, duration: Duration) {
        self.elapsed = self.elapsed.saturating_add(duration);
        self.waits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_clock_accumulates() {
        let mut clock = SimulatedClock::new();
        clock.wait(Duration::from_micros(500));
        clock.wait(Duration::from_micros(250));
        assert_eq!(clock.elapsed(), Duration::from_micros(750));
        assert_eq!(clock.waits(), 2);
    }

    #[test]
    fn test_spin_delay_returns() {
        let mut delay = SpinDelay::calibrated(1);
        delay.wait(Duration::from_micros(10));
        NoDelay.wait(Duration::from_secs(3600));
    }
}
