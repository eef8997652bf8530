use crate::time::{TimeSource, duration_millis};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// A time source that reads the system wall clock on every call.
///
/// This is the most direct clock: it follows NTP steps and manual adjustments,
/// so a generator driven by it will surface a backward step as a
/// [`ClockError::MovedBackwards`]. Use [`MonotonicClock`] to smooth those out
/// instead.
///
/// A system clock set before 1970 reads as `0`, which the generator reports as
/// [`ClockError::BeforeEpoch`].
///
/// [`ClockError::MovedBackwards`]: crate::ClockError::MovedBackwards
/// [`ClockError::BeforeEpoch`]: crate::ClockError::BeforeEpoch
/// [`MonotonicClock`]: crate::MonotonicClock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, duration_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPOCH;

    #[test]
    fn reads_current_time_after_default_epoch() {
        let now = SystemClock.current_millis();
        assert!(now > duration_millis(DEFAULT_EPOCH));
    }

    #[test]
    fn advances_with_real_time() {
        let clock = SystemClock::new();
        let before = clock.current_millis();
        std::thread::sleep(core::time::Duration::from_millis(5));
        assert!(clock.current_millis() > before);
    }
}
