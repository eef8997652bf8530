use crate::time::TimeSource;
use alloc::sync::Arc;
use portable_atomic::{AtomicU64, Ordering};

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can hand one clone to a generator
/// and keep another to step time forward (or backward) between calls.
///
/// # Example
///
/// ```
/// use snowgen::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new(1_000);
/// let handle = clock.clone();
///
/// handle.advance(5);
/// assert_eq!(clock.current_millis(), 1_005);
///
/// handle.set(990);
/// assert_eq!(clock.current_millis(), 990);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at `millis` since the Unix epoch.
    pub fn new(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    /// Sets the reading to an absolute value. Moving backward is allowed.
    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Moves the reading forward by `delta` milliseconds.
    pub fn advance(&self, delta: u64) {
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn current_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}
