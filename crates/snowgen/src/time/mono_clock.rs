use crate::time::{SystemClock, TimeSource};
use alloc::sync::Arc;
use core::time::Duration;
use portable_atomic::{AtomicU64, Ordering};
use std::{
    sync::OnceLock,
    thread::{self, JoinHandle},
    time::Instant,
};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source anchored to the wall clock once, at construction.
///
/// Readings are `wall_clock_at_start + elapsed`, where `elapsed` comes from a
/// monotonic timer (`Instant`). Wall-clock adjustments made after construction
/// (NTP steps, manual changes) are therefore invisible, and readings never go
/// backward within one clock.
///
/// A background thread updates a shared atomic counter once per millisecond so
/// the hot path is a single relaxed load with no syscall. Clones share the same
/// ticker; the thread exits once the last clone is dropped.
///
/// Separate `MonotonicClock` instances (including ones in a restarted process)
/// are each anchored independently, so a wall clock that was stepped backward
/// between two constructions can still produce an earlier reading in the
/// newer instance.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    anchor_millis: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock anchored to the current wall-clock time.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use snowgen::{MonotonicClock, TimeSource};
    ///
    /// let clock = MonotonicClock::new();
    /// let start = clock.current_millis();
    ///
    /// std::thread::sleep(Duration::from_millis(5));
    ///
    /// // The ticker can lag a sleeping caller by a tick, but never runs
    /// // backward.
    /// assert!(clock.current_millis() >= start);
    /// ```
    pub fn new() -> Self {
        let start = Instant::now();
        let anchor_millis = SystemClock.current_millis();

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                inner_ref.current.store(now_ms, Ordering::Relaxed);

                // Align to the tick after the actual current time
                tick = now_ms + 1;
            }
        });

        // Freshly created, so the cell is always empty here.
        let _ = inner._handle.set(handle);

        Self {
            inner,
            anchor_millis,
        }
    }
}

impl TimeSource for MonotonicClock {
    /// Returns the wall-clock time at construction plus the monotonic time
    /// elapsed since, in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64 {
        self.anchor_millis
            .saturating_add(self.inner.current.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_near_wall_clock() {
        let clock = MonotonicClock::new();
        let wall = SystemClock.current_millis();
        let mono = clock.current_millis();
        assert!(wall.abs_diff(mono) < 1_000, "wall {wall}, mono {mono}");
    }

    #[test]
    fn never_goes_backward() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_millis();
        for _ in 0..10_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn clones_share_the_ticker() {
        let a = MonotonicClock::new();
        let b = a.clone();
        std::thread::sleep(Duration::from_millis(3));
        let ra = a.current_millis();
        let rb = b.current_millis();
        assert!(rb >= ra);
        assert!(rb - ra < 50);
    }
}
