use alloc::{boxed::Box, sync::Arc};
use core::time::Duration;

/// Default epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = DISCORD_EPOCH;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Instagram epoch: Saturday, January 1, 2011 00:00:00 UTC
pub const INSTAGRAM_EPOCH: Duration = Duration::from_millis(1_293_840_000_000);

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH_ORIGIN: Duration = Duration::from_millis(0);

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// The generator subtracts its configured epoch from every reading, so
/// implementations never need to know about the ID layout. Swapping the source
/// is how tests drive sequence exhaustion and clock regression without real
/// delays.
///
/// # Example
///
/// ```
/// use snowgen::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_528_538_400_000
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1_528_538_400_000);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// Saturating conversion of a [`Duration`] to whole milliseconds.
pub(crate) fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
