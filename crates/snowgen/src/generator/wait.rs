use core::time::Duration;

/// How [`IdGenerator::next_id`] pauses between clock polls while the sequence
/// for the current millisecond is exhausted.
///
/// The wait only ever lasts until the clock ticks over, so it is normally
/// sub-millisecond. The strategy changes CPU usage during that window, not the
/// IDs produced.
///
/// [`IdGenerator::next_id`]: crate::IdGenerator::next_id
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaitStrategy {
    /// Busy-spin with [`core::hint::spin_loop`]. Lowest latency.
    #[default]
    Spin,
    /// Yield the thread to the OS scheduler between polls.
    Yield,
    /// Sleep for the given duration between polls.
    Sleep(#[cfg_attr(feature = "serde", serde(with = "crate::serde::duration_as_micros"))] Duration),
}

impl WaitStrategy {
    /// Pauses once.
    pub fn pause(&self) {
        match self {
            Self::Spin => core::hint::spin_loop(),
            Self::Yield => std::thread::yield_now(),
            Self::Sleep(d) => std::thread::sleep(*d),
        }
    }
}
