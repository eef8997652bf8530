use core::{cmp::Ordering, fmt};

use parking_lot::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    ClockError, ConfigError, GeneratorConfig, IdGenStatus, IdParts, IdView, Layout, SystemClock,
    TimeSource,
};

/// Mutable generator state, only ever touched under the lock.
#[derive(Debug, Default)]
struct State {
    /// Last timestamp (relative to the epoch) used to mint an ID. `None` until
    /// the first ID.
    last_timestamp: Option<u64>,
    /// Sequence of the last minted ID within `last_timestamp`.
    sequence: u64,
}

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// Each ID packs the milliseconds since the configured epoch, this generator's
/// node ID and a per-millisecond sequence (see [`Layout`]). One
/// [`parking_lot::Mutex`] serializes the clock read, the comparison with the
/// last timestamp and the sequence update, so concurrent callers can never be
/// handed the same `(timestamp, sequence)` pair.
///
/// Share a generator across threads with an [`Arc`](alloc::sync::Arc). It is
/// deliberately not `Clone`: two copies of the same counters would mint
/// duplicate IDs.
///
/// ## Guarantees
/// - IDs from one generator are unique.
/// - If one call returns before another starts, the later ID is larger.
/// - A clock that moves backward produces [`ClockError::MovedBackwards`], never
///   a reordered ID, and leaves the state unchanged.
///
/// Uniqueness across generators relies on each one having a distinct node ID,
/// which must be assigned externally.
pub struct IdGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<State>,
    node_id: u64,
    layout: Layout,
    epoch_millis: u64,
    config: GeneratorConfig,
    time: T,
}

impl IdGenerator<SystemClock> {
    /// Creates a generator that reads the system wall clock.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::new`].
    ///
    /// # Example
    /// ```
    /// use snowgen::{GeneratorConfig, IdGenerator};
    ///
    /// let generator = IdGenerator::with_system_clock(786, GeneratorConfig::default()).unwrap();
    /// let a = generator.next_id().unwrap();
    /// let b = generator.next_id().unwrap();
    /// assert!(a < b);
    /// assert_eq!(generator.decompose(a).node_id, 786);
    /// ```
    pub fn with_system_clock(node_id: i64, config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::new(node_id, config, SystemClock)
    }
}

impl<T> IdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`IdGenerator`] for `node_id`.
    ///
    /// The generator starts with no last timestamp, so its first ID always
    /// has sequence `0`.
    ///
    /// # Parameters
    ///
    /// - `node_id`: A unique identifier for this generator within the
    ///   deployment, in `[0, 2^node_id_bits - 1]`. It is encoded into every ID.
    /// - `config`: Bit widths, epoch and wait strategy.
    /// - `time`: A [`TimeSource`] implementation (e.g., [`MonotonicClock`])
    ///   that supplies the current time.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidLayout`] if the bit widths leave no timestamp
    ///   bit.
    /// - [`ConfigError::NodeIdOutOfRange`] if `node_id` is negative or does not
    ///   fit the node ID field.
    ///
    /// # Example
    /// ```
    /// use snowgen::{ConfigError, GeneratorConfig, IdGenerator, MonotonicClock};
    ///
    /// let config = GeneratorConfig::default();
    /// assert!(IdGenerator::new(0, config, MonotonicClock::new()).is_ok());
    /// assert!(IdGenerator::new(1023, config, MonotonicClock::new()).is_ok());
    ///
    /// let err = IdGenerator::new(1024, config, MonotonicClock::new()).unwrap_err();
    /// assert_eq!(err, ConfigError::NodeIdOutOfRange { node_id: 1024, max: 1023 });
    /// ```
    ///
    /// [`MonotonicClock`]: crate::MonotonicClock
    pub fn new(node_id: i64, config: GeneratorConfig, time: T) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        let node_id = layout.check_node_id(node_id)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_id,
            node_id_bits = layout.node_id_bits(),
            sequence_bits = layout.sequence_bits(),
            epoch_millis = config.epoch_millis(),
            "created id generator"
        );

        Ok(Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(State::default())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(State::default()),
            node_id,
            layout,
            epoch_millis: config.epoch_millis(),
            config,
            time,
        })
    }

    /// Generates the next ID, waiting out an exhausted sequence if needed.
    ///
    /// When every sequence value of the current millisecond has been used,
    /// this polls the clock (pausing per the configured [`WaitStrategy`])
    /// until it moves past the last timestamp, then mints the ID in the new
    /// millisecond with sequence `0`. The lock is released between polls.
    ///
    /// # Errors
    ///
    /// Returns a [`ClockError`] if the clock moved backward, is before the
    /// epoch, or has run past the timestamp field. No ID is minted and the
    /// state is unchanged; retrying is up to the caller.
    ///
    /// # Example
    /// ```
    /// use snowgen::{GeneratorConfig, IdGenerator, ManualClock};
    ///
    /// let clock = ManualClock::new(1_528_538_400_000);
    /// let generator = IdGenerator::new(786, GeneratorConfig::default(), clock).unwrap();
    ///
    /// let id = generator.next_id().unwrap();
    /// assert_eq!(id, (108_468_000_000 << 22) | (786 << 12));
    /// ```
    ///
    /// [`WaitStrategy`]: crate::WaitStrategy
    pub fn next_id(&self) -> Result<u64, ClockError> {
        #[cfg(feature = "tracing")]
        let mut logged = false;

        loop {
            match self.try_next_id()? {
                IdGenStatus::Ready { id } => return Ok(id),
                IdGenStatus::Pending { .. } => {
                    #[cfg(feature = "tracing")]
                    {
                        if !core::mem::replace(&mut logged, true) {
                            tracing::debug!(
                                node_id = self.node_id,
                                "sequence exhausted, waiting for the next millisecond"
                            );
                        }
                    }
                    self.config.wait_strategy().pause();
                }
            }
        }
    }

    /// Makes a single, non-blocking attempt to generate an ID.
    ///
    /// # Returns
    /// - `Ok(IdGenStatus::Ready { id })`: a new ID was minted
    /// - `Ok(IdGenStatus::Pending { yield_for })`: the sequence is exhausted
    ///   for this millisecond; nothing changed, poll again later
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<IdGenStatus, ClockError> {
        let mut state = self.state.lock();

        // Read under the lock: a reading taken before acquiring it can be
        // older than a timestamp another caller has just used.
        let now = self.timestamp()?;

        let Some(last) = state.last_timestamp else {
            return Ok(self.start_tick(&mut state, now));
        };

        match now.cmp(&last) {
            Ordering::Equal => {
                if state.sequence < self.layout.max_sequence() {
                    state.sequence += 1;
                    Ok(IdGenStatus::Ready {
                        id: self.compose(now, state.sequence),
                    })
                } else {
                    Ok(IdGenStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => Ok(self.start_tick(&mut state, now)),
            Ordering::Less => Err(Self::cold_clock_behind(last, now)),
        }
    }

    /// The node ID encoded into every ID.
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The validated bit layout.
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// The configuration this generator was built with.
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Splits an ID minted by this generator back into its fields.
    pub const fn decompose(&self, id: u64) -> IdParts {
        self.layout.decompose(id)
    }

    /// Pairs an ID with this generator's layout for bit-level display.
    pub const fn view(&self, id: u64) -> IdView {
        self.layout.view(id)
    }

    fn start_tick(&self, state: &mut State, now: u64) -> IdGenStatus {
        state.last_timestamp = Some(now);
        state.sequence = 0;
        IdGenStatus::Ready {
            id: self.compose(now, 0),
        }
    }

    const fn compose(&self, timestamp: u64, sequence: u64) -> u64 {
        self.layout.compose(timestamp, self.node_id, sequence)
    }

    /// Milliseconds since the configured epoch, bounded by the layout.
    fn timestamp(&self) -> Result<u64, ClockError> {
        let now_millis = self.time.current_millis();
        let Some(timestamp) = now_millis.checked_sub(self.epoch_millis) else {
            return Err(self.cold_before_epoch(now_millis));
        };
        if timestamp > self.layout.max_timestamp() {
            return Err(self.cold_timestamp_overflow(timestamp));
        }
        Ok(timestamp)
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last: u64, now: u64) -> ClockError {
        #[cfg(feature = "tracing")]
        tracing::warn!(last, now, behind_ms = last - now, "clock moved backwards");
        ClockError::MovedBackwards { last, now }
    }

    #[cold]
    #[inline(never)]
    fn cold_before_epoch(&self, now_millis: u64) -> ClockError {
        #[cfg(feature = "tracing")]
        tracing::error!(
            now_millis,
            epoch_millis = self.epoch_millis,
            "clock reads before the configured epoch"
        );
        ClockError::BeforeEpoch {
            now_millis,
            epoch_millis: self.epoch_millis,
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_timestamp_overflow(&self, timestamp: u64) -> ClockError {
        let max = self.layout.max_timestamp();
        #[cfg(feature = "tracing")]
        tracing::error!(timestamp, max, "timestamp no longer fits the layout");
        ClockError::TimestampOverflow { timestamp, max }
    }
}

impl<T> fmt::Debug for IdGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("node_id", &self.node_id)
            .field("layout", &self.layout)
            .field("epoch_millis", &self.epoch_millis)
            .finish_non_exhaustive()
    }
}
