use crate::{ConfigError, DEFAULT_EPOCH, Layout, WaitStrategy, time::duration_millis};
use core::time::Duration;

/// Immutable settings for an [`IdGenerator`].
///
/// Every generator carries its own copy, so differently shaped generators can
/// live in the same process. Values are checked when the generator is built,
/// not when the config is assembled.
///
/// With the `serde` feature the config can be read from any serde format;
/// missing keys fall back to the defaults and the epoch is expressed in
/// milliseconds since the Unix epoch:
///
/// ```json
/// { "node_id_bits": 10, "sequence_bits": 12, "epoch": 1420070400000, "wait": "Spin" }
/// ```
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use snowgen::{GeneratorConfig, WaitStrategy};
///
/// let config = GeneratorConfig::default()
///     .with_node_id_bits(5)
///     .with_sequence_bits(8)
///     .with_wait_strategy(WaitStrategy::Sleep(Duration::from_micros(100)));
///
/// let layout = config.layout().unwrap();
/// assert_eq!(layout.timestamp_bits(), 51);
/// ```
///
/// [`IdGenerator`]: crate::IdGenerator
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    node_id_bits: u8,
    sequence_bits: u8,
    #[cfg_attr(feature = "serde", serde(with = "crate::serde::duration_as_millis"))]
    epoch: Duration,
    wait: WaitStrategy,
}

impl Default for GeneratorConfig {
    /// 10 node ID bits, 12 sequence bits, [`DEFAULT_EPOCH`], busy-spin wait.
    fn default() -> Self {
        Self {
            node_id_bits: Layout::DEFAULT_NODE_ID_BITS,
            sequence_bits: Layout::DEFAULT_SEQUENCE_BITS,
            epoch: DEFAULT_EPOCH,
            wait: WaitStrategy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the node ID field width.
    #[must_use]
    pub const fn with_node_id_bits(mut self, bits: u8) -> Self {
        self.node_id_bits = bits;
        self
    }

    /// Sets the sequence field width.
    #[must_use]
    pub const fn with_sequence_bits(mut self, bits: u8) -> Self {
        self.sequence_bits = bits;
        self
    }

    /// Sets the custom epoch, as a duration since 1970-01-01 UTC.
    #[must_use]
    pub const fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the custom epoch in milliseconds since 1970-01-01 UTC.
    #[must_use]
    pub const fn with_epoch_millis(self, millis: u64) -> Self {
        self.with_epoch(Duration::from_millis(millis))
    }

    /// Sets how the generator pauses while waiting out an exhausted sequence.
    #[must_use]
    pub const fn with_wait_strategy(mut self, wait: WaitStrategy) -> Self {
        self.wait = wait;
        self
    }

    /// Node ID field width.
    pub const fn node_id_bits(&self) -> u8 {
        self.node_id_bits
    }

    /// Sequence field width.
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// The custom epoch.
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    /// The custom epoch in whole milliseconds since 1970-01-01 UTC.
    pub fn epoch_millis(&self) -> u64 {
        duration_millis(self.epoch)
    }

    /// The wait strategy.
    pub const fn wait_strategy(&self) -> WaitStrategy {
        self.wait
    }

    /// Validates the bit widths and returns the resulting layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLayout`] when the widths leave no
    /// timestamp bit.
    pub const fn layout(&self) -> Result<Layout, ConfigError> {
        Layout::new(self.node_id_bits, self.sequence_bits)
    }
}
