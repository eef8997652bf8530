use thiserror::Error as ThisError;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowgen` can emit.
///
/// The two kinds never overlap: a [`ConfigError`] can only come out of a
/// constructor and a [`ClockError`] can only come out of ID generation. Hosts
/// that want a single error type for both can use this wrapper and still match
/// on the kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// The generator could not be constructed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An ID could not be generated because of the clock.
    #[error(transparent)]
    Clock(#[from] ClockError),
}

/// Construction-time failures.
///
/// These are not recoverable by retrying: the caller must supply a different
/// node ID or layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, ThisError)]
#[non_exhaustive]
pub enum ConfigError {
    /// The node ID does not fit the configured node ID field.
    #[error("node id {node_id} is out of range, must be between 0 and {max}")]
    NodeIdOutOfRange {
        /// The rejected node ID, as supplied by the caller.
        node_id: i64,
        /// The largest node ID the layout can encode.
        max: u64,
    },

    /// The bit widths leave no room for the timestamp field.
    #[error(
        "invalid layout: {node_id_bits} node id bits + {sequence_bits} sequence bits must leave at least one timestamp bit"
    )]
    InvalidLayout {
        /// Requested node ID field width.
        node_id_bits: u8,
        /// Requested sequence field width.
        sequence_bits: u8,
    },
}

/// Call-time failures caused by the clock.
///
/// The generator's state is left untouched whenever one of these is returned,
/// so a later call against a corrected clock continues from the last issued ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, ThisError)]
#[non_exhaustive]
pub enum ClockError {
    /// The clock reported a timestamp earlier than one already used to mint an
    /// ID.
    #[error("clock moved backwards: last timestamp {last}, now {now}")]
    MovedBackwards {
        /// Last timestamp (relative to the epoch) used to mint an ID.
        last: u64,
        /// The regressed reading (relative to the epoch).
        now: u64,
    },

    /// The clock reading is earlier than the configured epoch.
    #[error("clock reads {now_millis} ms, which is before the epoch at {epoch_millis} ms")]
    BeforeEpoch {
        /// Raw clock reading in milliseconds since the Unix epoch.
        now_millis: u64,
        /// Configured epoch in milliseconds since the Unix epoch.
        epoch_millis: u64,
    },

    /// The timestamp no longer fits the timestamp field of the layout.
    #[error("timestamp {timestamp} exceeds the layout maximum of {max}")]
    TimestampOverflow {
        /// Milliseconds since the epoch.
        timestamp: u64,
        /// The largest timestamp the layout can encode.
        max: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable_through_the_wrapper() {
        let config: Error = ConfigError::NodeIdOutOfRange {
            node_id: -1,
            max: 1023,
        }
        .into();
        let clock: Error = ClockError::MovedBackwards { last: 5, now: 4 }.into();

        assert!(matches!(config, Error::Config(_)));
        assert!(matches!(clock, Error::Clock(_)));
    }

    #[test]
    fn display_is_transparent() {
        let err: Error = ClockError::MovedBackwards { last: 10, now: 7 }.into();
        assert_eq!(
            err.to_string(),
            "clock moved backwards: last timestamp 10, now 7"
        );

        let err: Error = ConfigError::NodeIdOutOfRange {
            node_id: 1024,
            max: 1023,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "node id 1024 is out of range, must be between 0 and 1023"
        );
    }
}
