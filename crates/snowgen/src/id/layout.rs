use crate::{ConfigError, IdParts, IdView};

/// The bit layout of a 64-bit Snowflake ID.
///
/// The node ID and sequence widths are chosen at construction; the timestamp
/// takes every remaining bit:
///
/// ```text
///  Bit Index:  63                      N+S  N+S-1           S  S-1          0
///              +--------------------------+------------------+--------------+
///  Field:      | timestamp (64 - N - S)   | node id (N)      | sequence (S) |
///              +--------------------------+------------------+--------------+
///              |<----- MSB ------------- 64 bits ------------- LSB -------->|
/// ```
///
/// With the default widths (`N = 10`, `S = 12`) this is the classic Snowflake
/// layout with a 42-bit timestamp.
///
/// # Example
///
/// ```
/// use snowgen::Layout;
///
/// let layout = Layout::default();
/// let id = layout.compose(108_468_000_000, 786, 0);
/// assert_eq!(id, (108_468_000_000 << 22) | (786 << 12));
///
/// let parts = layout.decompose(id);
/// assert_eq!(parts.timestamp, 108_468_000_000);
/// assert_eq!(parts.node_id, 786);
/// assert_eq!(parts.sequence, 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    node_id_bits: u8,
    sequence_bits: u8,
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Layout {
    /// Default node ID width.
    pub const DEFAULT_NODE_ID_BITS: u8 = 10;

    /// Default sequence width.
    pub const DEFAULT_SEQUENCE_BITS: u8 = 12;

    /// 42-bit timestamp, 10-bit node ID, 12-bit sequence.
    pub const DEFAULT: Self = Self {
        node_id_bits: Self::DEFAULT_NODE_ID_BITS,
        sequence_bits: Self::DEFAULT_SEQUENCE_BITS,
    };

    /// Creates a layout, rejecting widths that leave no timestamp bit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLayout`] when
    /// `node_id_bits + sequence_bits > 63`.
    pub const fn new(node_id_bits: u8, sequence_bits: u8) -> Result<Self, ConfigError> {
        if node_id_bits as u16 + sequence_bits as u16 > 63 {
            return Err(ConfigError::InvalidLayout {
                node_id_bits,
                sequence_bits,
            });
        }
        Ok(Self {
            node_id_bits,
            sequence_bits,
        })
    }

    /// Width of the node ID field.
    pub const fn node_id_bits(&self) -> u8 {
        self.node_id_bits
    }

    /// Width of the sequence field.
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Width of the timestamp field (all remaining bits).
    pub const fn timestamp_bits(&self) -> u8 {
        64 - self.node_id_bits - self.sequence_bits
    }

    /// Position of the lowest node ID bit.
    pub const fn node_id_shift(&self) -> u8 {
        self.sequence_bits
    }

    /// Position of the lowest timestamp bit.
    pub const fn timestamp_shift(&self) -> u8 {
        self.node_id_bits + self.sequence_bits
    }

    /// Largest encodable node ID, `2^node_id_bits - 1`.
    pub const fn max_node_id(&self) -> u64 {
        mask(self.node_id_bits)
    }

    /// Largest encodable sequence, `2^sequence_bits - 1`.
    pub const fn max_sequence(&self) -> u64 {
        mask(self.sequence_bits)
    }

    /// Largest encodable timestamp, in milliseconds since the epoch.
    pub const fn max_timestamp(&self) -> u64 {
        mask(self.timestamp_bits())
    }

    /// Checks a caller-supplied node ID against the node ID field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NodeIdOutOfRange`] for negative IDs and IDs
    /// above [`Self::max_node_id`].
    pub fn check_node_id(&self, node_id: i64) -> Result<u64, ConfigError> {
        match u64::try_from(node_id) {
            Ok(n) if n <= self.max_node_id() => Ok(n),
            _ => Err(ConfigError::NodeIdOutOfRange {
                node_id,
                max: self.max_node_id(),
            }),
        }
    }

    /// Packs the three fields into an ID.
    ///
    /// Each field is masked to its width; the generator never passes
    /// out-of-range values.
    pub const fn compose(&self, timestamp: u64, node_id: u64, sequence: u64) -> u64 {
        debug_assert!(timestamp <= self.max_timestamp(), "timestamp overflow");
        debug_assert!(node_id <= self.max_node_id(), "node_id overflow");
        debug_assert!(sequence <= self.max_sequence(), "sequence overflow");
        ((timestamp & self.max_timestamp()) << self.timestamp_shift())
            | ((node_id & self.max_node_id()) << self.node_id_shift())
            | (sequence & self.max_sequence())
    }

    /// Unpacks an ID into its fields.
    pub const fn decompose(&self, id: u64) -> IdParts {
        IdParts {
            timestamp: (id >> self.timestamp_shift()) & self.max_timestamp(),
            node_id: (id >> self.node_id_shift()) & self.max_node_id(),
            sequence: id & self.max_sequence(),
        }
    }

    /// Returns a view of `id` that renders its fields as a bit-layout table.
    pub const fn view(&self, id: u64) -> IdView {
        IdView::new(*self, id)
    }
}

const fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_widths() {
        let layout = Layout::default();
        assert_eq!(layout.timestamp_bits(), 42);
        assert_eq!(layout.timestamp_shift(), 22);
        assert_eq!(layout.node_id_shift(), 12);
        assert_eq!(layout.max_node_id(), 1023);
        assert_eq!(layout.max_sequence(), 4095);
        assert_eq!(layout.max_timestamp(), (1 << 42) - 1);
    }

    #[test]
    fn rejects_layouts_without_timestamp_bits() {
        assert_eq!(
            Layout::new(32, 32),
            Err(ConfigError::InvalidLayout {
                node_id_bits: 32,
                sequence_bits: 32,
            })
        );
        assert!(Layout::new(200, 200).is_err());

        let widest = Layout::new(31, 32).unwrap();
        assert_eq!(widest.timestamp_bits(), 1);
        assert_eq!(widest.max_timestamp(), 1);
    }

    #[test]
    fn zero_width_fields() {
        let layout = Layout::new(0, 0).unwrap();
        assert_eq!(layout.timestamp_bits(), 64);
        assert_eq!(layout.max_timestamp(), u64::MAX);
        assert_eq!(layout.max_node_id(), 0);
        assert_eq!(layout.max_sequence(), 0);
        assert_eq!(layout.compose(12_345, 0, 0), 12_345);
    }

    #[test]
    fn node_id_bounds() {
        let layout = Layout::default();
        assert_eq!(layout.check_node_id(0), Ok(0));
        assert_eq!(layout.check_node_id(1023), Ok(1023));
        assert_eq!(
            layout.check_node_id(-1),
            Err(ConfigError::NodeIdOutOfRange {
                node_id: -1,
                max: 1023
            })
        );
        assert_eq!(
            layout.check_node_id(1024),
            Err(ConfigError::NodeIdOutOfRange {
                node_id: 1024,
                max: 1023
            })
        );
        assert!(layout.check_node_id(i64::MIN).is_err());
    }

    #[test]
    fn reference_example() {
        let layout = Layout::default();
        let timestamp = 1_528_538_400_000 - 1_420_070_400_000;
        assert_eq!(timestamp, 108_468_000_000);

        let id = layout.compose(timestamp, 786, 0);
        assert_eq!(id, (108_468_000_000_u64 << 22) | (786 << 12));
        assert_eq!(id, 454_947_766_275_219_456);

        // Same instant with the counter at 3450
        let id = layout.compose(timestamp, 786, 3450);
        assert_eq!(id, 454_947_766_275_222_906);
        assert_eq!(layout.decompose(id).sequence, 3450);
    }

    #[test]
    fn small_layout_fields_do_not_bleed() {
        let layout = Layout::new(2, 3).unwrap();
        let id = layout.compose(9, 3, 7);
        assert_eq!(id, (9 << 5) | (3 << 3) | 7);
        assert_eq!(
            layout.decompose(id),
            IdParts {
                timestamp: 9,
                node_id: 3,
                sequence: 7
            }
        );
    }
}
