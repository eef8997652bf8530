use crate::time::duration_millis;
use alloc::{format, string::String};
use core::time::Duration;

/// The fields of a decoded ID.
///
/// Produced by [`Layout::decompose`]; the timestamp is relative to whatever
/// epoch the generator was configured with.
///
/// [`Layout::decompose`]: crate::Layout::decompose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdParts {
    /// Milliseconds since the generator's epoch.
    pub timestamp: u64,
    /// The generator's node ID.
    pub node_id: u64,
    /// Position within the millisecond.
    pub sequence: u64,
}

impl IdParts {
    /// Converts the timestamp back to milliseconds since the Unix epoch.
    ///
    /// ```
    /// use snowgen::{DEFAULT_EPOCH, Layout};
    ///
    /// let id = Layout::default().compose(108_468_000_000, 786, 0);
    /// let parts = Layout::default().decompose(id);
    /// assert_eq!(parts.unix_millis(DEFAULT_EPOCH), 1_528_538_400_000);
    /// ```
    pub fn unix_millis(&self, epoch: Duration) -> u64 {
        self.timestamp.saturating_add(duration_millis(epoch))
    }
}

/// Returns the ID as a zero-padded 20-digit decimal string.
///
/// Twenty digits hold any `u64`, so padded IDs sort lexicographically in the
/// same order as numerically.
pub fn to_padded_string(id: u64) -> String {
    format!("{id:020}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_strings_sort_like_numbers() {
        assert_eq!(to_padded_string(0), "00000000000000000000");
        assert_eq!(to_padded_string(u64::MAX), "18446744073709551615");

        let small = to_padded_string(999);
        let large = to_padded_string(1_000);
        assert!(small < large);
    }
}
