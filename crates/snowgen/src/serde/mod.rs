//! `#[serde(with = "...")]` adapters for IDs and config durations.
//!
//! IDs are plain `u64`s. Many consumers (JavaScript in particular) lose
//! precision above 2^53, so [`as_decimal_string`] is the safer choice for
//! anything that leaves the process.

/// Serialize an ID as a decimal string, deserialize from a string or integer.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "snowgen::serde::as_decimal_string")]
///     id: u64,
/// }
///
/// let json = serde_json::to_string(&Event { id: 454_947_766_275_219_456 }).unwrap();
/// assert_eq!(json, r#"{"id":"454947766275219456"}"#);
/// ```
pub mod as_decimal_string {
    use core::fmt;
    use serde::{Deserializer, Serializer, de};

    /// Serialize an ID as a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &u64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize an ID from a decimal string or a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a valid decimal `u64`
    /// - The integer is negative
    pub fn deserialize<'de, D>(d: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal ID string or a non-negative integer")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        d.deserialize_any(DecimalVisitor)
    }
}

/// Serialize an ID as its native integer representation.
pub mod as_native {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize an ID as a `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &u64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.serialize(s)
    }

    /// Deserialize an ID from a `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d)
    }
}

/// Durations as integer milliseconds (config epochs).
pub(crate) mod duration_as_millis {
    use crate::time::duration_millis;
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration_millis(*d).serialize(s)
    }

    pub(crate) fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Durations as integer microseconds (wait strategy sleeps).
pub(crate) mod duration_as_micros {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(d.as_micros())
            .unwrap_or(u64::MAX)
            .serialize(s)
    }

    pub(crate) fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Duration::from_micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_EPOCH, GeneratorConfig, WaitStrategy};
    use core::time::Duration;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct DecimalRow {
        #[serde(with = "as_decimal_string")]
        event_id: u64,
    }

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct NativeRow {
        #[serde(with = "as_native")]
        event_id: u64,
    }

    #[test]
    fn decimal_string_roundtrip() {
        let row = DecimalRow {
            event_id: u64::MAX,
        };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":"18446744073709551615"}"#);
        let back: DecimalRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn decimal_string_accepts_integers() {
        let row: DecimalRow = serde_json::from_value(json!({"event_id": 42})).expect("deserialize");
        assert_eq!(row.event_id, 42);
    }

    #[test]
    fn decimal_string_rejects_garbage() {
        assert!(serde_json::from_value::<DecimalRow>(json!({"event_id": "12a"})).is_err());
        assert!(serde_json::from_value::<DecimalRow>(json!({"event_id": -1})).is_err());
        assert!(serde_json::from_value::<DecimalRow>(json!({"event_id": "-1"})).is_err());
    }

    #[test]
    fn native_roundtrip() {
        let row = NativeRow { event_id: 42 };
        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":42}"#);
        let back: NativeRow = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);
    }

    #[test]
    fn config_defaults_fill_missing_keys() {
        let config: GeneratorConfig =
            serde_json::from_value(json!({"sequence_bits": 4})).expect("deserialize");
        assert_eq!(config.sequence_bits(), 4);
        assert_eq!(config.node_id_bits(), 10);
        assert_eq!(config.epoch(), DEFAULT_EPOCH);
    }

    #[test]
    fn config_roundtrip() {
        let config = GeneratorConfig::default()
            .with_epoch_millis(1_000)
            .with_wait_strategy(WaitStrategy::Sleep(Duration::from_micros(250)));
        let value = serde_json::to_value(config).expect("serialize");
        assert_eq!(
            value,
            json!({
                "node_id_bits": 10,
                "sequence_bits": 12,
                "epoch": 1000,
                "wait": {"Sleep": 250}
            })
        );
        let back: GeneratorConfig = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, config);
    }
}
