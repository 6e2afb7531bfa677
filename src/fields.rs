//! Field converters for Slick models.
//!
//! Every model field is an `Option<T>`: `None` means "never set" and is
//! left out of the serialized JSON. Plain strings, booleans, nested
//! models and collections need nothing beyond serde's derive. The
//! adapters here cover the fields where the wire format differs from
//! the Rust type, and are applied with `#[serde_as(as = "...")]`:
//!
//! | Adapter       | Rust type        | JSON                                   |
//! |---------------|------------------|----------------------------------------|
//! | [`Integer`]   | `i64`            | number (fractions truncated), or a string holding an integer |
//! | [`Float`]     | `f64`            | number, or a string holding a number   |
//! | [`EpochMillis`] | `DateTime<Utc>` | milliseconds since the Unix epoch     |
//!
//! Opaque values (attribute maps, configuration blobs) are kept as
//! [`serde_json::Value`] and passed through untouched.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::formats::Flexible;
use serde_with::{DeserializeAs, DisplayFromStr, PickFirst, Same, SerializeAs, TimestampMilliSeconds};

/// Integer field. Serializes as a JSON number.
///
/// Reads integers, numeric strings such as `"5"`, and floats, which
/// are truncated toward zero (`5.9` reads as `5`). Non-finite or
/// out-of-range floats and non-numeric strings are errors.
pub struct Integer;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInteger {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SerializeAs<i64> for Integer {
    fn serialize_as<S>(source: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*source)
    }
}

impl<'de> DeserializeAs<'de, i64> for Integer {
    fn deserialize_as<D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawInteger::deserialize(deserializer)? {
            RawInteger::Int(value) => Ok(value),
            RawInteger::Float(value)
                if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
            {
                Ok(value.trunc() as i64)
            }
            RawInteger::Float(value) => Err(D::Error::custom(format!(
                "{value} is out of range for an integer"
            ))),
            RawInteger::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid integer: {text:?}"))),
        }
    }
}

/// Float field. Serializes as a JSON number; also reads numeric strings.
pub type Float = PickFirst<(Same, DisplayFromStr)>;

/// Timestamp stored by slick as Unix epoch milliseconds.
pub type EpochMillis = TimestampMilliSeconds<i64, Flexible>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};
    use serde_with::{serde_as, skip_serializing_none};

    #[serde_as]
    #[skip_serializing_none]
    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Sample {
        #[serde_as(as = "Option<Integer>")]
        count: Option<i64>,
        #[serde_as(as = "Option<Float>")]
        ratio: Option<f64>,
        #[serde_as(as = "Option<EpochMillis>")]
        when: Option<DateTime<Utc>>,
        raw: Option<serde_json::Value>,
    }

    #[test]
    fn test_integer_accepts_numbers_and_numeric_strings() {
        let a: Sample = serde_json::from_value(serde_json::json!({"count": 5})).unwrap();
        let b: Sample = serde_json::from_value(serde_json::json!({"count": "5"})).unwrap();
        assert_eq!(a.count, Some(5));
        assert_eq!(b.count, Some(5));
    }

    #[test]
    fn test_integer_truncates_floats() {
        let whole: Sample = serde_json::from_value(serde_json::json!({"count": 5.0})).unwrap();
        let fraction: Sample = serde_json::from_value(serde_json::json!({"count": -2.7})).unwrap();
        assert_eq!(whole.count, Some(5));
        assert_eq!(fraction.count, Some(-2));

        // Written back as a plain integer
        assert_eq!(serde_json::to_value(&whole).unwrap(), serde_json::json!({"count": 5}));
    }

    #[test]
    fn test_integer_rejects_out_of_range_float() {
        let result: Result<Sample, _> = serde_json::from_value(serde_json::json!({"count": 1e300}));
        assert!(result.is_err());
    }

    #[test]
    fn test_integer_rejects_non_numeric_string() {
        let result: Result<Sample, _> =
            serde_json::from_value(serde_json::json!({"count": "five"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_float_accepts_string() {
        let s: Sample = serde_json::from_value(serde_json::json!({"ratio": "0.25"})).unwrap();
        assert_eq!(s.ratio, Some(0.25));
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        let s: Sample =
            serde_json::from_value(serde_json::json!({"when": 1_700_000_000_123_i64})).unwrap();
        let expected = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(s.when, Some(expected));

        let back = serde_json::to_value(&s).unwrap();
        assert_eq!(back, serde_json::json!({"when": 1_700_000_000_123_i64}));
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let s = Sample {
            count: Some(1),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&s).unwrap(), serde_json::json!({"count": 1}));
    }

    #[test]
    fn test_raw_value_passes_through() {
        let input = serde_json::json!({"raw": {"nested": [1, "two", null]}});
        let s: Sample = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&s).unwrap(), input);
    }
}
