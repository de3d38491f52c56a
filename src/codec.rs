// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime value codecs used by generated table objects.
//!
//! Fields whose type has no native column representation are stored as
//! text. The generated `create`, `update`, lookup and `transform` bodies
//! call the functions below; decode failures surface there as
//! `sqlx::Error::Decode` and serialization failures as
//! `sqlx::Error::Encode`.
//!
//! | Semantic type | Encode | Decode |
//! |---------------|--------|--------|
//! | `NaiveDateTime` | [`encode_date_time`] | [`decode_date_time`] |
//! | `DateTime<Tz>` | [`encode_zoned_date_time`] | [`decode_zoned_date_time`] |
//! | `Vec<String>` | [`encode_list`] | [`decode_list`] |
//! | `f32` | [`encode_float`] | [`decode_float`] |
//! | `#[serializable]` | [`encode_serialized`] | [`decode_serialized`] |
//!
//! # Lists
//!
//! Lists are joined with a bare [`LIST_SEPARATOR`] and split on it again.
//! Elements are not escaped, so two inputs do not round-trip:
//!
//! | Stored | Text | Read back |
//! |--------|------|-----------|
//! | `["a,b", "c"]` | `a,b,c` | `["a", "b", "c"]` |
//! | `[""]` | empty | `[]` |

use std::{fmt::Display, num::ParseFloatError};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Separator between list elements.
pub const LIST_SEPARATOR: char = ',';

/// Text layout of a stored `NaiveDateTime`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Failure to turn stored text back into a value, or a value into text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Stored text is not a date/time in the expected layout.
    #[error("invalid date/time text: {0}")]
    DateTime(#[from] chrono::ParseError),

    /// Stored text is not a float.
    #[error("invalid float text: {0}")]
    Float(#[from] ParseFloatError),

    /// JSON (de)serialization failed.
    #[error("serialization failed: {0}")]
    Serialized(#[from] serde_json::Error)
}

/// Encode a local date/time as `2024-01-31T10:00:00.5`.
pub fn encode_date_time(value: &NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Decode text written by [`encode_date_time`].
///
/// # Errors
///
/// Returns [`CodecError::DateTime`] when the text does not match
/// [`DATE_TIME_FORMAT`].
pub fn decode_date_time(text: &str) -> Result<NaiveDateTime, CodecError> {
    Ok(NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)?)
}

/// Encode a zoned date/time as RFC 3339, keeping its offset.
pub fn encode_zoned_date_time<Tz>(value: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display
{
    value.to_rfc3339()
}

/// Decode RFC 3339 text into any zone convertible from a fixed offset
/// (`FixedOffset`, `Utc`, `Local`).
///
/// # Errors
///
/// Returns [`CodecError::DateTime`] when the text is not RFC 3339.
pub fn decode_zoned_date_time<Tz>(text: &str) -> Result<DateTime<Tz>, CodecError>
where
    Tz: TimeZone,
    DateTime<Tz>: From<DateTime<FixedOffset>>
{
    Ok(DateTime::parse_from_rfc3339(text)?.into())
}

/// Join list elements with [`LIST_SEPARATOR`].
pub fn encode_list(values: &[String]) -> String {
    values.join(&LIST_SEPARATOR.to_string())
}

/// Split text written by [`encode_list`].
///
/// Empty text decodes to an empty list, which is also what a list holding
/// one empty string encodes to.
pub fn decode_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(LIST_SEPARATOR).map(str::to_owned).collect()
}

/// Encode a float using its shortest round-tripping representation.
pub fn encode_float(value: f32) -> String {
    value.to_string()
}

/// Decode text written by [`encode_float`].
///
/// # Errors
///
/// Returns [`CodecError::Float`] when the text is not a float.
pub fn decode_float(text: &str) -> Result<f32, CodecError> {
    Ok(text.parse()?)
}

/// Serialize a value to JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Serialized`] when the value cannot be serialized.
pub fn encode_serialized<T>(value: &T) -> Result<String, CodecError>
where
    T: Serialize + ?Sized
{
    Ok(serde_json::to_string(value)?)
}

/// Deserialize JSON text written by [`encode_serialized`].
///
/// # Errors
///
/// Returns [`CodecError::Serialized`] when the text is not valid JSON for `T`.
pub fn decode_serialized<T>(text: &str) -> Result<T, CodecError>
where
    T: DeserializeOwned
{
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use serde::Deserialize;

    use super::*;

    #[test]
    fn date_time_round_trip() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_milli_opt(10, 15, 30, 500))
            .expect("valid date");
        let text = encode_date_time(&value);
        assert_eq!(text, "2024-01-31T10:15:30.500");
        assert_eq!(decode_date_time(&text).expect("decode"), value);
    }

    #[test]
    fn date_time_without_fraction() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .expect("valid date");
        assert_eq!(encode_date_time(&value), "2024-01-31T10:00:00");
        assert_eq!(decode_date_time("2024-01-31T10:00:00").expect("decode"), value);
    }

    #[test]
    fn date_time_rejects_garbage() {
        assert!(matches!(
            decode_date_time("yesterday"),
            Err(CodecError::DateTime(_))
        ));
    }

    #[test]
    fn zoned_date_time_keeps_offset() {
        let value = DateTime::parse_from_rfc3339("2024-06-01T08:30:00+02:00").expect("parse");
        let text = encode_zoned_date_time(&value);
        let decoded: DateTime<FixedOffset> = decode_zoned_date_time(&text).expect("decode");
        assert_eq!(decoded, value);
        assert_eq!(decoded.offset(), value.offset());
    }

    #[test]
    fn zoned_date_time_into_utc() {
        let decoded: DateTime<Utc> =
            decode_zoned_date_time("2024-06-01T08:30:00+02:00").expect("decode");
        assert_eq!(decoded.to_rfc3339(), "2024-06-01T06:30:00+00:00");
    }

    #[test]
    fn list_round_trip() {
        let values = vec!["red".to_owned(), "green".to_owned(), "blue".to_owned()];
        let text = encode_list(&values);
        assert_eq!(text, "red,green,blue");
        assert_eq!(decode_list(&text), values);
    }

    #[test]
    fn empty_list_round_trip() {
        assert_eq!(encode_list(&[]), "");
        assert!(decode_list("").is_empty());
    }

    #[test]
    fn list_element_with_comma_is_split() {
        let values = vec!["a,b".to_owned(), "c".to_owned()];
        let decoded = decode_list(&encode_list(&values));
        assert_ne!(decoded, values);
        assert_eq!(decoded, ["a", "b", "c"]);
    }

    #[test]
    fn list_of_single_empty_element_decodes_empty() {
        let values = vec![String::new()];
        let text = encode_list(&values);
        assert_eq!(text, "");
        assert_ne!(decode_list(&text), values);
        assert!(decode_list(&text).is_empty());
    }

    #[test]
    fn list_of_empty_elements_keeps_count() {
        let values = vec![String::new(), String::new()];
        assert_eq!(decode_list(&encode_list(&values)), values);
    }

    #[test]
    fn float_round_trip() {
        for value in [0.0_f32, 1.5, -3.25, 0.1, f32::MAX, f32::MIN_POSITIVE] {
            assert_eq!(decode_float(&encode_float(value)).expect("decode"), value);
        }
    }

    #[test]
    fn float_rejects_garbage() {
        assert!(matches!(decode_float("one"), Err(CodecError::Float(_))));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        street: String,
        number: u32
    }

    #[test]
    fn serialized_round_trip() {
        let value = Address {
            street: "Main".into(),
            number: 7
        };
        let text = encode_serialized(&value).expect("encode");
        assert_eq!(text, r#"{"street":"Main","number":7}"#);
        assert_eq!(decode_serialized::<Address>(&text).expect("decode"), value);
    }

    #[test]
    fn serialized_uuid_list() {
        let value = vec![uuid::Uuid::nil(), uuid::Uuid::new_v4()];
        let text = encode_serialized(value.as_slice()).expect("encode");
        assert!(text.starts_with(r#"["00000000-0000-0000-0000-000000000000","#));
        assert_eq!(decode_serialized::<Vec<uuid::Uuid>>(&text).expect("decode"), value);
    }

    #[test]
    fn serialized_rejects_wrong_shape() {
        assert!(matches!(
            decode_serialized::<Address>("[1, 2]"),
            Err(CodecError::Serialized(_))
        ));
    }
}
