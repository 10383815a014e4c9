//! Lenient decoding of monetary amounts.
//!
//! The bank reports amounts inconsistently: usually as decimal strings
//! (`"1000.00"`), sometimes as JSON numbers, and as `null` or `""` when a
//! transaction could not be found. This module normalises all of those into
//! `Option<Decimal>` and is meant to be used as `#[serde(with = "amount")]`.
//!
//! Amounts are always re-serialized as strings so no precision is lost.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Parses an amount as the bank formats it.
///
/// Blank input yields `Ok(None)`. Thousands separators are ignored.
///
/// # Errors
///
/// Returns [`rust_decimal::Error`] if the text is not a decimal number.
pub fn parse(raw: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let cleaned = trimmed.replace(',', "");
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(Some)
}

/// Serializes an amount as a decimal string, or `null` when absent.
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(amount) => serializer.serialize_str(&amount.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes an amount from a string, a number, an empty string or `null`.
///
/// Anything that is not a decimal number (`"N/A"`, `true`, an object)
/// decodes to `None`, so one bad amount does not hide the rest of a record.
///
/// # Errors
///
/// Fails only if the input is not valid JSON.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::String(text) => parse(&text).ok().flatten(),
        Value::Number(number) => parse(&number.to_string()).ok().flatten(),
        _ => None,
    };
    Ok(amount)
}
