//! Lenient value parsing for stored and submitted payroll data.
//!
//! Employee and visit documents accumulate fields over time, and operators
//! submit amounts from free-form inputs. The helpers here turn numbers,
//! numeric strings, `null` and garbage into well-defined values so that
//! computation never fails on historical records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parses a JSON value into a decimal.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace and
/// scientific notation allowed). Everything else yields `None`.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::lenient::parse_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(parse_decimal(&json!(12.5)), Some(Decimal::new(125, 1)));
/// assert_eq!(parse_decimal(&json!(" 300 ")), Some(Decimal::new(300, 0)));
/// assert_eq!(parse_decimal(&json!("abc")), None);
/// assert_eq!(parse_decimal(&json!(null)), None);
/// ```
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal_str(&number.to_string()),
        Value::String(text) => parse_decimal_str(text.trim()),
        _ => None,
    }
}

fn parse_decimal_str(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Coerces a JSON value into a non-negative amount.
///
/// Unparseable and negative inputs become zero.
pub fn non_negative_amount(value: &Value) -> Decimal {
    parse_decimal(value)
        .filter(|amount| *amount >= Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

/// Parses a JSON value into a calendar date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part in UTC).
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp_str(text).map(|ts| ts.date_naive()))
}

/// Parses a JSON value into a UTC timestamp.
///
/// Accepts RFC 3339 strings and integer epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_timestamp_str(text.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp_str(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Serde adapter: decimal field that reads missing, `null` or malformed
/// values as zero.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value).unwrap_or(Decimal::ZERO))
}

/// Serde adapter: nullable decimal field; malformed values read as `None`.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value))
}

/// Serde adapter: non-negative amount, zero on parse failure.
pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(non_negative_amount(&value))
}

/// Serde adapter: optional date, `None` on parse failure.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_date(&value))
}

/// Serde adapter: optional timestamp, `None` on parse failure.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&value))
}

/// Serde adapter distinguishing an absent field from an explicit `null`.
///
/// Use together with `#[serde(default)]`: absent → `None`,
/// `null` → `Some(None)`, a value → `Some(Some(v))`. Only a literal `null`
/// clears; malformed values are treated as absent.
pub fn patch_decimal<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Some(None)),
        value => Ok(parse_decimal(&value).map(Some)),
    }
}
