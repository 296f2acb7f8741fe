//! # Numeric Sanitization
//!
//! The single place where free-form numeric data becomes engine-safe.
//!
//! Two layers use it:
//!
//! - **Decoding**: the `lenient_*` serde helpers accept numbers, numeric
//!   strings (`"3.5"`, `"15 cm"`), blanks and garbage. Anything unusable
//!   decodes as zero (or `None` for optional fields) instead of failing.
//! - **Engine boundary**: [`bounded`] is applied to every numeric field of the
//!   input and the price config before any arithmetic, so NaN, infinities,
//!   negatives and absurd magnitudes never reach the takeoff.
//!
//! ```rust
//! use quote_core::sanitize::{finite_non_negative, parse_leading_number};
//!
//! assert_eq!(finite_non_negative(f64::NAN), 0.0);
//! assert_eq!(finite_non_negative(-3.0), 0.0);
//! assert_eq!(parse_leading_number("15 cm"), Some(15.0));
//! assert_eq!(parse_leading_number("abc"), None);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Largest length the engine accepts for any dimension (m) or distance (km)
pub const MAX_LENGTH: f64 = 100_000.0;

/// Largest roof grade accepted (%)
pub const MAX_SLOPE_PCT: f64 = 10_000.0;

/// Largest price, percentage or linear weight accepted
pub const MAX_AMOUNT: f64 = 1.0e9;

/// Coerce a value to a finite, non-negative number (zero otherwise).
pub fn finite_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// [`finite_non_negative`], then clamped to `max`.
///
/// With every engine input clamped this way, all products and sums in a
/// quote stay finite.
///
/// ```rust
/// use quote_core::sanitize::{bounded, MAX_LENGTH};
///
/// assert_eq!(bounded(3.0e10, MAX_LENGTH), MAX_LENGTH);
/// assert_eq!(bounded(f64::INFINITY, MAX_LENGTH), 0.0);
/// assert_eq!(bounded(12.5, MAX_LENGTH), 12.5);
/// ```
pub fn bounded(value: f64, max: f64) -> f64 {
    finite_non_negative(value).min(max)
}

/// Parse the numeric prefix of a free-text entry.
///
/// Leading whitespace and an optional sign are accepted, followed by digits
/// with an optional fractional part and exponent. Trailing text (units,
/// labels) is ignored. Returns `None` when no digits are found.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Interpret an arbitrary JSON value as a number, if possible.
fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }
}

/// Deserialize any value into an `f64`, falling back to zero.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value).unwrap_or(0.0))
}

/// Deserialize any value into an `Option<f64>`; unusable values become `None`.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

/// Deserialize a count. Fractions are truncated; negatives and garbage become zero.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = number_from_value(&value).map(finite_non_negative).unwrap_or(0.0);
    Ok(count.trunc().min(f64::from(u32::MAX)) as u32)
}

/// Deserialize a label → number table, dropping entries that are not numeric.
pub fn lenient_table<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(label, value)| number_from_value(&value).map(|v| (label, v)))
        .collect())
}

/// Deserialize an optional label → number table (absent or null stays `None`).
pub fn lenient_opt_table<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw.map(|table| {
        table
            .into_iter()
            .filter_map(|(label, value)| number_from_value(&value).map(|v| (label, v)))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "lenient_opt_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "lenient_u32")]
        count: u32,
        #[serde(default, deserialize_with = "lenient_table")]
        table: BTreeMap<String, f64>,
    }

    #[test]
    fn test_finite_non_negative() {
        assert_eq!(finite_non_negative(2.5), 2.5);
        assert_eq!(finite_non_negative(0.0), 0.0);
        assert_eq!(finite_non_negative(-0.1), 0.0);
        assert_eq!(finite_non_negative(f64::INFINITY), 0.0);
        assert_eq!(finite_non_negative(f64::NEG_INFINITY), 0.0);
        assert_eq!(finite_non_negative(f64::NAN), 0.0);
    }

    #[test]
    fn test_bounded() {
        assert_eq!(bounded(3.0e10, MAX_LENGTH), MAX_LENGTH);
        assert_eq!(bounded(f64::MAX, MAX_AMOUNT), MAX_AMOUNT);
        assert_eq!(bounded(1.0e200, MAX_SLOPE_PCT), MAX_SLOPE_PCT);
        assert_eq!(bounded(f64::NAN, MAX_LENGTH), 0.0);
        assert_eq!(bounded(-7.0, MAX_LENGTH), 0.0);
        assert_eq!(bounded(42.0, MAX_LENGTH), 42.0);
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("12"), Some(12.0));
        assert_eq!(parse_leading_number("  3.5"), Some(3.5));
        assert_eq!(parse_leading_number("18 cm"), Some(18.0));
        assert_eq!(parse_leading_number(".5m"), Some(0.5));
        assert_eq!(parse_leading_number("7."), Some(7.0));
        assert_eq!(parse_leading_number("-4kg"), Some(-4.0));
        assert_eq!(parse_leading_number("1e2x"), Some(100.0));
        assert_eq!(parse_leading_number("2e"), Some(2.0));
        assert_eq!(parse_leading_number("3,5"), Some(3.0));
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("cm 15"), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn test_lenient_decoding_accepts_strings_and_garbage() {
        let decoded: Lenient = serde_json::from_str(
            r#"{
                "amount": "12.5", "price": "", "count": "3.9",
                "table": {"IPN 200": "26.2", "bad": "x", "W 8": 31}
            }"#,
        )
        .unwrap();
        assert_eq!(decoded.amount, 12.5);
        assert_eq!(decoded.price, None);
        assert_eq!(decoded.count, 3);
        assert_eq!(decoded.table.len(), 2);
        assert_eq!(decoded.table["IPN 200"], 26.2);
        assert_eq!(decoded.table["W 8"], 31.0);
    }

    #[test]
    fn test_lenient_decoding_defaults_when_missing() {
        let decoded: Lenient = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded.amount, 0.0);
        assert_eq!(decoded.price, None);
        assert_eq!(decoded.count, 0);
        assert!(decoded.table.is_empty());

        let decoded: Lenient = serde_json::from_str(
            r#"{"amount": null, "price": true, "count": -4, "table": null}"#,
        )
        .unwrap();
        assert_eq!(decoded.amount, 0.0);
        assert_eq!(decoded.price, None);
        assert_eq!(decoded.count, 0);
        assert!(decoded.table.is_empty());
    }
}
