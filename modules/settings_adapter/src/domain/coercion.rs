//! Best-effort conversion of stored values into requested kinds
//!
//! One function per target kind. `None` stands for a key that was never
//! written and always converts to the target's zero value.
//!
//! | target    | numeric source              | string source                  |
//! |-----------|-----------------------------|--------------------------------|
//! | string    | decimal rendering           | verbatim                       |
//! | integer   | floats truncate toward zero | integer literal                |
//! | float     | integers widen              | float literal                  |
//! | bool      | zero is false               | `true`/`false`/`t`/`f`/`1`/`0` |
//! | timestamp | integers are Unix seconds   | common timestamp layouts       |

use crate::contract::{ConversionError, Value, ValueKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Layouts carrying an explicit UTC offset
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
];

/// Layouts without an offset, interpreted as UTC
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%a %b %e %H:%M:%S %Y",
];

/// Date-only layouts, midnight UTC
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d %b %Y"];

fn unconvertible(value: &Value, to: ValueKind) -> ConversionError {
    ConversionError {
        value: to_string(Some(value)),
        from: value.kind(),
        to,
    }
}

/// Render any stored value as a string
///
/// Every kind has a rendering, so this never fails.
pub fn to_string(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Int(v)) => v.to_string(),
        Some(Value::Float(v)) => v.to_string(),
        Some(Value::Bool(v)) => v.to_string(),
        Some(Value::Time(v)) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    }
}

pub fn to_int(value: Option<&Value>) -> Result<i64, ConversionError> {
    let Some(value) = value else {
        return Ok(0);
    };
    match value {
        Value::Int(v) => Ok(*v),
        Value::Float(v) => float_to_int(*v).ok_or_else(|| unconvertible(value, ValueKind::Int)),
        Value::Bool(v) => Ok(i64::from(*v)),
        Value::String(s) => {
            parse_int_literal(s.trim()).ok_or_else(|| unconvertible(value, ValueKind::Int))
        }
        Value::Time(_) => Err(unconvertible(value, ValueKind::Int)),
    }
}

pub fn to_float(value: Option<&Value>) -> Result<f64, ConversionError> {
    let Some(value) = value else {
        return Ok(0.0);
    };
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        Value::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| unconvertible(value, ValueKind::Float)),
        Value::Time(_) => Err(unconvertible(value, ValueKind::Float)),
    }
}

pub fn to_bool(value: Option<&Value>) -> Result<bool, ConversionError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value {
        Value::Bool(v) => Ok(*v),
        Value::Int(v) => Ok(*v != 0),
        Value::Float(v) => Ok(*v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => Ok(true),
            "0" | "f" | "false" => Ok(false),
            _ => Err(unconvertible(value, ValueKind::Bool)),
        },
        Value::Time(_) => Err(unconvertible(value, ValueKind::Bool)),
    }
}

/// Absent keys read as `DateTime::<Utc>::default()`, the Unix epoch
pub fn to_time(value: Option<&Value>) -> Result<DateTime<Utc>, ConversionError> {
    let Some(value) = value else {
        return Ok(DateTime::<Utc>::default());
    };
    match value {
        Value::Time(v) => Ok(*v),
        Value::Int(v) => {
            DateTime::from_timestamp(*v, 0).ok_or_else(|| unconvertible(value, ValueKind::Time))
        }
        Value::String(s) => {
            parse_timestamp(s.trim()).ok_or_else(|| unconvertible(value, ValueKind::Time))
        }
        Value::Float(_) | Value::Bool(_) => Err(unconvertible(value, ValueKind::Time)),
    }
}

/// Truncate toward zero; `None` unless the result fits in an `i64`
fn float_to_int(v: f64) -> Option<i64> {
    let truncated = v.trunc();
    // i64::MAX as f64 rounds up to 2^63, which itself is out of range
    (truncated >= i64::MIN as f64 && truncated < i64::MAX as f64).then_some(truncated as i64)
}

/// Drop a fractional part made only of zeros: `"42.00"` reads as `"42"`
fn trim_zero_decimal(s: &str) -> &str {
    match s.split_once('.') {
        Some((int, frac)) if !int.is_empty() && !frac.is_empty() && frac.bytes().all(|b| b == b'0') => {
            int
        }
        _ => s,
    }
}

/// Signed integer literal with optional `0x`, `0o` or `0b` radix prefix
fn parse_int_literal(s: &str) -> Option<i64> {
    let s = trim_zero_decimal(s);
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        Some("0o" | "0O") => (8, &unsigned[2..]),
        Some("0b" | "0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    // from_str_radix accepts its own sign, which would allow "--1"
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(s, layout).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
    {
        return Some(naive.and_utc());
    }
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
