//! JSON field extraction shared by the provider parsers.
//!
//! Providers are inconsistent about numbers: the same field may arrive as a
//! JSON number in one response and a string in the next. These helpers
//! accept both, map missing/null to `None`, and reject anything that does
//! not parse instead of letting it leak into later arithmetic.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use super::ParseError;

/// Walk `path` into `body`; missing keys and explicit nulls both give `None`
pub fn lookup<'a>(body: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = body;
    for key in path {
        current = current.get(key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

fn field_name(path: &[&str]) -> String {
    path.join(".")
}

fn invalid(field: impl Into<String>, value: &Value) -> ParseError {
    ParseError::InvalidNumericField {
        field: field.into(),
        value: value.to_string(),
    }
}

fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Convert a JSON number or numeric string to `Decimal`
pub fn decimal_value(field: &str, value: &Value) -> Result<Decimal, ParseError> {
    let parsed = match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(field, value))
}

/// Optional decimal at `path`
pub fn decimal_at(body: &Value, path: &[&str]) -> Result<Option<Decimal>, ParseError> {
    lookup(body, path)
        .map(|value| decimal_value(&field_name(path), value))
        .transpose()
}

/// Optional non-negative integer count at `path`
pub fn count_at(body: &Value, path: &[&str]) -> Result<Option<u64>, ParseError> {
    let Some(value) = lookup(body, path) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| invalid(field_name(path), value))
}

/// Optional non-empty string at `path`
pub fn string_at(body: &Value, path: &[&str]) -> Option<String> {
    lookup(body, path)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
