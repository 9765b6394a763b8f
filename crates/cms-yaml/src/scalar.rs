//! Scalar handling: quote stripping and type coercion.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{Number, Value};

/// A whole-value decimal number, e.g. `42`, `-1.5`, `.5`, `2e3`.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// How the raw text after `key: ` should be interpreted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
    /// Empty value or `{}`: a nested block follows.
    Nested,
    /// `[]`: an empty sequence, nothing nested.
    EmptySequence,
    /// A leaf value.
    Scalar(Value),
}

/// Remove one matching pair of surrounding quotes, if present.
pub(crate) fn unquote(raw: &str) -> Option<&str> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if (first == '"' || first == '\'') && first == last {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// Quote-stripped text of a sequence item; items are never coerced.
pub(crate) fn item_text(raw: &str) -> String {
    unquote(raw).unwrap_or(raw).to_string()
}

pub(crate) fn classify(raw: &str) -> RawValue {
    match raw {
        "" | "{}" => RawValue::Nested,
        "[]" => RawValue::EmptySequence,
        // One pair of quotes comes off before coercion; `""` is the empty
        // string, not a block.
        _ => RawValue::Scalar(coerce(unquote(raw).unwrap_or(raw))),
    }
}

fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ if NUMBER_RE.is_match(raw) => match raw.parse::<f64>() {
            Ok(n) => Value::Number(Number::new(n, raw)),
            Err(_) => Value::String(raw.to_string()),
        },
        _ => Value::String(raw.to_string()),
    }
}

/// Render a number the way it would appear on the page: integral values
/// without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
