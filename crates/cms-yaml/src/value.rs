//! Decoded value tree.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::scalar::format_number;

/// An ordered mapping from key to value. Insertion order is the file order.
pub type Mapping = IndexMap<String, Value>;

/// A decoded content value.
///
/// There is no null: an empty nested block decodes to an empty mapping.
/// Serializes to the equivalent JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// A number together with the text it was written as.
///
/// Equality and serialization use the numeric value; display uses the
/// source text, so `+30210` or `0030` render the way the editor typed them.
#[derive(Debug, Clone)]
pub struct Number {
    value: f64,
    source: String,
}

impl Number {
    pub fn new(value: f64, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::new(value, format_number(value))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

impl Value {
    /// An empty mapping, the result of decoding an empty file.
    pub fn empty_mapping() -> Self {
        Value::Mapping(Mapping::new())
    }

    /// Look up a key if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Look up a dotted path of mapping keys, e.g. `address.street`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |value, key| value.get(key))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.value()),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    /// Truthiness as page scripts understand it: `false`, `0`, NaN and the
    /// empty string are falsy; every container (even an empty one) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => n.value() != 0.0 && !n.value().is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(_) | Value::Mapping(_) => true,
        }
    }

    /// Text of a scalar as it would be displayed. Numbers keep the text
    /// they were written as. `None` for containers.
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.source().to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n.source()),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Mapping(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Mapping(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path() {
        let address: Value = [("street", "Main St")].into_iter().collect();
        let root: Value = [("address", address)].into_iter().collect();
        assert_eq!(
            root.get_path("address.street").and_then(Value::as_str),
            Some("Main St")
        );
        assert!(root.get_path("address.city").is_none());
        assert!(root.get_path("address.street.more").is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Sequence(Vec::new()).is_truthy());
        assert!(Value::empty_mapping().is_truthy());
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::from(2009.0).to_display_string().as_deref(), Some("2009"));
        let phone = Value::Number(Number::new(302101234567.0, "+302101234567"));
        assert_eq!(phone.to_display_string().as_deref(), Some("+302101234567"));
        assert_eq!(phone, Value::from(302101234567.0));
        assert_eq!(Value::Bool(true).to_display_string().as_deref(), Some("true"));
        assert_eq!(Value::Sequence(Vec::new()).to_display_string(), None);
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let value: Value = [
            ("a", Value::from(1.0)),
            ("b", Value::Bool(true)),
            ("c", Value::Sequence(vec!["x".into()])),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"a":1.0,"b":true,"c":["x"]}"#);
    }

    #[test]
    fn test_display_nested() {
        let value: Value = [("tags", Value::Sequence(vec!["a".into(), "b".into()]))]
            .into_iter()
            .collect();
        assert_eq!(value.to_string(), "{tags: [a, b]}");
    }
}
