//! Skip-if-absent access to decoded content.
//!
//! Every handler reads its content through [`Fields`], so the rule for
//! optional data lives in one place: a field that is missing, falsy or of
//! the wrong type reads as `None` and the corresponding page region is left
//! alone. Wrong-typed fields are logged at `debug`.

use cms_yaml::Value;
use tracing::debug;

use crate::section::Section;

#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    section: Section,
    value: &'a Value,
}

impl<'a> Fields<'a> {
    pub fn new(section: Section, value: &'a Value) -> Self {
        Self { section, value }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    fn field(&self, key: &str) -> Option<&'a Value> {
        self.value.get(key)
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &Value) {
        debug!(
            section = %self.section,
            field = key,
            expected,
            found = found.kind_name(),
            "skipping field"
        );
    }

    /// A string with non-whitespace content.
    pub fn text(&self, key: &str) -> Option<&'a str> {
        match self.field(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            Value::String(_) => None,
            other => {
                self.wrong_type(key, "string", other);
                None
            }
        }
    }

    /// A non-empty scalar rendered as text; numbers and booleans included.
    pub fn display(&self, key: &str) -> Option<String> {
        let value = self.field(key)?;
        match value.to_display_string() {
            Some(text) if !text.trim().is_empty() => Some(text),
            Some(_) => None,
            None => {
                self.wrong_type(key, "scalar", value);
                None
            }
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.field(key)? {
            Value::Number(n) => Some(n.value()),
            other => {
                self.wrong_type(key, "number", other);
                None
            }
        }
    }

    /// Truthiness of the field; missing reads as false.
    pub fn flag(&self, key: &str) -> bool {
        self.field(key).is_some_and(Value::is_truthy)
    }

    pub fn seq(&self, key: &str) -> Option<&'a [Value]> {
        let value = self.field(key)?;
        let items = value.as_sequence();
        if items.is_none() {
            self.wrong_type(key, "sequence", value);
        }
        items
    }

    pub fn nested(&self, key: &str) -> Option<Fields<'a>> {
        let value = self.field(key)?;
        if value.as_mapping().is_some() {
            Some(Fields::new(self.section, value))
        } else {
            self.wrong_type(key, "mapping", value);
            None
        }
    }

    /// Mapping entries of a sequence field. Scalar entries are skipped.
    pub fn entries(&self, key: &str) -> Vec<Fields<'a>> {
        self.seq(key)
            .unwrap_or_default()
            .iter()
            .filter(|item| item.as_mapping().is_some())
            .map(|item| Fields::new(self.section, item))
            .collect()
    }

    /// Whether any of `keys` holds a truthy value.
    pub fn any_present(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.flag(key))
    }
}
