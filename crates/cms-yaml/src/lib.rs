//! # cms-yaml
//!
//! Decoder for the small, line-oriented YAML dialect that site content files
//! are written in.
//!
//! The dialect covers what a human editing a content file actually writes:
//! flat `key: value` pairs, nested mappings opened by an empty value,
//! sequences of scalars, sequences of (multi-key) objects, `[]` / `{}`
//! literals, comments, and wrapped string values continued on the next line.
//! It is deliberately not a general YAML implementation.
//!
//! ## Design
//!
//! Decoding never fails. Lines that do not fit the dialect are dropped (and
//! reported at `trace` level), so the worst outcome of a malformed file is a
//! value with fewer keys than intended. The top level is always a mapping.
//!
//! ## Example
//!
//! ```rust
//! use cms_yaml::{decode, Value};
//!
//! let value = decode("title: Welcome\nbuttons:\n  - text: Call us\n    link: /contact\n");
//! assert_eq!(value.get("title").and_then(Value::as_str), Some("Welcome"));
//! assert_eq!(value.get("buttons").and_then(Value::as_sequence).map(<[_]>::len), Some(1));
//! ```

mod decoder;
mod scalar;
mod value;

pub use decoder::decode;
pub use scalar::format_number;
pub use value::{Mapping, Number, Value};

use std::path::Path;

/// Read and decode a content file from disk.
///
/// Only the read can fail; decoding itself is total.
pub fn decode_file(path: impl AsRef<Path>) -> std::io::Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(decode(&content))
}
