/*
 * decoder.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Indentation-driven decoder for site content files.
 */

//! Line-oriented decoder.
//!
//! The decoder walks the input once, keeping an explicit stack of open
//! containers ("frames"). Each frame remembers the indentation at which it
//! was opened; before a line is handled, every frame opened at the same or a
//! deeper indentation is closed. This dedent rule is the whole of the
//! nesting logic.
//!
//! Containers live in an arena (`Vec<Slot>`) and refer to their children by
//! index. A nested block opened by `key:` starts as an empty mapping and is
//! turned into a sequence in place if its first line is a `- ` item, which
//! is how `key:\n  - a` becomes a sequence without look-ahead.

use indexmap::IndexMap;
use tracing::trace;

use crate::Value;
use crate::scalar::{RawValue, classify, item_text};

type SlotId = usize;

const ROOT: SlotId = 0;

#[derive(Debug)]
enum Slot {
    Mapping(IndexMap<String, SlotId>),
    Sequence {
        items: Vec<SlotId>,
        /// Indentation of the first item; deeper items would be nested
        /// sequences, which the dialect does not have.
        item_indent: Option<usize>,
    },
    Scalar(Value),
}

#[derive(Debug)]
struct Frame {
    slot: SlotId,
    indent: usize,
    last_key: Option<String>,
}

/// Decode a content file into a [`Value`].
///
/// Never fails: lines that do not fit the dialect are skipped. The result is
/// always a mapping, empty for empty input.
pub fn decode(text: &str) -> Value {
    // A byte-order mark is not part of the first key.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut decoder = Decoder::new();
    for (index, line) in text.lines().enumerate() {
        decoder.line(index + 1, line);
    }
    decoder.finish()
}

struct Decoder {
    slots: Vec<Slot>,
    frames: Vec<Frame>,
    line_number: usize,
}

impl Decoder {
    fn new() -> Self {
        Self {
            slots: vec![Slot::Mapping(IndexMap::new())],
            frames: vec![Frame {
                slot: ROOT,
                indent: 0,
                last_key: None,
            }],
            line_number: 0,
        }
    }

    fn line(&mut self, line_number: usize, raw: &str) {
        self.line_number = line_number;

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        self.dedent(indent);

        if trimmed == "-" || trimmed.starts_with("- ") {
            self.sequence_item(indent, trimmed);
        } else if let Some((key, value)) = split_key_value(trimmed) {
            self.key_value(indent, key, value);
        } else if !trimmed.contains(':') {
            self.continuation(trimmed);
        } else {
            self.skip(trimmed, "not a key, item or continuation");
        }
    }

    /// Close every frame opened at `indent` or deeper. The root stays.
    fn dedent(&mut self, indent: usize) {
        while self.frames.len() > 1 {
            match self.frames.last() {
                Some(frame) if frame.indent >= indent => {
                    self.frames.pop();
                }
                _ => break,
            }
        }
    }

    fn key_value(&mut self, key_column: usize, key: &str, raw: &str) {
        let frame_index = self.frames.len() - 1;
        let container = self.frames[frame_index].slot;
        if !matches!(self.slots[container], Slot::Mapping(_)) {
            self.skip(key, "key inside a sequence");
            return;
        }

        let (child, nested) = match classify(raw) {
            RawValue::Nested => (self.alloc(Slot::Mapping(IndexMap::new())), true),
            RawValue::EmptySequence => (
                self.alloc(Slot::Sequence {
                    items: Vec::new(),
                    item_indent: None,
                }),
                false,
            ),
            RawValue::Scalar(value) => (self.alloc(Slot::Scalar(value)), false),
        };

        if let Slot::Mapping(map) = &mut self.slots[container] {
            map.insert(key.to_string(), child);
        }
        self.frames[frame_index].last_key = Some(key.to_string());

        if nested {
            self.frames.push(Frame {
                slot: child,
                indent: key_column,
                last_key: None,
            });
        }
    }

    fn sequence_item(&mut self, indent: usize, trimmed: &str) {
        let after_marker = trimmed[1..].trim_start();
        let rest = after_marker.trim_end();

        if rest.is_empty() {
            self.skip(trimmed, "empty sequence item");
            return;
        }
        if rest == "-" || rest.starts_with("- ") {
            self.skip(trimmed, "nested sequences are not supported");
            return;
        }

        let Some(sequence) = self.open_sequence() else {
            self.skip(trimmed, "sequence item without a key");
            return;
        };

        let too_deep = match &mut self.slots[sequence] {
            Slot::Sequence { item_indent, .. } => match *item_indent {
                None => {
                    *item_indent = Some(indent);
                    false
                }
                Some(first) => indent > first,
            },
            _ => false,
        };
        if too_deep {
            self.skip(trimmed, "nested sequences are not supported");
            return;
        }

        if let Some((key, raw)) = split_key_value(rest) {
            let object = self.alloc(Slot::Mapping(IndexMap::new()));
            self.push_item(sequence, object);
            self.frames.push(Frame {
                slot: object,
                indent,
                last_key: None,
            });
            let offset = trimmed.len() - after_marker.len();
            let key_column = indent + trimmed[..offset].chars().count();
            self.key_value(key_column, key, raw);
        } else {
            let item = self.alloc(Slot::Scalar(Value::String(item_text(rest))));
            self.push_item(sequence, item);
        }
    }

    /// Find (or create) the sequence an item line belongs to.
    fn open_sequence(&mut self) -> Option<SlotId> {
        let depth = self.frames.len();
        let frame = self.frames.last()?;
        let slot = frame.slot;
        let pending_block = depth > 1 && frame.last_key.is_none();
        let last_key = frame.last_key.clone();

        let current = match &self.slots[slot] {
            Slot::Sequence { .. } => return Some(slot),
            Slot::Scalar(_) => return None,
            // A block just opened by `key:` whose first line is an item.
            Slot::Mapping(map) if map.is_empty() && pending_block => None,
            Slot::Mapping(map) => Some(map.get(last_key.as_deref()?).copied()),
        };

        let Some(current) = current else {
            self.slots[slot] = empty_sequence();
            return Some(slot);
        };

        let reusable = current.filter(|&id| match &self.slots[id] {
            Slot::Sequence { .. } => true,
            Slot::Mapping(inner) => inner.is_empty(),
            Slot::Scalar(_) => false,
        });

        match reusable {
            Some(id) => {
                if matches!(self.slots[id], Slot::Mapping(_)) {
                    self.slots[id] = empty_sequence();
                }
                Some(id)
            }
            None => {
                let key = last_key?;
                let id = self.alloc(empty_sequence());
                if let Slot::Mapping(map) = &mut self.slots[slot] {
                    map.insert(key, id);
                }
                Some(id)
            }
        }
    }

    fn continuation(&mut self, trimmed: &str) {
        let target = self.frames.last().and_then(|frame| {
            let key = frame.last_key.as_ref()?;
            match &self.slots[frame.slot] {
                Slot::Mapping(map) => map.get(key).copied(),
                _ => None,
            }
        });

        if let Some(Slot::Scalar(Value::String(text))) = target.map(|id| &mut self.slots[id]) {
            text.push(' ');
            text.push_str(trimmed);
            return;
        }
        self.skip(trimmed, "continuation without a string to extend");
    }

    fn alloc(&mut self, slot: Slot) -> SlotId {
        self.slots.push(slot);
        self.slots.len() - 1
    }

    fn push_item(&mut self, sequence: SlotId, item: SlotId) {
        if let Slot::Sequence { items, .. } = &mut self.slots[sequence] {
            items.push(item);
        }
    }

    fn skip(&self, content: &str, reason: &str) {
        trace!(line = self.line_number, content, reason, "skipping line");
    }

    fn finish(mut self) -> Value {
        self.take(ROOT)
    }

    fn take(&mut self, id: SlotId) -> Value {
        match std::mem::replace(&mut self.slots[id], Slot::Scalar(Value::Bool(false))) {
            Slot::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, child)| (key, self.take(child)))
                    .collect(),
            ),
            Slot::Sequence { items, .. } => {
                Value::Sequence(items.into_iter().map(|child| self.take(child)).collect())
            }
            Slot::Scalar(value) => value,
        }
    }
}

fn empty_sequence() -> Slot {
    Slot::Sequence {
        items: Vec::new(),
        item_indent: None,
    }
}

/// Split `key: value` (or a bare `key:`) into trimmed parts.
fn split_key_value(trimmed: &str) -> Option<(&str, &str)> {
    let (key, value) = match trimmed.find(": ") {
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 2..]),
        None => (trimmed.strip_suffix(':')?, ""),
    };
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
