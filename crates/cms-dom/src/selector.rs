/*
 * selector.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The selector subset used to locate page regions.
 */

//! Selector parsing and matching.
//!
//! Only the descendant combinator is supported. Matching walks from the
//! candidate node up through its ancestors, binding each compound to the
//! nearest ancestor that satisfies it; with descendant-only chains the
//! nearest match is always a valid choice, so no backtracking is needed.

use std::fmt;
use std::str::FromStr;

use crate::document::Document;
use crate::error::{DomError, Result};
use crate::node::{ElementData, NodeId};

/// A parsed selector such as `#contact .contact-item:nth-child(2) p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    /// Left to right; each compound must match an ancestor of the next.
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
    position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let compounds = Parser::new(input).parse()?;
        Ok(Self {
            source: input.trim().to_string(),
            compounds,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` matches the whole selector.
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        let Some((last, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !compound_matches(document, node, last) {
            return false;
        }

        let mut current = document.parent(node);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = document.parent(candidate);
                if compound_matches(document, candidate, compound) {
                    break;
                }
            }
        }
        true
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compound_matches(document: &Document, node: NodeId, compound: &Compound) -> bool {
    let Some(element) = document.element(node) else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !element.name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if element.id() != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| element.has_class(c)) {
        return false;
    }
    if !compound
        .attributes
        .iter()
        .all(|attr| attribute_matches(element, attr))
    {
        return false;
    }
    match compound.position {
        Some(position) => document.element_position(node) == Some(position),
        None => true,
    }
}

fn attribute_matches(element: &ElementData, attr: &AttributeMatch) -> bool {
    match (element.attribute(&attr.name), &attr.value) {
        (Some(actual), Some(expected)) => actual == expected,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Vec<Compound>> {
        let mut compounds = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek().is_none() {
                break;
            }
            compounds.push(self.compound()?);
        }
        if compounds.is_empty() {
            return Err(self.error("empty selector"));
        }
        Ok(compounds)
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => {
                self.pos += 1;
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        while let Some(c) = self.peek() {
            match c {
                '#' => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                '.' => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                '[' => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                ':' => {
                    self.pos += 1;
                    compound.position = Some(self.pseudo_class()?);
                }
                c if c.is_whitespace() => break,
                other => return Err(self.error(&format!("unexpected character `{}`", other))),
            }
        }

        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttributeMatch> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        let value = match self.next() {
            Some(']') => None,
            Some('=') => {
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.pos += 1;
                        self.until(quote)?
                    }
                    _ => self.ident()?,
                };
                self.skip_whitespace();
                if self.next() != Some(']') {
                    return Err(self.error("expected `]`"));
                }
                Some(value)
            }
            _ => return Err(self.error("expected `=` or `]`")),
        };
        Ok(AttributeMatch { name, value })
    }

    fn pseudo_class(&mut self) -> Result<usize> {
        let name = self.ident()?;
        match name.as_str() {
            "first-child" => Ok(1),
            "nth-child" => {
                if self.next() != Some('(') {
                    return Err(self.error("expected `(` after nth-child"));
                }
                let digits = self.until(')')?;
                match digits.trim().parse::<usize>() {
                    Ok(n) if n > 0 => Ok(n),
                    _ => Err(self.error("nth-child takes a positive integer")),
                }
            }
            other => Err(self.error(&format!("unsupported pseudo-class `:{}`", other))),
        }
    }

    fn ident(&mut self) -> Result<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a name"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Consume up to and including `end`, returning what came before it.
    fn until(&mut self, end: char) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.next() {
            if c == end {
                return Ok(self.chars[start..self.pos - 1].iter().collect());
            }
        }
        Err(self.error(&format!("missing `{}`", end)))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, message: &str) -> DomError {
        DomError::Selector {
            selector: self.source.to_string(),
            message: message.to_string(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fragment;

    fn sample() -> Document {
        Document::from_fragments(vec![
            Fragment::element("section").attr("id", "contact").child(
                Fragment::element("div")
                    .class("contact-info")
                    .child(
                        Fragment::element("div")
                            .class("contact-item")
                            .child(Fragment::element("p").with_text("street")),
                    )
                    .child(
                        Fragment::element("div")
                            .class("contact-item")
                            .child(Fragment::element("p").with_text("phones")),
                    ),
            ),
            Fragment::element("meta")
                .attr("name", "description")
                .attr("content", "old"),
        ])
    }

    #[test]
    fn test_parse_compound_parts() {
        let selector = Selector::parse("div#main.a.b[data-x=\"1\"]:nth-child(2)").unwrap();
        assert_eq!(selector.compounds.len(), 1);
        let compound = &selector.compounds[0];
        assert_eq!(compound.tag.as_deref(), Some("div"));
        assert_eq!(compound.id.as_deref(), Some("main"));
        assert_eq!(compound.classes, vec!["a", "b"]);
        assert_eq!(compound.attributes[0].value.as_deref(), Some("1"));
        assert_eq!(compound.position, Some(2));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "   ", "div >", ".", "[name", ":hover", ":nth-child(0)", "a[x=\"y]"] {
            assert!(Selector::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_descendant_matching() {
        let doc = sample();
        let found = doc.query_all("#contact p").unwrap();
        assert_eq!(found.len(), 2);
        let texts: Vec<_> = found.iter().map(|id| doc.text(*id)).collect();
        assert_eq!(texts, vec!["street", "phones"]);
    }

    #[test]
    fn test_position_counts_elements_only() {
        let doc = sample();
        let second = doc
            .query(".contact-item:nth-child(2) p")
            .unwrap()
            .unwrap();
        assert_eq!(doc.text(second), "phones");
        let first = doc.query(".contact-item:first-child p").unwrap().unwrap();
        assert_eq!(doc.text(first), "street");
    }

    #[test]
    fn test_attribute_value_match() {
        let doc = sample();
        assert!(doc.query("meta[name=\"description\"]").unwrap().is_some());
        assert!(doc.query("meta[name='keywords']").unwrap().is_none());
        assert!(doc.query("meta[content]").unwrap().is_some());
    }

    #[test]
    fn test_display_round_trips_source() {
        let selector: Selector = "  #about .section-title ".parse().unwrap();
        assert_eq!(selector.to_string(), "#about .section-title");
    }
}
