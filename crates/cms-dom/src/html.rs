/*
 * html.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Lenient HTML reading and serialization for page documents.
 */

//! HTML input and output.
//!
//! Reading goes through html5ever, so pages get the same error recovery a
//! browser applies: character references of every kind are resolved, a
//! bare `<` or `&` in text stays text, void and raw-text elements are
//! handled and missing `head`/`body` elements are inserted. The rcdom tree
//! is then copied into the document arena. Whitespace text is kept as-is
//! so a page that goes through read and write unchanged stays close to its
//! source.

use std::fmt::Write;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as DomNode, RcDom};
use tracing::trace;

use crate::document::Document;
use crate::node::{ElementData, NodeData, NodeId};

impl Document {
    /// Read an HTML page. Malformed markup is recovered from, never
    /// rejected.
    pub fn parse_html(source: &str) -> Document {
        let dom = parse_document(RcDom::default(), Default::default()).one(source);
        let mut document = Document::new();
        let root = document.root();
        for child in dom.document.children.borrow().iter() {
            copy_node(&mut document, root, child);
        }
        document
    }

    /// Serialize the whole document, doctype included.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = self.doctype() {
            let _ = write!(out, "<!DOCTYPE {}>", doctype);
        }
        for child in self.children(self.root()) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Serialize one node including its own tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize a node's children.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self.element(id).is_some_and(ElementData::is_raw_text);
        for child in self.children(id) {
            if raw {
                out.push_str(&self.text(*child));
            } else {
                self.write_node(*child, &mut out);
            }
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
            }
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Comment(text) => {
                let _ = write!(out, "<!--{}-->", text);
            }
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.name);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
                }
                out.push('>');
                if element.is_void() {
                    return;
                }
                out.push_str(&self.inner_html(id));
                let _ = write!(out, "</{}>", element.name);
            }
        }
    }
}

/// Copy one rcdom node and its subtree under `parent`.
fn copy_node(document: &mut Document, parent: NodeId, handle: &Handle) {
    match &handle.data {
        DomNode::Doctype { name, .. } => {
            document.doctype = Some(name.to_string());
        }
        DomNode::Text { contents } => {
            let text = contents.borrow();
            if !text.is_empty() {
                document.append(parent, NodeData::Text(text.to_string()));
            }
        }
        DomNode::Comment { contents } => {
            document.append(parent, NodeData::Comment(contents.to_string()));
        }
        DomNode::Element { name, attrs, .. } => {
            let mut element = ElementData::new(&*name.local);
            for attribute in attrs.borrow().iter() {
                let key = match &attribute.name.prefix {
                    Some(prefix) => format!("{}:{}", prefix, attribute.name.local),
                    None => attribute.name.local.to_string(),
                };
                element.attributes.insert(key, attribute.value.to_string());
            }
            let id = document.append(parent, NodeData::Element(element));
            for child in handle.children.borrow().iter() {
                copy_node(document, id, child);
            }
        }
        DomNode::Document => {
            for child in handle.children.borrow().iter() {
                copy_node(document, parent, child);
            }
        }
        DomNode::ProcessingInstruction { target, .. } => {
            trace!(%target, "dropping processing instruction");
        }
    }
}

fn escape_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn escape_attribute(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fragment;

    const PAGE: &str = r##"<!DOCTYPE html>
<html lang="el">
<head>
<meta charset="utf-8">
<title>Old</title>
<script>if (a < b && c) { run(); }</script>
</head>
<body>
<nav><ul class="nav-menu"><li><a href="#home">Home</a></li></ul></nav>
<p>Fish &amp; chips&nbsp;&copy; 2024</p>
<img src="logo.png" alt="Logo">
<input disabled>
</body>
</html>"##;

    #[test]
    fn test_reads_html_allowances() {
        let doc = Document::parse_html(PAGE);
        assert_eq!(doc.doctype(), Some("html"));

        let title = doc.query("head title").unwrap().unwrap();
        assert_eq!(doc.text(title), "Old");

        let script = doc.query("script").unwrap().unwrap();
        assert_eq!(doc.text(script), "if (a < b && c) { run(); }");

        let paragraph = doc.query("body p").unwrap().unwrap();
        assert_eq!(doc.text(paragraph), "Fish & chips\u{a0}\u{a9} 2024");

        // Void elements do not swallow their following siblings.
        let img = doc.query("img").unwrap().unwrap();
        assert!(doc.children(img).is_empty());
        let input = doc.query("body input").unwrap().unwrap();
        assert_eq!(doc.attribute(input, "disabled"), Some(""));
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let doc = Document::parse_html("<div><p>a</span>b</p></div>");
        let paragraph = doc.query("div p").unwrap().unwrap();
        assert_eq!(doc.text(paragraph), "ab");
    }

    #[test]
    fn test_bare_ampersand_is_kept() {
        let doc = Document::parse_html("<p>A & B</p>");
        let paragraph = doc.query("p").unwrap().unwrap();
        assert_eq!(doc.text(paragraph), "A & B");
    }

    #[test]
    fn test_write_escapes_text_and_attributes() {
        let doc = Document::from_fragments(vec![
            Fragment::element("a")
                .attr("href", "/q?a=1&b=\"2\"")
                .with_text("<Tom & Jerry>"),
            Fragment::element("br"),
        ]);
        insta::assert_snapshot!(
            doc.to_html(),
            @r#"<a href="/q?a=1&amp;b=&quot;2&quot;">&lt;Tom &amp; Jerry&gt;</a><br>"#
        );
    }

    #[test]
    fn test_read_write_keeps_structure() {
        let source = "<!DOCTYPE html><html><head></head><body><!-- note --><div id=\"x\" class=\"a b\">Hi<br>there</div><script>x < 1</script></body></html>";
        let doc = Document::parse_html(source);
        assert_eq!(doc.to_html(), source);
    }

    #[test]
    fn test_inner_and_outer_html() {
        let doc = Document::parse_html("<ul><li><a href=\"#a\">A</a></li></ul>");
        let list = doc.query("ul").unwrap().unwrap();
        assert_eq!(doc.inner_html(list), "<li><a href=\"#a\">A</a></li>");
        let link = doc.query("a").unwrap().unwrap();
        assert_eq!(doc.outer_html(link), "<a href=\"#a\">A</a>");
    }

    #[test]
    fn test_unlisted_references_are_resolved_once() {
        let doc = Document::parse_html("<p>Caf&eacute; &copy; 2025 &#8364;5</p>");
        let paragraph = doc.query("p").unwrap().unwrap();
        assert_eq!(doc.text(paragraph), "Caf\u{e9} \u{a9} 2025 \u{20ac}5");
        assert_eq!(doc.outer_html(paragraph), "<p>Caf\u{e9} \u{a9} 2025 \u{20ac}5</p>");
    }

    #[test]
    fn test_bare_less_than_stays_text() {
        let doc = Document::parse_html("<div><p>Price < 10</p><p>a < b</p></div>");
        let div = doc.query("div").unwrap().unwrap();
        assert_eq!(doc.element_children(div).len(), 2);
        insta::assert_snapshot!(doc.inner_html(div), @"<p>Price &lt; 10</p><p>a &lt; b</p>");
    }

    #[test]
    fn test_untouched_regions_survive_a_rewrite() {
        let source = "<!DOCTYPE html><html><head><title>T</title></head><body><footer><p>&copy; Caf&eacute; &amp; Co</p></footer></body></html>";
        let once = Document::parse_html(source).to_html();
        let twice = Document::parse_html(&once).to_html();
        assert_eq!(once, twice);
        assert!(once.contains("<p>\u{a9} Caf\u{e9} &amp; Co</p>"));
    }
}
