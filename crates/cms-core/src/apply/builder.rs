//! Collects patches for one section against a document snapshot.

use cms_dom::{Document, Fragment, NodeId, Patch, Selector};
use tracing::{debug, warn};

use crate::section::Section;

/// Resolves selectors on a read-only snapshot and records the patches a
/// handler asks for. A selector that matches nothing is not an error: the
/// page simply lacks that region and the field is dropped.
pub(crate) struct PatchBuilder<'d> {
    document: &'d Document,
    section: Section,
    patches: Vec<Patch>,
}

impl<'d> PatchBuilder<'d> {
    pub(crate) fn new(document: &'d Document, section: Section) -> Self {
        Self {
            document,
            section,
            patches: Vec::new(),
        }
    }

    /// First element matching `selector` anywhere in the page.
    pub(crate) fn find(&self, selector: &str) -> Option<NodeId> {
        self.find_in(self.document.root(), selector)
    }

    /// First element matching `selector` inside `scope`.
    pub(crate) fn find_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(section = %self.section, error = %e, "invalid selector");
                return None;
            }
        };
        let found = self.document.select_within(scope, &parsed).into_iter().next();
        if found.is_none() {
            debug!(section = %self.section, selector, "no element matches");
        }
        found
    }

    pub(crate) fn set_text(&mut self, selector: &str, text: &str) {
        if let Some(node) = self.find(selector) {
            self.set_text_at(node, text);
        }
    }

    pub(crate) fn set_text_at(&mut self, node: NodeId, text: &str) {
        self.patches.push(Patch::SetText {
            node,
            text: text.to_string(),
        });
    }

    pub(crate) fn set_attribute(&mut self, selector: &str, name: &str, value: &str) {
        if let Some(node) = self.find(selector) {
            self.set_attribute_at(node, name, value);
        }
    }

    pub(crate) fn set_attribute_at(&mut self, node: NodeId, name: &str, value: &str) {
        self.patches.push(Patch::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub(crate) fn replace_children(&mut self, selector: &str, children: Vec<Fragment>) {
        if let Some(node) = self.find(selector) {
            self.patches.push(Patch::ReplaceChildren { node, children });
        }
    }

    pub(crate) fn set_visible_at(&mut self, node: NodeId, visible: bool) {
        self.patches.push(Patch::SetVisible { node, visible });
    }

    pub(crate) fn set_variable(&mut self, name: &str, value: &str) {
        self.patches.push(Patch::SetVariable {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    pub(crate) fn finish(self) -> Vec<Patch> {
        self.patches
    }
}
