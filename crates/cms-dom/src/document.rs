/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Arena-backed page tree with selector queries and in-place updates.
 */

//! The page tree.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`].
//! Replacing children detaches the old nodes but leaves them in the arena,
//! so ids handed out earlier never dangle; detached nodes are simply
//! unreachable from the root.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{DomError, Result};
use crate::fragment::Fragment;
use crate::node::{ElementData, Node, NodeData, NodeId};
use crate::patch::Patch;
use crate::selector::Selector;

const ROOT: NodeId = NodeId(0);

/// A page snapshot: the node tree plus page-level script variables.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Values published to page scripts (e.g. the hero title the typewriter
    /// effect types out).
    variables: IndexMap<String, String>,
    pub(crate) doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            variables: IndexMap::new(),
            doctype: None,
        }
    }

    /// Build a document whose top-level nodes are the given fragments.
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        let mut document = Self::new();
        for fragment in &fragments {
            document.append_fragment(ROOT, fragment);
        }
        document
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).and_then(Node::as_element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Element children only, skipping text and comments.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    /// 1-based position among the parent's element children.
    pub fn element_position(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.element_children(parent)
            .iter()
            .position(|sibling| *sibling == id)
            .map(|index| index + 1)
    }

    /// All descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Every element matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.select_within(ROOT, selector)
    }

    /// Matching descendants of `scope`. As with the browser's
    /// `element.querySelectorAll`, ancestors outside `scope` may satisfy the
    /// leading parts of the selector.
    pub fn select_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    /// Parse `selector` and return the first match.
    pub fn query(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector).into_iter().next())
    }

    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector))
    }

    /// Text content: the concatenated text of all descendant text nodes.
    pub fn text(&self, id: NodeId) -> String {
        match self.node(id).map(|node| &node.data) {
            Some(NodeData::Text(text)) => text.clone(),
            Some(NodeData::Comment(_)) | None => String::new(),
            Some(NodeData::Document | NodeData::Element(_)) => self
                .descendants(id)
                .into_iter()
                .filter_map(|child| match &self.nodes[child.0].data {
                    NodeData::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    /// False when the element (or an ancestor) is hidden with
    /// `display: none` or the `hidden` attribute.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(element) = self.element(node) {
                if element.attribute("hidden").is_some()
                    || element.attribute("style").is_some_and(hides_display)
                {
                    return false;
                }
            }
            current = self.parent(node);
        }
        true
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn variables(&self) -> &IndexMap<String, String> {
        &self.variables
    }

    /// Replace an element's children with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(existing) | NodeData::Comment(existing) => {
                *existing = text.to_string();
                return Ok(());
            }
            NodeData::Document | NodeData::Element(_) => {}
        }
        self.detach_children(id);
        if !text.is_empty() {
            self.append(id, NodeData::Text(text.to_string()));
        }
        Ok(())
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        element
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        element.attributes.shift_remove(name);
        Ok(())
    }

    /// Clear an element and append the given fragments in order.
    pub fn replace_children(&mut self, id: NodeId, fragments: &[Fragment]) -> Result<()> {
        self.element_mut(id)?;
        self.detach_children(id);
        for fragment in fragments {
            self.append_fragment(id, fragment);
        }
        Ok(())
    }

    /// Show or hide an element through its inline `display` style.
    ///
    /// Hiding replaces any existing `display` declaration with
    /// `display: none`; showing removes `display` declarations and the
    /// `hidden` attribute.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let element = self.element_mut(id)?;
        let mut declarations: Vec<String> = element
            .attribute("style")
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|decl| !decl.is_empty() && !is_display_declaration(decl))
            .map(str::to_string)
            .collect();

        if visible {
            element.attributes.shift_remove("hidden");
        } else {
            declarations.push("display: none".to_string());
        }

        if declarations.is_empty() {
            element.attributes.shift_remove("style");
        } else {
            element
                .attributes
                .insert("style".to_string(), declarations.join("; "));
        }
        Ok(())
    }

    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    /// Apply one patch.
    pub fn apply(&mut self, patch: &Patch) -> Result<()> {
        debug!(op = patch.op_name(), target = ?patch.target(), "applying patch");
        match patch {
            Patch::SetText { node, text } => self.set_text(*node, text),
            Patch::SetAttribute { node, name, value } => self.set_attribute(*node, name, value),
            Patch::ReplaceChildren { node, children } => self.replace_children(*node, children),
            Patch::SetVisible { node, visible } => self.set_visible(*node, *visible),
            Patch::SetVariable { name, value } => {
                self.set_variable(name, value);
                Ok(())
            }
        }
    }

    /// Apply patches in order, stopping at the first failure.
    pub fn apply_all<'a>(&mut self, patches: impl IntoIterator<Item = &'a Patch>) -> Result<()> {
        for patch in patches {
            self.apply(patch)?;
        }
        Ok(())
    }

    /// Append a fragment under `parent`, returning the new node.
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &Fragment) -> NodeId {
        match fragment {
            Fragment::Text { text } => self.append(parent, NodeData::Text(text.clone())),
            Fragment::Element {
                name,
                attributes,
                children,
            } => {
                let mut element = ElementData::new(name.as_str());
                element.attributes = attributes.clone();
                let id = self.append(parent, NodeData::Element(element));
                for child in children {
                    self.append_fragment(id, child);
                }
                id
            }
        }
    }

    pub(crate) fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(data);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    fn detach_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(DomError::UnknownNode(id.0))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id.0)),
        }
    }
}

fn is_display_declaration(declaration: &str) -> bool {
    declaration
        .split(':')
        .next()
        .is_some_and(|property| property.trim().eq_ignore_ascii_case("display"))
}

fn hides_display(style: &str) -> bool {
    style.split(';').any(|decl| {
        let mut parts = decl.splitn(2, ':');
        let property = parts.next().unwrap_or("").trim();
        let value = parts.next().unwrap_or("").trim();
        property.eq_ignore_ascii_case("display") && value.eq_ignore_ascii_case("none")
    })
}
