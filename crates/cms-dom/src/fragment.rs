//! Detached node trees used to build new content.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A detached tree of elements and text, inserted by
/// [`Patch::ReplaceChildren`](crate::Patch::ReplaceChildren).
///
/// Built with a small fluent API:
///
/// ```rust
/// use cms_dom::Fragment;
///
/// let link = Fragment::element("a")
///     .attr("href", "/about")
///     .class("nav-link")
///     .with_text("About");
/// assert_eq!(link.text_content(), "About");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Element {
        name: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        attributes: IndexMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Fragment>,
    },
    Text {
        text: String,
    },
}

impl Fragment {
    pub fn element(name: impl Into<String>) -> Self {
        Fragment::Element {
            name: name.into().to_ascii_lowercase(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Fragment::Text { text: text.into() }
    }

    /// Set an attribute. No-op on text fragments.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Fragment::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, class: &str) -> Self {
        if let Fragment::Element { attributes, .. } = &mut self {
            let merged = match attributes.get("class") {
                Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
                _ => class.to_string(),
            };
            attributes.insert("class".to_string(), merged);
        }
        self
    }

    pub fn child(mut self, child: Fragment) -> Self {
        if let Fragment::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Fragment::text(text))
    }

    /// Concatenated text of this fragment and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Fragment::Text { text } => text.clone(),
            Fragment::Element { children, .. } => {
                children.iter().map(Fragment::text_content).collect()
            }
        }
    }
}
