//! # cms-dom
//!
//! A small, queryable, mutable page tree.
//!
//! The content loader never touches a live browser document. Instead it
//! reads a [`Document`] snapshot, decides what should change, and emits a
//! list of [`Patch`]es. The host (the CLI, a test, or a browser shim) then
//! applies the patches. This crate provides both halves: the tree with its
//! selector queries, and the patch vocabulary.
//!
//! ## Supported selectors
//!
//! A descendant chain of compound selectors, each made of an optional tag
//! name followed by any number of `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `:first-child` and `:nth-child(n)` parts:
//!
//! ```rust
//! use cms_dom::{Document, Fragment};
//!
//! let mut doc = Document::from_fragments(vec![
//!     Fragment::element("section")
//!         .attr("id", "about")
//!         .child(Fragment::element("h2").class("section-title").with_text("About")),
//! ]);
//! let title = doc.query("#about .section-title").unwrap().unwrap();
//! doc.set_text(title, "About us").unwrap();
//! assert_eq!(doc.text(title), "About us");
//! ```

mod document;
mod error;
mod fragment;
mod html;
mod node;
mod patch;
mod selector;

pub use document::Document;
pub use error::{DomError, Result};
pub use fragment::Fragment;
pub use node::{ElementData, Node, NodeData, NodeId};
pub use patch::Patch;
pub use selector::Selector;
