//! Error types for page trees.

use thiserror::Error;

/// Result type alias for cms-dom operations.
pub type Result<T> = std::result::Result<T, DomError>;

/// Errors that can occur while parsing selectors or changing a document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    /// A selector string is not in the supported subset.
    #[error("Invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    /// A node id that does not belong to this document.
    #[error("No node with id {0}")]
    UnknownNode(usize),

    /// An element-only operation was applied to a text or comment node.
    #[error("Node {0} is not an element")]
    NotAnElement(usize),
}
