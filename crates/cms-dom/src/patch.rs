//! The vocabulary of page updates.

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;
use crate::node::NodeId;

/// One change to a [`Document`](crate::Document).
///
/// Node ids refer to the snapshot the patch was computed from. Patches
/// never remove or reorder existing nodes other than through
/// `ReplaceChildren`, so ids of unrelated nodes stay valid while a patch
/// list is being applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    SetText {
        node: NodeId,
        text: String,
    },
    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },
    ReplaceChildren {
        node: NodeId,
        children: Vec<Fragment>,
    },
    SetVisible {
        node: NodeId,
        visible: bool,
    },
    /// Publish a value to page scripts.
    SetVariable {
        name: String,
        value: String,
    },
}

impl Patch {
    /// The node this patch touches, if any.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Patch::SetText { node, .. }
            | Patch::SetAttribute { node, .. }
            | Patch::ReplaceChildren { node, .. }
            | Patch::SetVisible { node, .. } => Some(*node),
            Patch::SetVariable { .. } => None,
        }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            Patch::SetText { .. } => "set_text",
            Patch::SetAttribute { .. } => "set_attribute",
            Patch::ReplaceChildren { .. } => "replace_children",
            Patch::SetVisible { .. } => "set_visible",
            Patch::SetVariable { .. } => "set_variable",
        }
    }
}
