use log::debug;

use crate::tree::{NavTree, NodeId};

pub const NO_SELECTION_LABEL: &str = "Nothing selected";

/// Tracks the single highlighted node of a navigation tree and the text shown
/// in the selection label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<NodeId>,
    label: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            current: None,
            label: NO_SELECTION_LABEL.to_string(),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Moves the selection to `node`. Returns `false` and leaves everything
    /// untouched when `node` is not a registered click target.
    pub fn on_node_clicked(&mut self, tree: &mut NavTree, node: NodeId) -> bool {
        let Some(label) = tree
            .get(node)
            .filter(|item| item.clickable)
            .map(|item| item.label.clone())
        else {
            debug!("ignoring click on {node:?}: not a click target");
            return false;
        };

        if let Some(previous) = self.current {
            tree.set_selected(previous, false);
        }
        tree.set_selected(node, true);
        self.current = Some(node);
        self.label = label;
        true
    }
}
