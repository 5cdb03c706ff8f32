use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ProjectNode;

/// Handle of an item in a [`NavTree`]. Holding one does not keep the item alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    pub id: NodeId,
    pub label: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Leaves are click targets for the selection handler, branches are not.
    pub clickable: bool,
    pub selected: bool,
}

/// Navigation tree handed to the webview. Items live in an arena and refer to
/// each other by [`NodeId`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavTree {
    roots: Vec<NodeId>,
    items: Vec<TreeItem>,
}

impl NavTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item under `parent`, or as a root item when `parent` is `None`.
    pub fn append(&mut self, parent: Option<NodeId>, label: &str) -> NodeId {
        let id = NodeId(self.items.len());
        self.items.push(TreeItem {
            id,
            label: label.to_string(),
            parent,
            children: Vec::new(),
            clickable: false,
            selected: false,
        });

        match parent.and_then(|parent| self.items.get_mut(parent.0)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn register_click_target(&mut self, id: NodeId) {
        if let Some(item) = self.items.get_mut(id.0) {
            item.clickable = true;
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeItem> {
        self.items.get(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|item| item.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_click_target(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|item| item.clickable)
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(item) = self.items.get_mut(id.0) {
            item.selected = selected;
        }
    }

    pub fn selected(&self) -> impl Iterator<Item = &TreeItem> {
        self.items.iter().filter(|item| item.selected)
    }

    /// Finds an item by its label path from the roots, e.g. `["Hulk", "shots"]`.
    pub fn find_path(&self, path: &[&str]) -> Option<NodeId> {
        let mut level = self.roots.as_slice();
        let mut found = None;
        for segment in path {
            let id = level
                .iter()
                .copied()
                .find(|id| self.get(*id).is_some_and(|item| item.label == *segment))?;
            level = self.children(id);
            found = Some(id);
        }
        found
    }
}

/// Appends one item per key of `root` under `parent`, descending into branches.
/// Leaves are registered as click targets. `BTreeMap` iteration keeps siblings
/// in ascending key order.
pub fn build(root: &BTreeMap<String, ProjectNode>, tree: &mut NavTree, parent: Option<NodeId>) {
    for (key, value) in root {
        let item = tree.append(parent, key);
        match value {
            ProjectNode::Branch(children) => build(children, tree, Some(item)),
            ProjectNode::Leaf => tree.register_click_target(item),
        }
    }
}
