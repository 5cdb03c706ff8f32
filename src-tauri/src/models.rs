use std::collections::BTreeMap;

use serde::{de::IgnoredAny, Deserialize, Serialize};

/// A launchable application as listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDescriptor {
    pub label: String,
    #[serde(rename = "exe")]
    pub executable: String,
    #[serde(default)]
    pub icon: String,
}

/// One entry of the project catalog.
///
/// Objects in the registry document become branches; every other value
/// (normally `null`) is a leaf. Children are kept in a `BTreeMap`, so
/// iteration is always ascending by key no matter how the source ordered them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNode")]
pub enum ProjectNode {
    Branch(BTreeMap<String, ProjectNode>),
    Leaf,
}

impl ProjectNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, ProjectNode::Leaf)
    }

    pub fn children(&self) -> Option<&BTreeMap<String, ProjectNode>> {
        match self {
            ProjectNode::Branch(children) => Some(children),
            ProjectNode::Leaf => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Branch(BTreeMap<String, ProjectNode>),
    Leaf(IgnoredAny),
}

impl From<RawNode> for ProjectNode {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Branch(children) => ProjectNode::Branch(children),
            RawNode::Leaf(_) => ProjectNode::Leaf,
        }
    }
}
