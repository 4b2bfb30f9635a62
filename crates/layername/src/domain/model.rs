//! Domain models for layer documents and selected objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named node in a layer tree.
///
/// The variant is fixed when the node is built; a container with no children is still a
/// container and contributes nothing to an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Node {
    Leaf {
        name: String,
    },
    Container {
        name: String,
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    pub fn leaf(name: impl Into<String>) -> Self {
        Node::Leaf { name: name.into() }
    }

    pub fn container(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Container {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Leaf { name } | Node::Container { name, .. } => name,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Container { .. })
    }

    /// Children in stored order. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Container { children, .. } => children,
        }
    }
}

/// Root of a layer tree. The document name is never part of a qualified path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub layers: Vec<Node>,
}

impl Document {
    pub fn new(layers: Vec<Node>) -> Self {
        Self { name: None, layers }
    }

    /// Number of leaves anywhere in the tree.
    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Leaf { .. } => 1,
                    Node::Container { children, .. } => count(children),
                })
                .sum()
        }
        count(&self.layers)
    }
}

/// An object picked in the target application. Only `name` is interpreted; every other
/// attribute is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedObject {
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SelectedObject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }
}
