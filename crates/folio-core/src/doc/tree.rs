//! Arena storage for the comment AST.

use super::node::DocNode;

/// Index of a node inside its [`DocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    node: DocNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A comment AST.
///
/// Nodes are only ever appended, so a node's parent is fixed when it is
/// created and the tree cannot contain cycles.
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<NodeData>,
}

impl DocTree {
    /// Create a tree holding only `root`.
    pub fn new(root: impl Into<DocNode>) -> Self {
        Self {
            nodes: vec![NodeData {
                node: root.into(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `node` as the last child of `parent` and return its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append(&mut self, parent: NodeId, node: impl Into<DocNode>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(NodeData {
            node: node.into(),
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &DocNode {
        &self.nodes[id.0].node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
