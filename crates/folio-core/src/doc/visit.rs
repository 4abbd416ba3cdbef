//! Depth-first traversal of a [`DocTree`].

use super::{
    node::DocNode,
    tree::{DocTree, NodeId},
};

/// Callbacks invoked by [`walk`].
///
/// Leaf nodes receive a single [`visit`](DocVisitor::visit); composite nodes
/// receive [`visit_pre`](DocVisitor::visit_pre) before their children and
/// [`visit_post`](DocVisitor::visit_post) after them.
pub trait DocVisitor {
    fn visit(&mut self, tree: &DocTree, id: NodeId);

    fn visit_pre(&mut self, tree: &DocTree, id: NodeId);

    fn visit_post(&mut self, tree: &DocTree, id: NodeId);
}

/// Walk the subtree rooted at `id` in document order.
pub fn walk<V: DocVisitor + ?Sized>(visitor: &mut V, tree: &DocTree, id: NodeId) {
    match tree.node(id) {
        DocNode::Leaf(_) => visitor.visit(tree, id),
        DocNode::Composite(_) => {
            visitor.visit_pre(tree, id);
            for &child in tree.children(id) {
                walk(visitor, tree, child);
            }
            visitor.visit_post(tree, id);
        }
    }
}
