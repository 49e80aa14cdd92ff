//! Visitor trait for traversing the Bang AST
//!
//! Traversal is post-order: a node's left subtree, then its right subtree,
//! then the node itself. Implementors override the hooks for the node kinds
//! they care about and inherit the traversal from [`walk_node`].

use bang_parser::{Node, NodeKind};

pub trait Visitor: Sized {
    /// Visit a node (entry point)
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node)
    }

    /// Called after the bound expression of a `let` has been visited
    fn visit_let(&mut self, _identifier: &str, _node: &Node) {}

    /// Visit an identifier use
    fn visit_identifier(&mut self, _name: &str, _node: &Node) {}

    /// Called after the operand of a `!` has been visited
    fn visit_bang(&mut self, _node: &Node) {}
}

/// Walk the children of `node`, then dispatch on its kind
pub fn walk_node<V: Visitor>(visitor: &mut V, node: &Node) {
    for child in node.children() {
        visitor.visit_node(child);
    }

    match &node.kind {
        NodeKind::Let { identifier, .. } => visitor.visit_let(identifier, node),
        NodeKind::Identifier(name) => visitor.visit_identifier(name, node),
        NodeKind::Bang(_) => visitor.visit_bang(node),
        _ => {}
    }
}
