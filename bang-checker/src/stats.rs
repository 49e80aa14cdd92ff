//! Read-only tree statistics.

use crate::visitor::{walk_node, Visitor};
use bang_parser::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    pub max_depth: usize,
    pub bang_count: usize,
}

impl TreeStats {
    pub fn collect(program: &Node) -> Self {
        Self {
            max_depth: max_depth(program),
            bang_count: bang_count(program),
        }
    }
}

/// Number of nodes on the longest root-to-leaf path
pub fn max_depth(node: &Node) -> usize {
    1 + node.children().map(max_depth).max().unwrap_or(0)
}

#[derive(Default)]
struct BangCounter {
    count: usize,
}

impl Visitor for BangCounter {
    fn visit_bang(&mut self, _node: &Node) {
        self.count += 1;
    }
}

pub fn bang_count(node: &Node) -> usize {
    let mut counter = BangCounter::default();
    walk_node(&mut counter, node);
    counter.count
}
