//! Finding the smallest node around an offset range.

use crate::ast::Node;
use crate::SyntaxTree;

/// A chain of nodes from the root down to some node, each the parent of the next.
#[derive(Clone, Debug)]
pub struct NodePath {
    nodes: Vec<Node>,
}

impl NodePath {
    /// `nodes` must be non-empty and start at a root.
    pub fn new(nodes: Vec<Node>) -> Self {
        debug_assert!(!nodes.is_empty());
        NodePath { nodes }
    }

    /// The node the path leads to.
    #[inline]
    pub fn node(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Parent of [`NodePath::node`], `None` at the root.
    #[inline]
    pub fn parent(&self) -> Option<&Node> {
        self.nodes.len().checked_sub(2).map(|i| &self.nodes[i])
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of nodes on the path; the root alone has depth 1.
    #[inline]
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The path to the parent, or `None` at the root.
    #[must_use]
    pub fn up(&self) -> Option<NodePath> {
        (self.nodes.len() > 1).then(|| NodePath {
            nodes: self.nodes[..self.nodes.len() - 1].to_vec(),
        })
    }
}

/// Path to the smallest node whose span covers `offset`.
pub fn find_node(tree: &SyntaxTree, offset: u32) -> NodePath {
    find_node_range(tree, offset, offset)
}

/// Path to the smallest node whose span covers `start..=end`.
///
/// A position at a node's end counts as inside it, so an insertion right
/// after a token lands in that token's node. Where two children qualify the
/// earlier one wins. Falls back to the root when nothing smaller covers the range.
pub fn find_node_range(tree: &SyntaxTree, start: u32, end: u32) -> NodePath {
    let mut nodes = vec![tree.root().clone()];
    loop {
        let current = &nodes[nodes.len() - 1];
        let next = current
            .children()
            .into_iter()
            .find(|child| tree.span(child).covers(start, end))
            .cloned();
        match next {
            Some(child) => nodes.push(child),
            None => break,
        }
    }
    NodePath { nodes }
}
