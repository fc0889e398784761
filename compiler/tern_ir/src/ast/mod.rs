//! Syntax tree nodes.
//!
//! A [`Node`] is an immutable, reference-counted record. Nodes refer to tokens
//! only by [`TokenId`], never by offset, so a subtree outside an edit can be
//! shared verbatim by the tree built after the edit: its tokens keep their ids
//! and their new offsets are found through the new tree's token table.
//!
//! Parents are not stored. [`crate::NodePath`] carries the ancestor chain where
//! it is needed.

mod annotations;
mod kind;
mod slot;


pub use annotations::{AnnotationShape, Annotations, ElementId, TypeId};
pub use kind::{NodeKind, SyntaxKind};
pub use slot::{AsSlot, Element, SeparatedNodes, Slot, SlotMut};

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::TokenId;

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Stable identity of a node, unique for the lifetime of the process.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn fresh() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

struct NodeData {
    id: NodeId,
    kind: NodeKind,
    first_token: TokenId,
    last_token: TokenId,
    annotations: RwLock<Annotations>,
}

/// A shared, immutable syntax tree node.
///
/// Cloning a `Node` clones the handle, not the subtree.
#[derive(Clone)]
pub struct Node(Arc<NodeData>);

impl Node {
    /// Build a node with a fresh id. Its token range is derived from its slots.
    pub fn new(kind: NodeKind) -> Node {
        Self::with_annotations(kind, Annotations::EMPTY)
    }

    /// Build a node with a fresh id and the given annotations.
    pub fn with_annotations(kind: NodeKind, annotations: Annotations) -> Node {
        let elements = kind.elements();
        let first_token = elements.first().map_or(TokenId::NONE, Element::first_token);
        let last_token = elements.last().map_or(TokenId::NONE, Element::last_token);
        debug_assert!(
            first_token != TokenId::NONE,
            "{:?} node built without tokens",
            kind.syntax_kind()
        );
        let annotations = annotations.restricted_to(kind.syntax_kind().annotation_shape());
        Node(Arc::new(NodeData {
            id: NodeId::fresh(),
            kind,
            first_token,
            last_token,
            annotations: RwLock::new(annotations),
        }))
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    #[inline]
    pub fn syntax_kind(&self) -> SyntaxKind {
        self.0.kind.syntax_kind()
    }

    #[inline]
    pub fn first_token(&self) -> TokenId {
        self.0.first_token
    }

    #[inline]
    pub fn last_token(&self) -> TokenId {
        self.0.last_token
    }

    /// Current annotations (a copy).
    #[inline]
    pub fn annotations(&self) -> Annotations {
        *self.0.annotations.read()
    }

    /// Replace the annotations, dropping fields this node kind does not carry.
    ///
    /// Annotation cells are the only interior mutability in a tree; the
    /// resolution phase and the incremental copier write them.
    pub fn set_annotations(&self, annotations: Annotations) {
        let shape = self.syntax_kind().annotation_shape();
        *self.0.annotations.write() = annotations.restricted_to(shape);
    }

    /// Check whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Tokens and child nodes in source order.
    #[inline]
    pub fn elements(&self) -> Vec<Element<'_>> {
        self.0.kind.elements()
    }

    /// Child nodes in source order.
    pub fn children(&self) -> Vec<&Node> {
        self.0
            .kind
            .elements()
            .into_iter()
            .filter_map(|element| match element {
                Element::Node(node) => Some(node),
                Element::Token(_) => None,
            })
            .collect()
    }

    /// Check whether `id` is one of this node's direct children.
    pub fn has_child(&self, id: NodeId) -> bool {
        self.children().iter().any(|child| child.id() == id)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.syntax_kind(), self.id())
    }
}
