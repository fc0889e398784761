//! Uniform access to the fields of a [`NodeKind`](super::NodeKind).

use super::Node;
use crate::TokenId;

/// A comma-separated list of nodes with its separators.
///
/// `separators.len()` is `nodes.len() - 1`, or `nodes.len()` when the list
/// ends with a trailing comma.
#[derive(Clone, Debug, Default)]
pub struct SeparatedNodes {
    pub nodes: Vec<Node>,
    pub separators: Vec<TokenId>,
}

impl SeparatedNodes {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes and separators interleaved in source order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        self.nodes.iter().enumerate().flat_map(|(i, node)| {
            std::iter::once(Element::Node(node))
                .chain(self.separators.get(i).copied().map(Element::Token))
        })
    }
}

/// One field of a node, read-only.
#[derive(Copy, Clone, Debug)]
pub enum Slot<'a> {
    Token(TokenId),
    OptToken(Option<TokenId>),
    Node(&'a Node),
    OptNode(Option<&'a Node>),
    List(&'a [Node]),
    Separated(&'a SeparatedNodes),
}

/// One field of a node, mutable. Only used on freshly cloned kinds.
#[derive(Debug)]
pub enum SlotMut<'a> {
    Token(&'a mut TokenId),
    OptToken(&'a mut Option<TokenId>),
    Node(&'a mut Node),
    OptNode(&'a mut Option<Node>),
    List(&'a mut Vec<Node>),
    Separated(&'a mut SeparatedNodes),
}

/// A token or child node, in source order.
#[derive(Copy, Clone, Debug)]
pub enum Element<'a> {
    Token(TokenId),
    Node(&'a Node),
}

impl Element<'_> {
    pub fn first_token(&self) -> TokenId {
        match self {
            Element::Token(token) => *token,
            Element::Node(node) => node.first_token(),
        }
    }

    pub fn last_token(&self) -> TokenId {
        match self {
            Element::Token(token) => *token,
            Element::Node(node) => node.last_token(),
        }
    }
}

/// Field types that can appear in a node kind.
pub trait AsSlot {
    fn as_slot(&self) -> Slot<'_>;
    fn as_slot_mut(&mut self) -> SlotMut<'_>;
}

impl AsSlot for TokenId {
    fn as_slot(&self) -> Slot<'_> {
        Slot::Token(*self)
    }
    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::Token(self)
    }
}

impl AsSlot for Option<TokenId> {
    fn as_slot(&self) -> Slot<'_> {
        Slot::OptToken(*self)
    }
    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::OptToken(self)
    }
}

impl AsSlot for Node {
    fn as_slot(&self) -> Slot<'_> {
        Slot::Node(self)
    }
    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::Node(self)
    }
}

impl AsSlot for Option<Node> {
    fn as_slot(&self) -> Slot<'_> {
        Slot::OptNode(self.as_ref())
    }
    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::OptNode(self)
    }
}

impl AsSlot for Vec<Node> {
    fn as_slot(&self) -> Slot<'_> {
        Slot::List(self)
    }
    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::List(self)
    }
}

impl AsSlot for SeparatedNodes {
    fn as_slot(&self) -> Slot<'_> {
        Slot::Separated(self)
    }
    fn as_slot_mut(&mut self) -> SlotMut<'_> {
        SlotMut::Separated(self)
    }
}
