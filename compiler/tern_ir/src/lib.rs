//! Tern IR - tokens and syntax trees
//!
//! Core data structures shared by the Tern lexer, parser and incremental
//! re-parse engine:
//! - Spans and interned names
//! - Tokens with stable ids, immutable token streams, synthetic tokens
//! - `TokenMap` correspondence between a pre-edit and a post-edit stream
//! - Shared, immutable AST nodes over a closed set of node kinds
//! - Semantic annotation cells filled in by a resolver
//! - Node location by offset
//!
//! # Sharing
//!
//! Nodes reference tokens by id and are reference counted. A tree built after
//! an edit reuses every old subtree the edit did not touch; the subtree's
//! tokens keep their ids in the new stream, so its new offsets come for free.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
pub mod incremental;
mod interner;
mod locator;
mod name;
mod span;
mod token;
mod tree;

pub use ast::{
    AnnotationShape, Annotations, Element, ElementId, Node, NodeId, NodeKind, SeparatedNodes,
    Slot, SyntaxKind, TypeId,
};
pub use incremental::{EditDescriptor, OriginalRange, TextChange};
pub use interner::{InternError, StringInterner};
pub use locator::{find_node, find_node_range, NodePath};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{
    Comment, CommentKind, SyntheticFlavor, SyntheticToken, SyntheticTokens, Token, TokenId,
    TokenKind, TokenMap, TokenStream,
};
pub use tree::{
    structurally_equal, Continuation, ResolvedToken, SyntaxTree, TokenOrigin, TokenTable,
};
