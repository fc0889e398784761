//! Parser tests.
//!
//! - `parser`: whole-unit parsing, error recovery and context handling
//! - shared fixtures used by the per-module test files

#![allow(clippy::unwrap_used, clippy::expect_used)]


use std::sync::Arc;

use tern_diagnostic::{CollectingListener, Diagnostic, ErrorCode};
use tern_ir::{Node, StringInterner, SyntaxKind, SyntaxTree, TokenKind, TokenStream};

use crate::Parser;

/// Result of running one entry point over a source snippet.
pub(crate) struct Parsed {
    pub tree: SyntaxTree,
    pub interner: StringInterner,
    pub diagnostics: Vec<Diagnostic>,
    /// Kind of the token the parser stopped at.
    pub rest: TokenKind,
}

impl Parsed {
    pub fn dump(&self) -> String {
        self.tree.dump(&self.interner)
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Run `entry` from the first token of `source`.
pub(crate) fn parse_with(source: &str, entry: impl FnOnce(&mut Parser<'_>) -> Node) -> Parsed {
    let interner = StringInterner::new();
    let tokens: Arc<TokenStream> = Arc::new(tern_lexer::lex(source, &interner));
    let listener = CollectingListener::new();
    let (root, synthetic, rest) = {
        let mut parser = Parser::new(&tokens, &interner, &listener);
        let root = entry(&mut parser);
        let rest = parser.current_kind();
        (root, parser.into_synthetic(), rest)
    };
    Parsed {
        tree: SyntaxTree::new(root, tokens, Arc::new(synthetic)),
        interner,
        diagnostics: listener.take(),
        rest,
    }
}

/// Parse a whole compilation unit.
pub(crate) fn parse_unit(source: &str) -> Parsed {
    parse_with(source, |p| p.parse_compilation_unit())
}

/// The `nth` node of `kind` in pre-order.
pub(crate) fn find(tree: &SyntaxTree, kind: SyntaxKind, nth: usize) -> Node {
    fn collect(node: &Node, kind: SyntaxKind, out: &mut Vec<Node>) {
        if node.syntax_kind() == kind {
            out.push(node.clone());
        }
        for child in node.children() {
            collect(child, kind, out);
        }
    }

    let mut found = Vec::new();
    collect(tree.root(), kind, &mut found);
    found
        .into_iter()
        .nth(nth)
        .unwrap_or_else(|| panic!("no {kind} number {nth} in tree"))
}

pub(crate) fn parent_of(tree: &SyntaxTree, node: &Node) -> Node {
    tree.path_to(node.id())
        .and_then(|path| path.parent().cloned())
        .expect("node has a parent")
}
