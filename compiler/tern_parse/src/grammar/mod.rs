//! Grammar productions.
//!
//! Each submodule adds `impl Parser` blocks for one area of the language.
//! This module holds the pieces they share: expecting tokens with
//! zero-width recovery, comma lists, skipping, and the token-level
//! lookahead that tells declarations from expressions.

mod class;
mod expr;
mod function;
mod name;
mod stmt;
mod ty;
mod unit;

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, SeparatedNodes, TokenId, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Consume a `kind` token. If it is not there, report it and stand in a
    /// zero-width placeholder without consuming anything.
    ///
    /// A `>` may be split off the front of `>>`, `>=` or `>>=`.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> TokenId {
        if self.check(kind) {
            return self.advance();
        }
        if kind == TokenKind::Gt {
            if let Some(id) = self.cursor.split_gt() {
                return id;
            }
        }
        self.report_expected(kind);
        self.cursor.missing(kind)
    }

    /// Consume a `kind` token if it is next.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<TokenId> {
        self.check(kind).then(|| self.advance())
    }

    fn report_expected(&self, kind: TokenKind) {
        let expected = kind.text().unwrap_or(kind.display_name());
        let found = self.found_text();
        self.error_with(ErrorCode::E1002, self.current_span(), &[expected, found]);
    }

    /// How the current token reads in a diagnostic.
    pub(crate) fn found_text(&self) -> &'static str {
        match self.current_kind() {
            TokenKind::Eof => TokenKind::Eof.display_name(),
            _ => self.cursor.current_lexeme(),
        }
    }

    /// A placeholder identifier for an identifier the source lacks.
    pub(crate) fn missing_identifier(&mut self) -> Node {
        Node::new(NodeKind::SimpleIdentifier {
            token: self.cursor.missing(TokenKind::Ident),
        })
    }

    /// Report an error token from the lexer.
    pub(crate) fn report_lexer_error(&self) {
        let lexeme = self.cursor.current_lexeme();
        if lexeme.starts_with('"') || lexeme.starts_with('\'') {
            self.error(ErrorCode::E0001, self.current_span());
        } else {
            self.error_with(ErrorCode::E0002, self.current_span(), &[lexeme]);
        }
    }

    /// Report the current token with `code` and step over it.
    ///
    /// Used when a list cannot start an element here; guarantees progress.
    pub(crate) fn skip_unexpected(&mut self, code: ErrorCode) {
        if self.check(TokenKind::Error) {
            self.report_lexer_error();
        } else {
            let found = self.found_text();
            self.error_with(code, self.current_span(), &[found]);
        }
        self.advance();
    }

    /// Elements of a delimited, comma separated list, up to (not including)
    /// `close`. A trailing comma is accepted.
    pub(crate) fn parse_delimited(
        &mut self,
        close: TokenKind,
        mut element: impl FnMut(&mut Self) -> Node,
    ) -> SeparatedNodes {
        let mut list = SeparatedNodes::new();
        while !self.check(close) && !self.is_at_end() {
            let before = self.position();
            let node = element(self);
            if self.position() == before {
                self.skip_unexpected(ErrorCode::E1001);
                continue;
            }
            list.nodes.push(node);
            match self.eat(TokenKind::Comma) {
                Some(comma) => list.separators.push(comma),
                None => break,
            }
        }
        list
    }

    /// One or more comma separated elements with no delimiters around them.
    pub(crate) fn parse_comma_separated(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Node,
    ) -> SeparatedNodes {
        let mut list = SeparatedNodes::new();
        list.nodes.push(element(self));
        while let Some(comma) = self.eat(TokenKind::Comma) {
            list.separators.push(comma);
            list.nodes.push(element(self));
        }
        list
    }

    // Lookahead over raw stream indices. The stream is not consumed, and a
    // pending split never starts a type, so these answer `None` inside one.

    /// Stream index just past a type that starts at index `i`.
    pub(crate) fn skip_type_at(&self, i: usize) -> Option<usize> {
        let kind_at = |i| self.cursor.kind_at(i);
        let mut i = match kind_at(i) {
            TokenKind::Void => return Some(i + 1),
            TokenKind::Ident => i + 1,
            _ => return None,
        };
        if kind_at(i) == TokenKind::Dot && kind_at(i + 1) == TokenKind::Ident {
            i += 2;
        }
        if kind_at(i) == TokenKind::Lt {
            i = self.skip_type_arguments_at(i)?;
        }
        Some(i)
    }

    fn skip_type_arguments_at(&self, mut i: usize) -> Option<usize> {
        let mut depth = 0i32;
        loop {
            match self.cursor.kind_at(i) {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => depth -= 1,
                TokenKind::GtGt => depth -= 2,
                TokenKind::Ident | TokenKind::Dot | TokenKind::Comma | TokenKind::Void => {}
                _ => return None,
            }
            i += 1;
            match depth {
                0 => return Some(i),
                d if d < 0 => return None,
                _ => {}
            }
        }
    }

    /// Check whether a type followed by a name starts at the cursor:
    /// `int x`, `List<int> xs`, `p.T x`.
    pub(crate) fn at_typed_name(&self) -> bool {
        if self.cursor.in_split() {
            return false;
        }
        self.skip_type_at(self.cursor.index())
            .is_some_and(|end| self.cursor.kind_at(end) == TokenKind::Ident)
    }

    /// Check whether a local or top-level variable declaration starts at the
    /// cursor.
    pub(crate) fn at_variable_declaration(&self) -> bool {
        match self.current_kind() {
            TokenKind::Var | TokenKind::Final => true,
            TokenKind::Const => {
                let next = self.cursor.index() + 1;
                self.cursor.kind_at(next) == TokenKind::Ident
                    && (self.cursor.kind_at(next + 1) == TokenKind::Eq
                        || self
                            .skip_type_at(next)
                            .is_some_and(|end| self.cursor.kind_at(end) == TokenKind::Ident))
            }
            TokenKind::Ident => self.at_typed_name(),
            _ => false,
        }
    }
}
