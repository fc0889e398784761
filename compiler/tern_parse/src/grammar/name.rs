//! Identifiers and labels.

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Parse a simple identifier.
    ///
    /// Grammar: `identifier`
    pub fn parse_simple_identifier(&mut self) -> Node {
        if self.check_ident() {
            return Node::new(NodeKind::SimpleIdentifier {
                token: self.advance(),
            });
        }
        self.error(ErrorCode::E1004, self.current_span());
        self.missing_identifier()
    }

    /// Parse an identifier, qualified by a prefix if a period follows.
    ///
    /// Grammar: `identifier ('.' identifier)?`
    pub fn parse_prefixed_identifier(&mut self) -> Node {
        let prefix = self.parse_simple_identifier();
        match self.eat(TokenKind::Dot) {
            Some(period) => Node::new(NodeKind::PrefixedIdentifier {
                prefix,
                period,
                identifier: self.parse_simple_identifier(),
            }),
            None => prefix,
        }
    }

    /// Parse a label.
    ///
    /// Grammar: `identifier ':'`
    pub fn parse_label(&mut self) -> Node {
        let label = self.parse_simple_identifier();
        let colon = self.expect(TokenKind::Colon);
        Node::new(NodeKind::Label { label, colon })
    }

    /// Check for `identifier ':'` at the cursor.
    pub(crate) fn at_label(&self) -> bool {
        self.check_ident() && self.peek_kind(1) == TokenKind::Colon
    }
}
