//! Primary expressions: literals, names, parentheses, collections and
//! instance creation.

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, TokenId, TokenKind};

use crate::Parser;

impl Parser<'_> {
    pub(super) fn parse_primary_expression(&mut self) -> Node {
        match self.current_kind() {
            TokenKind::This => Node::new(NodeKind::ThisExpression {
                keyword: self.advance(),
            }),
            TokenKind::Null => Node::new(NodeKind::NullLiteral {
                literal: self.advance(),
            }),
            TokenKind::True | TokenKind::False => Node::new(NodeKind::BooleanLiteral {
                literal: self.advance(),
            }),
            TokenKind::Int => Node::new(NodeKind::IntegerLiteral {
                literal: self.advance(),
            }),
            TokenKind::Double => Node::new(NodeKind::DoubleLiteral {
                literal: self.advance(),
            }),
            TokenKind::String => self.parse_string_literal(),
            TokenKind::Ident if self.peek_kind(1) == TokenKind::LParen => {
                let method_name = self.parse_simple_identifier();
                let argument_list = self.parse_argument_list();
                Node::new(NodeKind::MethodInvocation {
                    target: None,
                    period: None,
                    method_name,
                    argument_list,
                })
            }
            TokenKind::Ident => self.parse_simple_identifier(),
            TokenKind::LParen => {
                let left_paren = self.advance();
                let expression = self.parse_expression();
                let right_paren = self.expect(TokenKind::RParen);
                Node::new(NodeKind::ParenthesizedExpression {
                    left_paren,
                    expression,
                    right_paren,
                })
            }
            TokenKind::LBracket | TokenKind::LBrace | TokenKind::Lt => {
                self.parse_collection_literal(None)
            }
            TokenKind::Const
                if matches!(
                    self.peek_kind(1),
                    TokenKind::LBracket | TokenKind::LBrace | TokenKind::Lt
                ) =>
            {
                let const_keyword = self.advance();
                self.parse_collection_literal(Some(const_keyword))
            }
            TokenKind::New | TokenKind::Const => self.parse_instance_creation_expression(),
            TokenKind::Error => {
                self.report_lexer_error();
                Node::new(NodeKind::SimpleIdentifier {
                    token: self.advance(),
                })
            }
            _ => {
                let found = self.found_text();
                self.error_with(ErrorCode::E1003, self.current_span(), &[found]);
                self.missing_identifier()
            }
        }
    }

    /// Grammar: `'const'? typeArguments? ('[' elements ']' | '{' entries '}')`
    fn parse_collection_literal(&mut self, const_keyword: Option<TokenId>) -> Node {
        let type_arguments = self
            .check(TokenKind::Lt)
            .then(|| self.parse_type_argument_list());
        if self.check(TokenKind::LBrace) {
            let left_brace = self.advance();
            let entries = self.parse_delimited(TokenKind::RBrace, Self::parse_map_literal_entry);
            let right_brace = self.expect(TokenKind::RBrace);
            return Node::new(NodeKind::MapLiteral {
                const_keyword,
                type_arguments,
                left_brace,
                entries,
                right_brace,
            });
        }

        let left_bracket = self.expect(TokenKind::LBracket);
        let elements = self.parse_delimited(TokenKind::RBracket, Self::parse_expression);
        let right_bracket = self.expect(TokenKind::RBracket);
        Node::new(NodeKind::ListLiteral {
            const_keyword,
            type_arguments,
            left_bracket,
            elements,
            right_bracket,
        })
    }

    /// Parse one `key: value` entry of a map literal.
    ///
    /// Grammar: `expression ':' expression`
    pub fn parse_map_literal_entry(&mut self) -> Node {
        let key = self.parse_expression();
        let separator = self.expect(TokenKind::Colon);
        let value = self.parse_expression();
        Node::new(NodeKind::MapLiteralEntry {
            key,
            separator,
            value,
        })
    }

    /// Grammar: `('new' | 'const') constructorName arguments`
    fn parse_instance_creation_expression(&mut self) -> Node {
        let keyword = self.advance();
        let constructor_name = self.parse_constructor_name();
        let argument_list = self.parse_argument_list();
        Node::new(NodeKind::InstanceCreationExpression {
            keyword,
            constructor_name,
            argument_list,
        })
    }

    /// Parse the name of a constructor: a type, optionally followed by the
    /// name of a named constructor.
    ///
    /// `p.A` is read as a prefixed type; only a second period introduces a
    /// constructor name.
    ///
    /// Grammar: `typeName ('.' identifier)?`
    pub fn parse_constructor_name(&mut self) -> Node {
        let constructor_type = self.parse_type_name();
        let period = self.eat(TokenKind::Dot);
        let name = period.map(|_| self.parse_simple_identifier());
        Node::new(NodeKind::ConstructorName {
            constructor_type,
            period,
            name,
        })
    }

    /// Parse one string literal, or several adjacent ones.
    ///
    /// Grammar: `STRING+`
    pub fn parse_string_literal(&mut self) -> Node {
        let first = self.parse_simple_string_literal();
        if !self.check(TokenKind::String) {
            return first;
        }
        let mut strings = vec![first];
        while self.check(TokenKind::String) {
            strings.push(self.parse_simple_string_literal());
        }
        Node::new(NodeKind::AdjacentStrings { strings })
    }

    fn parse_simple_string_literal(&mut self) -> Node {
        let literal = if self.check(TokenKind::String) {
            self.advance()
        } else if self.check(TokenKind::Error) {
            self.report_lexer_error();
            self.advance()
        } else {
            self.expect(TokenKind::String)
        };
        Node::new(NodeKind::SimpleStringLiteral { literal })
    }
}
