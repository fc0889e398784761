//! Selector chains and argument lists.

use tern_ir::{Node, NodeKind, SyntaxKind, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Grammar: `primary selector*`
    pub(super) fn parse_primary_with_selectors(&mut self) -> Node {
        let primary = self.parse_primary_expression();
        self.parse_selectors(primary)
    }

    /// Grammar: `('.' identifier arguments? | '[' expression ']' | arguments)*`
    ///
    /// `a.b` on a plain name becomes a prefixed identifier; on anything else
    /// it is a property access.
    fn parse_selectors(&mut self, mut expression: Node) -> Node {
        loop {
            expression = match self.current_kind() {
                TokenKind::Dot => {
                    let period = self.advance();
                    let name = self.parse_simple_identifier();
                    if self.check(TokenKind::LParen) {
                        let argument_list = self.parse_argument_list();
                        Node::new(NodeKind::MethodInvocation {
                            target: Some(expression),
                            period: Some(period),
                            method_name: name,
                            argument_list,
                        })
                    } else if expression.syntax_kind() == SyntaxKind::SimpleIdentifier {
                        Node::new(NodeKind::PrefixedIdentifier {
                            prefix: expression,
                            period,
                            identifier: name,
                        })
                    } else {
                        Node::new(NodeKind::PropertyAccess {
                            target: Some(expression),
                            operator: period,
                            property_name: name,
                        })
                    }
                }
                TokenKind::LBracket => {
                    let left_bracket = self.advance();
                    let index = self.parse_expression();
                    let right_bracket = self.expect(TokenKind::RBracket);
                    Node::new(NodeKind::IndexExpression {
                        target: Some(expression),
                        period: None,
                        left_bracket,
                        index,
                        right_bracket,
                    })
                }
                TokenKind::LParen => {
                    let argument_list = self.parse_argument_list();
                    Node::new(NodeKind::FunctionExpressionInvocation {
                        function: expression,
                        argument_list,
                    })
                }
                _ => return expression,
            };
        }
    }

    /// Parse one cascade section. The section's first selector has no
    /// receiver; the cascade's target stands in for it.
    ///
    /// Grammar: `'..' (identifier arguments? | '[' expression ']') selector*
    /// (assignmentOperator expressionWithoutCascade)?`
    pub fn parse_cascade_section(&mut self) -> Node {
        let cascade = self.expect(TokenKind::DotDot);
        let head = if self.check(TokenKind::LBracket) {
            let left_bracket = self.advance();
            let index = self.parse_expression();
            let right_bracket = self.expect(TokenKind::RBracket);
            Node::new(NodeKind::IndexExpression {
                target: None,
                period: Some(cascade),
                left_bracket,
                index,
                right_bracket,
            })
        } else {
            let name = self.parse_simple_identifier();
            if self.check(TokenKind::LParen) {
                let argument_list = self.parse_argument_list();
                Node::new(NodeKind::MethodInvocation {
                    target: None,
                    period: Some(cascade),
                    method_name: name,
                    argument_list,
                })
            } else {
                Node::new(NodeKind::PropertyAccess {
                    target: None,
                    operator: cascade,
                    property_name: name,
                })
            }
        };
        let section = self.parse_selectors(head);
        self.parse_assignment_rest(section, Self::parse_expression_without_cascade)
    }

    /// Parse a parenthesized argument list.
    ///
    /// Grammar: `'(' (argument (',' argument)* ','?)? ')'`
    pub fn parse_argument_list(&mut self) -> Node {
        let left_paren = self.expect(TokenKind::LParen);
        let arguments = self.parse_delimited(TokenKind::RParen, Self::parse_argument);
        let right_paren = self.expect(TokenKind::RParen);
        Node::new(NodeKind::ArgumentList {
            left_paren,
            arguments,
            right_paren,
        })
    }

    /// Parse one argument, positional or named.
    ///
    /// Grammar: `label? expression`
    pub fn parse_argument(&mut self) -> Node {
        if !self.at_label() {
            return self.parse_expression();
        }
        let name = self.parse_label();
        let expression = self.parse_expression();
        Node::new(NodeKind::NamedExpression { name, expression })
    }
}
