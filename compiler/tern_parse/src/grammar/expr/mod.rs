//! Expression parsing.
//!
//! Precedence climbing, lowest to highest:
//! assignment and cascade, conditional, `||`, `&&`, equality, relational (with `is` and
//! `as`), `|`, `^`, `&`, shift, additive, multiplicative, unary, postfix.
//! Primaries and selector chains live in the submodules.

mod postfix;
mod primary;

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, Span, SyntaxKind, TokenKind, TokenTable};

use crate::Parser;

const EQUALITY: &[TokenKind] = &[TokenKind::EqEq, TokenKind::BangEq];
const RELATIONAL: &[TokenKind] = &[
    TokenKind::Lt,
    TokenKind::LtEq,
    TokenKind::Gt,
    TokenKind::GtEq,
];
const SHIFT: &[TokenKind] = &[TokenKind::LtLt, TokenKind::GtGt];
const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::TildeSlash,
];

/// Kinds that may stand on the left of `=` or be incremented.
fn is_assignable(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::SimpleIdentifier
            | SyntaxKind::PrefixedIdentifier
            | SyntaxKind::PropertyAccess
            | SyntaxKind::IndexExpression
    )
}

impl Parser<'_> {
    /// Parse an expression, including assignment, cascades and `throw`.
    ///
    /// Grammar: `throw expression | conditional cascadeSection+
    /// | conditional (assignmentOperator expression)?`
    pub fn parse_expression(&mut self) -> Node {
        if self.check(TokenKind::Throw) {
            return self.parse_throw_expression(Self::parse_expression);
        }
        let expression = self.parse_conditional_expression();
        if self.check(TokenKind::DotDot) {
            return self.parse_cascade_rest(expression);
        }
        self.parse_assignment_rest(expression, Self::parse_expression)
    }

    /// Parse an expression that stops before any `..`.
    ///
    /// Grammar: `throw expressionWithoutCascade
    /// | conditional (assignmentOperator expressionWithoutCascade)?`
    pub fn parse_expression_without_cascade(&mut self) -> Node {
        if self.check(TokenKind::Throw) {
            return self.parse_throw_expression(Self::parse_expression_without_cascade);
        }
        let expression = self.parse_conditional_expression();
        self.parse_assignment_rest(expression, Self::parse_expression_without_cascade)
    }

    fn parse_throw_expression(&mut self, operand: impl FnOnce(&mut Self) -> Node) -> Node {
        let keyword = self.expect(TokenKind::Throw);
        let expression = operand(self);
        Node::new(NodeKind::ThrowExpression {
            keyword,
            expression,
        })
    }

    /// Wrap `left_hand_side` in an assignment if an assignment operator
    /// follows, reading the right-hand side with `right`.
    pub(super) fn parse_assignment_rest(
        &mut self,
        left_hand_side: Node,
        right: impl FnOnce(&mut Self) -> Node,
    ) -> Node {
        if !self.current_kind().is_assignment_operator() {
            return left_hand_side;
        }
        self.check_assignable(&left_hand_side);
        let operator = self.advance();
        let right_hand_side = right(self);
        Node::new(NodeKind::AssignmentExpression {
            left_hand_side,
            operator,
            right_hand_side,
        })
    }

    /// Sections following `target`, if any.
    pub(crate) fn parse_cascade_rest(&mut self, target: Node) -> Node {
        if !self.check(TokenKind::DotDot) {
            return target;
        }
        let mut sections = Vec::new();
        while self.check(TokenKind::DotDot) {
            sections.push(self.parse_cascade_section());
        }
        Node::new(NodeKind::CascadeExpression { target, sections })
    }

    /// Grammar: `logicalOr ('?' expressionWithoutCascade ':' expressionWithoutCascade)?`
    pub fn parse_conditional_expression(&mut self) -> Node {
        let condition = self.parse_logical_or_expression();
        let Some(question) = self.eat(TokenKind::Question) else {
            return condition;
        };
        let then_expression = self.parse_expression_without_cascade();
        let colon = self.expect(TokenKind::Colon);
        let else_expression = self.parse_expression_without_cascade();
        Node::new(NodeKind::ConditionalExpression {
            condition,
            question,
            then_expression,
            colon,
            else_expression,
        })
    }

    /// Grammar: `logicalAnd ('||' logicalAnd)*`
    pub fn parse_logical_or_expression(&mut self) -> Node {
        self.parse_binary_level(&[TokenKind::PipePipe], Self::parse_logical_and_expression)
    }

    fn parse_logical_and_expression(&mut self) -> Node {
        self.parse_binary_level(&[TokenKind::AmpAmp], Self::parse_equality_expression)
    }

    fn parse_equality_expression(&mut self) -> Node {
        self.parse_binary_level(EQUALITY, Self::parse_relational_expression)
    }

    /// Relational operators do not chain: `a < b < c` stops after `a < b`.
    fn parse_relational_expression(&mut self) -> Node {
        let expression = self.parse_bitwise_or_expression();
        match self.current_kind() {
            TokenKind::Is => {
                let is_operator = self.advance();
                let not_operator = self.eat(TokenKind::Bang);
                let target_type = self.parse_type_name();
                Node::new(NodeKind::IsExpression {
                    expression,
                    is_operator,
                    not_operator,
                    target_type,
                })
            }
            TokenKind::As => {
                let as_operator = self.advance();
                let target_type = self.parse_type_name();
                Node::new(NodeKind::AsExpression {
                    expression,
                    as_operator,
                    target_type,
                })
            }
            kind if RELATIONAL.contains(&kind) => {
                let operator = self.advance();
                let right_operand = self.parse_bitwise_or_expression();
                Node::new(NodeKind::BinaryExpression {
                    left_operand: expression,
                    operator,
                    right_operand,
                })
            }
            _ => expression,
        }
    }

    /// Grammar: `bitwiseXor ('|' bitwiseXor)*`
    pub fn parse_bitwise_or_expression(&mut self) -> Node {
        self.parse_binary_level(&[TokenKind::Pipe], Self::parse_bitwise_xor_expression)
    }

    fn parse_bitwise_xor_expression(&mut self) -> Node {
        self.parse_binary_level(&[TokenKind::Caret], Self::parse_bitwise_and_expression)
    }

    fn parse_bitwise_and_expression(&mut self) -> Node {
        self.parse_binary_level(&[TokenKind::Amp], Self::parse_shift_expression)
    }

    fn parse_shift_expression(&mut self) -> Node {
        self.parse_binary_level(SHIFT, Self::parse_additive_expression)
    }

    fn parse_additive_expression(&mut self) -> Node {
        self.parse_binary_level(ADDITIVE, Self::parse_multiplicative_expression)
    }

    fn parse_multiplicative_expression(&mut self) -> Node {
        self.parse_binary_level(MULTIPLICATIVE, Self::parse_unary_expression)
    }

    /// Left-associative chain of `operand (op operand)*`.
    fn parse_binary_level(&mut self, operators: &[TokenKind], operand: fn(&mut Self) -> Node) -> Node {
        let mut left_operand = operand(self);
        while operators.contains(&self.current_kind()) {
            let operator = self.advance();
            let right_operand = operand(self);
            left_operand = Node::new(NodeKind::BinaryExpression {
                left_operand,
                operator,
                right_operand,
            });
        }
        left_operand
    }

    /// Grammar: `('-' | '!' | '~') unary | ('++' | '--') assignable | postfix`
    fn parse_unary_expression(&mut self) -> Node {
        match self.current_kind() {
            TokenKind::Minus | TokenKind::Bang | TokenKind::Tilde => {
                let operator = self.advance();
                let operand = self.parse_unary_expression();
                Node::new(NodeKind::PrefixExpression { operator, operand })
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let operator = self.advance();
                let operand = self.parse_assignable_expression();
                Node::new(NodeKind::PrefixExpression { operator, operand })
            }
            _ => self.parse_postfix_expression(),
        }
    }

    /// Grammar: `primary selector* ('++' | '--')?`
    fn parse_postfix_expression(&mut self) -> Node {
        let operand = self.parse_primary_with_selectors();
        if !matches!(self.current_kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            return operand;
        }
        self.check_assignable(&operand);
        let operator = self.advance();
        Node::new(NodeKind::PostfixExpression { operand, operator })
    }

    /// Parse an expression that may be assigned to.
    ///
    /// Grammar: `primary selector*`, ending in a name, property or index.
    pub fn parse_assignable_expression(&mut self) -> Node {
        let expression = self.parse_primary_with_selectors();
        self.check_assignable(&expression);
        expression
    }

    fn check_assignable(&self, expression: &Node) {
        if !is_assignable(expression.syntax_kind()) {
            let span = self.node_span(expression);
            self.error(ErrorCode::E1014, span);
        }
    }

    /// Span of a node built by this parser.
    pub(crate) fn node_span(&self, node: &Node) -> Span {
        TokenTable::new(self.cursor.tokens(), self.cursor.synthetic())
            .span(node)
            .unwrap_or_else(|| self.current_span())
    }

    /// Check whether the current token can begin an expression.
    pub(crate) fn at_expression_start(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Double
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::New
                | TokenKind::Const
                | TokenKind::Throw
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Lt
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Error
        )
    }
}

#[cfg(test)]
mod tests;
