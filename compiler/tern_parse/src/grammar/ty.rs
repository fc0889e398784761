//! Types, type parameters and the clauses of a class header.

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Parse a type name.
    ///
    /// Grammar: `qualified typeArguments?`
    pub fn parse_type_name(&mut self) -> Node {
        let name = if self.check_ident() {
            self.parse_prefixed_identifier()
        } else {
            self.error(ErrorCode::E1005, self.current_span());
            self.missing_identifier()
        };
        let type_arguments = self
            .check(TokenKind::Lt)
            .then(|| self.parse_type_argument_list());
        Node::new(NodeKind::TypeName {
            name,
            type_arguments,
        })
    }

    /// Parse a return type; `void` is accepted as a type name here.
    ///
    /// Grammar: `'void' | typeName`
    pub fn parse_return_type(&mut self) -> Node {
        if self.check(TokenKind::Void) {
            let name = Node::new(NodeKind::SimpleIdentifier {
                token: self.advance(),
            });
            return Node::new(NodeKind::TypeName {
                name,
                type_arguments: None,
            });
        }
        self.parse_type_name()
    }

    /// Parse a list of type arguments. The closing `>` may be the first half
    /// of a `>>`.
    ///
    /// Grammar: `'<' typeName (',' typeName)* '>'`
    pub fn parse_type_argument_list(&mut self) -> Node {
        let left_bracket = self.expect(TokenKind::Lt);
        let arguments = self.parse_comma_separated(Self::parse_type_name);
        let right_bracket = self.expect(TokenKind::Gt);
        Node::new(NodeKind::TypeArgumentList {
            left_bracket,
            arguments,
            right_bracket,
        })
    }

    /// Parse a type parameter.
    ///
    /// Grammar: `metadata identifier ('extends' typeName)?`
    pub fn parse_type_parameter(&mut self) -> Node {
        let metadata = self.parse_metadata();
        let name = self.parse_simple_identifier();
        let extends_keyword = self.eat(TokenKind::Extends);
        let bound = extends_keyword.map(|_| self.parse_type_name());
        Node::new(NodeKind::TypeParameter {
            metadata,
            name,
            extends_keyword,
            bound,
        })
    }

    /// Parse a list of type parameters.
    ///
    /// Grammar: `'<' typeParameter (',' typeParameter)* '>'`
    pub fn parse_type_parameter_list(&mut self) -> Node {
        let left_bracket = self.expect(TokenKind::Lt);
        let parameters = self.parse_comma_separated(Self::parse_type_parameter);
        let right_bracket = self.expect(TokenKind::Gt);
        Node::new(NodeKind::TypeParameterList {
            left_bracket,
            parameters,
            right_bracket,
        })
    }

    /// Grammar: `'extends' typeName`
    pub fn parse_extends_clause(&mut self) -> Node {
        let keyword = self.expect(TokenKind::Extends);
        let superclass = self.parse_type_name();
        Node::new(NodeKind::ExtendsClause {
            keyword,
            superclass,
        })
    }

    /// Grammar: `'with' typeName (',' typeName)*`
    pub fn parse_with_clause(&mut self) -> Node {
        let keyword = self.expect(TokenKind::With);
        let mixins = self.parse_comma_separated(Self::parse_type_name);
        Node::new(NodeKind::WithClause { keyword, mixins })
    }

    /// Grammar: `'implements' typeName (',' typeName)*`
    pub fn parse_implements_clause(&mut self) -> Node {
        let keyword = self.expect(TokenKind::Implements);
        let interfaces = self.parse_comma_separated(Self::parse_type_name);
        Node::new(NodeKind::ImplementsClause {
            keyword,
            interfaces,
        })
    }
}
