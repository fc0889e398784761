//! Formal parameters, function bodies and variable declarations.

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, TokenKind};

use crate::Parser;

impl Parser<'_> {
    /// Parse a parenthesized list of parameters.
    ///
    /// Grammar: `'(' (formalParameter (',' formalParameter)* ','?)? ')'`
    /// where a `formalParameter` is a normal parameter or, last, an
    /// optional group.
    pub fn parse_formal_parameter_list(&mut self) -> Node {
        let left_paren = self.expect(TokenKind::LParen);
        let parameters = self.parse_delimited(TokenKind::RParen, |p| {
            if p.check(TokenKind::LBracket) || p.check(TokenKind::LBrace) {
                p.parse_optional_formal_parameters()
            } else {
                p.parse_normal_formal_parameter()
            }
        });
        let right_paren = self.expect(TokenKind::RParen);
        Node::new(NodeKind::FormalParameterList {
            left_paren,
            parameters,
            right_paren,
        })
    }

    /// Grammar: `'[' defaultFormalParameter (',' defaultFormalParameter)* ','? ']'
    /// | '{' defaultNamedParameter (',' defaultNamedParameter)* ','? '}'`
    fn parse_optional_formal_parameters(&mut self) -> Node {
        let named = self.check(TokenKind::LBrace);
        let (open, close) = if named {
            (TokenKind::LBrace, TokenKind::RBrace)
        } else {
            (TokenKind::LBracket, TokenKind::RBracket)
        };
        let left_delimiter = self.expect(open);
        let parameters = self.parse_delimited(close, |p| p.parse_default_formal_parameter(named));
        let right_delimiter = self.expect(close);
        Node::new(NodeKind::OptionalFormalParameters {
            left_delimiter,
            parameters,
            right_delimiter,
        })
    }

    /// Grammar: `normalFormalParameter ('=' expression)?` in a positional
    /// group, `normalFormalParameter (':' expression)?` in a named one.
    pub fn parse_default_formal_parameter(&mut self, named: bool) -> Node {
        let parameter = self.parse_normal_formal_parameter();
        let separator = self.eat(if named { TokenKind::Colon } else { TokenKind::Eq });
        let default_value = separator.map(|_| self.parse_expression());
        Node::new(NodeKind::DefaultFormalParameter {
            parameter,
            separator,
            default_value,
        })
    }

    /// Parse one required parameter.
    ///
    /// Grammar: `metadata ('final' | 'const' | 'var')? typeName?
    /// (identifier | 'this' '.' identifier formalParameterList?)`
    pub fn parse_normal_formal_parameter(&mut self) -> Node {
        let metadata = self.parse_metadata();
        let keyword_kind = self.current_kind();
        let keyword = matches!(
            keyword_kind,
            TokenKind::Final | TokenKind::Const | TokenKind::Var
        )
        .then(|| self.advance());
        let parameter_type = (keyword_kind != TokenKind::Var && self.at_parameter_type())
            .then(|| self.parse_type_name());

        let Some(this_keyword) = self.eat(TokenKind::This) else {
            let identifier = self.parse_simple_identifier();
            return Node::new(NodeKind::SimpleFormalParameter {
                metadata,
                keyword,
                parameter_type,
                identifier,
            });
        };
        let period = self.expect(TokenKind::Dot);
        let identifier = self.parse_simple_identifier();
        let parameters = self
            .check(TokenKind::LParen)
            .then(|| self.parse_formal_parameter_list());
        Node::new(NodeKind::FieldFormalParameter {
            metadata,
            keyword,
            parameter_type,
            this_keyword,
            period,
            identifier,
            parameters,
        })
    }

    /// Check for a type followed by the parameter's name or by `this`.
    fn at_parameter_type(&self) -> bool {
        !self.cursor.in_split()
            && self.skip_type_at(self.cursor.index()).is_some_and(|end| {
                matches!(self.cursor.kind_at(end), TokenKind::Ident | TokenKind::This)
            })
    }

    /// Parse the body of a function or method. Loop and switch targets of
    /// the surrounding code are not visible inside it.
    ///
    /// Grammar: `block | '=>' expression ';' | ';'`
    pub fn parse_function_body(&mut self) -> Node {
        self.in_function_body(|p| match p.current_kind() {
            TokenKind::LBrace => {
                let block = p.parse_block();
                Node::new(NodeKind::BlockFunctionBody { block })
            }
            TokenKind::Arrow => {
                let arrow = p.advance();
                let expression = p.parse_expression();
                let semicolon = p.expect(TokenKind::Semicolon);
                Node::new(NodeKind::ExpressionFunctionBody {
                    arrow,
                    expression,
                    semicolon,
                })
            }
            TokenKind::Semicolon => Node::new(NodeKind::EmptyFunctionBody {
                semicolon: p.advance(),
            }),
            _ => {
                p.error(ErrorCode::E1007, p.current_span());
                Node::new(NodeKind::EmptyFunctionBody {
                    semicolon: p.cursor.missing(TokenKind::Semicolon),
                })
            }
        })
    }

    /// Grammar: `('var' | ('final' | 'const')? typeName?) variableDeclaration
    /// (',' variableDeclaration)*`
    pub(crate) fn parse_variable_declaration_list(&mut self) -> Node {
        let keyword_kind = self.current_kind();
        let keyword = matches!(
            keyword_kind,
            TokenKind::Var | TokenKind::Final | TokenKind::Const
        )
        .then(|| self.advance());
        let variable_type = match keyword {
            None => Some(self.parse_type_name()),
            Some(_) if keyword_kind != TokenKind::Var && self.at_typed_name() => {
                Some(self.parse_type_name())
            }
            Some(_) => None,
        };
        let variables = self.parse_comma_separated(Self::parse_variable_declaration);
        Node::new(NodeKind::VariableDeclarationList {
            keyword,
            variable_type,
            variables,
        })
    }

    /// Parse one declared variable with its optional initializer.
    ///
    /// Grammar: `identifier ('=' expression)?`
    pub fn parse_variable_declaration(&mut self) -> Node {
        let name = self.parse_simple_identifier();
        let equals = self.eat(TokenKind::Eq);
        let initializer = equals.map(|_| self.parse_expression());
        Node::new(NodeKind::VariableDeclaration {
            name,
            equals,
            initializer,
        })
    }
}
