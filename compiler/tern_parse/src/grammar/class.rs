//! Class declarations and their members.

use tern_diagnostic::ErrorCode;
use tern_ir::{Name, Node, NodeKind, SeparatedNodes, TokenId, TokenKind};

use crate::Parser;

/// What a class member turns out to be, decided by lookahead.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MemberShape {
    Field,
    Method { has_return_type: bool },
    /// `const A(`, `A.named(` or `const A.named(`. An unnamed `A(` starts
    /// out as a method without a return type.
    Constructor,
}

impl Parser<'_> {
    /// Grammar: `metadata 'abstract'? 'class' identifier typeParameterList?
    /// extendsClause? withClause? implementsClause? '{' classMember* '}'`
    pub(crate) fn parse_class_declaration(&mut self, metadata: Vec<Node>) -> Node {
        let abstract_keyword = self.eat(TokenKind::Abstract);
        let class_keyword = self.expect(TokenKind::Class);
        let name = self.parse_simple_identifier();
        let type_parameters = self
            .check(TokenKind::Lt)
            .then(|| self.parse_type_parameter_list());
        let extends_clause = self
            .check(TokenKind::Extends)
            .then(|| self.parse_extends_clause());
        let with_clause = self
            .check(TokenKind::With)
            .then(|| self.parse_with_clause());
        let implements_clause = self
            .check(TokenKind::Implements)
            .then(|| self.parse_implements_clause());

        let class_name = self.stream_lexeme(name.first_token());
        let left_brace = self.expect(TokenKind::LBrace);
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let before = self.position();
            match self.parse_class_member(class_name) {
                Some(member) => members.push(member),
                None if self.position() == before => self.skip_unexpected(ErrorCode::E1008),
                None => {}
            }
        }
        let right_brace = self.expect(TokenKind::RBrace);

        Node::new(NodeKind::ClassDeclaration {
            metadata,
            abstract_keyword,
            class_keyword,
            name,
            type_parameters,
            extends_clause,
            with_clause,
            implements_clause,
            left_brace,
            members,
            right_brace,
        })
    }

    /// Parse a field, method or constructor declaration inside the body of
    /// the class called `class_name`.
    ///
    /// Returns `None` if no member starts here; the caller decides how to
    /// recover.
    ///
    /// Grammar: `metadata 'static'? (fieldDeclaration | methodDeclaration)
    /// | metadata constructorDeclaration`
    pub fn parse_class_member(&mut self, class_name: Option<Name>) -> Option<Node> {
        let metadata = self.parse_metadata();
        let modifier = self.eat(TokenKind::Static);
        let Some(shape) = self.member_shape(modifier.is_none()) else {
            if !metadata.is_empty() || modifier.is_some() {
                self.error(ErrorCode::E1008, self.current_span());
            }
            return None;
        };

        let member = match shape {
            MemberShape::Field => {
                let fields = self.parse_variable_declaration_list();
                let semicolon = self.expect(TokenKind::Semicolon);
                Node::new(NodeKind::FieldDeclaration {
                    metadata,
                    static_keyword: modifier,
                    fields,
                    semicolon,
                })
            }
            MemberShape::Constructor => {
                let const_keyword = self.eat(TokenKind::Const);
                let return_type = self.parse_simple_identifier();
                let period = self.eat(TokenKind::Dot);
                let name = period.map(|_| self.parse_simple_identifier());
                let parameters = self.parse_formal_parameter_list();
                self.parse_constructor_rest(
                    metadata,
                    const_keyword,
                    return_type,
                    period,
                    name,
                    parameters,
                )
            }
            MemberShape::Method { has_return_type } => {
                let return_type = has_return_type.then(|| self.parse_return_type());
                let name = self.parse_simple_identifier();
                let parameters = self.parse_formal_parameter_list();
                let is_constructor = return_type.is_none()
                    && modifier.is_none()
                    && (self.check(TokenKind::Colon) || self.names(&name, class_name));
                if is_constructor {
                    return Some(
                        self.parse_constructor_rest(metadata, None, name, None, None, parameters),
                    );
                }
                let body = self.parse_function_body();
                Node::new(NodeKind::MethodDeclaration {
                    metadata,
                    modifier_keyword: modifier,
                    return_type,
                    name,
                    parameters,
                    body,
                })
            }
        };
        Some(member)
    }

    /// Initializers and body of a constructor whose parameters are parsed.
    ///
    /// Grammar: `(':' fieldInitializer (',' fieldInitializer)*)? functionBody`
    fn parse_constructor_rest(
        &mut self,
        metadata: Vec<Node>,
        const_keyword: Option<TokenId>,
        return_type: Node,
        period: Option<TokenId>,
        name: Option<Node>,
        parameters: Node,
    ) -> Node {
        let separator = self.eat(TokenKind::Colon);
        let initializers = match separator {
            Some(_) => self.parse_comma_separated(Self::parse_constructor_field_initializer),
            None => SeparatedNodes::new(),
        };
        let body = self.parse_function_body();
        Node::new(NodeKind::ConstructorDeclaration {
            metadata,
            const_keyword,
            return_type,
            period,
            name,
            parameters,
            separator,
            initializers,
            body,
        })
    }

    /// Grammar: `('this' '.')? identifier '=' conditional cascadeSection*`
    pub fn parse_constructor_field_initializer(&mut self) -> Node {
        let this_keyword = self.eat(TokenKind::This);
        let period = this_keyword.map(|_| self.expect(TokenKind::Dot));
        let field_name = self.parse_simple_identifier();
        let equals = self.expect(TokenKind::Eq);
        let value = self.parse_conditional_expression();
        let expression = self.parse_cascade_rest(value);
        Node::new(NodeKind::ConstructorFieldInitializer {
            this_keyword,
            period,
            field_name,
            equals,
            expression,
        })
    }

    /// Check whether `name` is a scanned identifier spelled `class_name`.
    fn names(&self, name: &Node, class_name: Option<Name>) -> bool {
        class_name.is_some() && self.stream_lexeme(name.first_token()) == class_name
    }

    fn member_shape(&self, allow_constructor: bool) -> Option<MemberShape> {
        let peek = |n| self.peek_kind(n);
        let constructor_name_at = |n| {
            peek(n) == TokenKind::Ident
                && (peek(n + 1) == TokenKind::LParen
                    || (peek(n + 1) == TokenKind::Dot
                        && peek(n + 2) == TokenKind::Ident
                        && peek(n + 3) == TokenKind::LParen))
        };
        match self.current_kind() {
            TokenKind::Const if allow_constructor && constructor_name_at(1) => {
                Some(MemberShape::Constructor)
            }
            TokenKind::Var | TokenKind::Final | TokenKind::Const => Some(MemberShape::Field),
            TokenKind::Void => Some(MemberShape::Method {
                has_return_type: true,
            }),
            TokenKind::Ident if peek(1) == TokenKind::LParen => Some(MemberShape::Method {
                has_return_type: false,
            }),
            TokenKind::Ident if allow_constructor && constructor_name_at(0) => {
                Some(MemberShape::Constructor)
            }
            TokenKind::Ident => {
                let end = self.skip_type_at(self.cursor.index())?;
                if self.cursor.kind_at(end) != TokenKind::Ident {
                    return None;
                }
                if self.cursor.kind_at(end + 1) == TokenKind::LParen {
                    Some(MemberShape::Method {
                        has_return_type: true,
                    })
                } else {
                    Some(MemberShape::Field)
                }
            }
            _ => None,
        }
    }
}
