//! Compilation units: directives, metadata and top-level declarations.

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, TokenKind};
use tracing::debug;

use crate::Parser;

impl Parser<'_> {
    /// Parse a whole compilation unit, up to and including `Eof`.
    ///
    /// Grammar: `directive* declaration* EOF`
    pub fn parse_compilation_unit(&mut self) -> Node {
        let mut directives = Vec::new();
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            let before = self.position();
            let metadata = self.parse_metadata();
            if self.check(TokenKind::Import) {
                if declarations.is_empty() {
                    directives.push(self.parse_import_directive(metadata));
                } else {
                    self.skip_misplaced_directive();
                }
            } else if let Some(declaration) = self.parse_top_level_declaration(metadata) {
                declarations.push(declaration);
            } else if self.position() == before {
                self.skip_unexpected(ErrorCode::E1012);
            }
        }

        debug!(
            directives = directives.len(),
            declarations = declarations.len(),
            "parsed compilation unit"
        );
        let eof = self.advance();
        Node::new(NodeKind::CompilationUnit {
            directives,
            declarations,
            eof,
        })
    }

    /// Directives must precede declarations; a late one is reported and
    /// dropped up to its `;`.
    fn skip_misplaced_directive(&mut self) {
        self.skip_unexpected(ErrorCode::E1012);
        while !self.is_at_end() && !self.check(TokenKind::Semicolon) {
            self.advance();
        }
        self.eat(TokenKind::Semicolon);
    }

    /// Grammar: `metadata 'import' stringLiteral ('as' identifier)? combinator* ';'`
    fn parse_import_directive(&mut self, metadata: Vec<Node>) -> Node {
        let keyword = self.expect(TokenKind::Import);
        let uri = self.parse_string_literal();
        let as_keyword = self.eat(TokenKind::As);
        let prefix = as_keyword.map(|_| self.parse_simple_identifier());
        let mut combinators = Vec::new();
        while self.check_contextual("show") || self.check_contextual("hide") {
            combinators.push(self.parse_combinator());
        }
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::ImportDirective {
            metadata,
            keyword,
            uri,
            as_keyword,
            prefix,
            combinators,
            semicolon,
        })
    }

    /// Parse a `show` or `hide` combinator.
    ///
    /// Grammar: `('show' | 'hide') identifier (',' identifier)*`
    pub fn parse_combinator(&mut self) -> Node {
        let keyword = if self.check_contextual("show") || self.check_contextual("hide") {
            self.advance()
        } else {
            let found = self.found_text();
            self.error_with(ErrorCode::E1002, self.current_span(), &["show", found]);
            self.cursor.missing(TokenKind::Ident)
        };
        let names = self.parse_comma_separated(Self::parse_simple_identifier);
        Node::new(NodeKind::Combinator { keyword, names })
    }

    /// Parse a metadata annotation.
    ///
    /// Grammar: `'@' qualified arguments?`
    pub fn parse_annotation(&mut self) -> Node {
        let at = self.expect(TokenKind::At);
        let name = self.parse_prefixed_identifier();
        let arguments = self
            .check(TokenKind::LParen)
            .then(|| self.parse_argument_list());
        Node::new(NodeKind::Annotation {
            at,
            name,
            arguments,
        })
    }

    /// Zero or more annotations.
    pub(crate) fn parse_metadata(&mut self) -> Vec<Node> {
        let mut metadata = Vec::new();
        while self.check(TokenKind::At) {
            metadata.push(self.parse_annotation());
        }
        metadata
    }

    /// Parse a class, function or variable declaration at the top level.
    ///
    /// Returns `None` when nothing here starts a declaration.
    fn parse_top_level_declaration(&mut self, metadata: Vec<Node>) -> Option<Node> {
        match self.current_kind() {
            TokenKind::Abstract | TokenKind::Class => {
                return Some(self.parse_class_declaration(metadata));
            }
            TokenKind::Var | TokenKind::Final | TokenKind::Const => {
                return Some(self.parse_top_level_variable(metadata));
            }
            TokenKind::Void => return Some(self.parse_function_declaration(metadata)),
            TokenKind::Ident => {}
            _ => {
                if !metadata.is_empty() {
                    self.error(ErrorCode::E1012, self.current_span());
                }
                return None;
            }
        }

        if self.peek_kind(1) == TokenKind::LParen {
            return Some(self.parse_function_declaration(metadata));
        }
        let end = self.skip_type_at(self.cursor.index())?;
        if self.cursor.kind_at(end) != TokenKind::Ident {
            return None;
        }
        if self.cursor.kind_at(end + 1) == TokenKind::LParen {
            Some(self.parse_function_declaration(metadata))
        } else {
            Some(self.parse_top_level_variable(metadata))
        }
    }

    /// Grammar: `metadata variableDeclarationList ';'`
    fn parse_top_level_variable(&mut self, metadata: Vec<Node>) -> Node {
        let variables = self.parse_variable_declaration_list();
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::TopLevelVariableDeclaration {
            metadata,
            variables,
            semicolon,
        })
    }

    /// Grammar: `metadata returnType? identifier formalParameterList functionBody`
    fn parse_function_declaration(&mut self, metadata: Vec<Node>) -> Node {
        let return_type = (self.peek_kind(1) != TokenKind::LParen || self.check(TokenKind::Void))
            .then(|| self.parse_return_type());
        let name = self.parse_simple_identifier();
        let parameters = self.parse_formal_parameter_list();
        let body = self.parse_function_body();
        let function_expression = Node::new(NodeKind::FunctionExpression { parameters, body });
        Node::new(NodeKind::FunctionDeclaration {
            metadata,
            return_type,
            name,
            function_expression,
        })
    }
}
