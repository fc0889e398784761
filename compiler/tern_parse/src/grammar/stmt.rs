//! Statements.

use tern_diagnostic::ErrorCode;
use tern_ir::{Node, NodeKind, SeparatedNodes, TokenKind};

use crate::{ParseContext, Parser};

impl Parser<'_> {
    /// Parse a braced sequence of statements.
    ///
    /// Grammar: `'{' statement* '}'`
    pub fn parse_block(&mut self) -> Node {
        let left_brace = self.expect(TokenKind::LBrace);
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if !self.at_statement_start() {
                self.skip_unexpected(ErrorCode::E1001);
                continue;
            }
            let before = self.position();
            let statement = self.parse_statement();
            if self.position() == before {
                self.skip_unexpected(ErrorCode::E1001);
                continue;
            }
            statements.push(statement);
        }
        let right_brace = self.expect(TokenKind::RBrace);
        Node::new(NodeKind::Block {
            left_brace,
            statements,
            right_brace,
        })
    }

    /// Check whether the current token can begin a statement.
    pub(crate) fn at_statement_start(&self) -> bool {
        match self.current_kind() {
            TokenKind::LBrace
            | TokenKind::Semicolon
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::For
            | TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Switch
            | TokenKind::Try
            | TokenKind::Assert
            | TokenKind::Var
            | TokenKind::Final => true,
            _ => self.at_expression_start(),
        }
    }

    /// Parse a single statement, with any labels in front of it.
    pub fn parse_statement(&mut self) -> Node {
        if self.at_label() {
            let mut labels = Vec::new();
            while self.at_label() {
                labels.push(self.parse_label());
            }
            let statement = self.parse_statement();
            return Node::new(NodeKind::LabeledStatement { labels, statement });
        }

        match self.current_kind() {
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Semicolon => Node::new(NodeKind::EmptyStatement {
                semicolon: self.advance(),
            }),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => self.parse_break_statement(),
            TokenKind::Continue => self.parse_continue_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Assert => self.parse_assert_statement(),
            _ if self.at_variable_declaration() => {
                let variables = self.parse_variable_declaration_list();
                let semicolon = self.expect(TokenKind::Semicolon);
                Node::new(NodeKind::VariableDeclarationStatement {
                    variables,
                    semicolon,
                })
            }
            _ if !self.at_expression_start() => {
                self.error(ErrorCode::E1006, self.current_span());
                Node::new(NodeKind::ExpressionStatement {
                    expression: self.missing_identifier(),
                    semicolon: self.cursor.missing(TokenKind::Semicolon),
                })
            }
            _ => {
                let expression = self.parse_expression();
                let semicolon = self.expect(TokenKind::Semicolon);
                Node::new(NodeKind::ExpressionStatement {
                    expression,
                    semicolon,
                })
            }
        }
    }

    /// Grammar: `'if' '(' expression ')' statement ('else' statement)?`
    fn parse_if_statement(&mut self) -> Node {
        let if_keyword = self.expect(TokenKind::If);
        let left_paren = self.expect(TokenKind::LParen);
        let condition = self.parse_expression();
        let right_paren = self.expect(TokenKind::RParen);
        let then_statement = self.parse_statement();
        let else_keyword = self.eat(TokenKind::Else);
        let else_statement = else_keyword.map(|_| self.parse_statement());
        Node::new(NodeKind::IfStatement {
            if_keyword,
            left_paren,
            condition,
            right_paren,
            then_statement,
            else_keyword,
            else_statement,
        })
    }

    /// Grammar: `'while' '(' expression ')' statement`
    fn parse_while_statement(&mut self) -> Node {
        let keyword = self.expect(TokenKind::While);
        let left_paren = self.expect(TokenKind::LParen);
        let condition = self.parse_expression();
        let right_paren = self.expect(TokenKind::RParen);
        let body = self.with_context(ParseContext::IN_LOOP, Self::parse_statement);
        Node::new(NodeKind::WhileStatement {
            keyword,
            left_paren,
            condition,
            right_paren,
            body,
        })
    }

    /// Grammar: `'do' statement 'while' '(' expression ')' ';'`
    fn parse_do_statement(&mut self) -> Node {
        let do_keyword = self.expect(TokenKind::Do);
        let body = self.with_context(ParseContext::IN_LOOP, Self::parse_statement);
        let while_keyword = self.expect(TokenKind::While);
        let left_paren = self.expect(TokenKind::LParen);
        let condition = self.parse_expression();
        let right_paren = self.expect(TokenKind::RParen);
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::DoStatement {
            do_keyword,
            body,
            while_keyword,
            left_paren,
            condition,
            right_paren,
            semicolon,
        })
    }

    /// Grammar: `'for' '(' (variableDeclarationList | expression)? ';'
    /// expression? ';' (expression (',' expression)*)? ')' statement`
    fn parse_for_statement(&mut self) -> Node {
        let for_keyword = self.expect(TokenKind::For);
        let left_paren = self.expect(TokenKind::LParen);

        let (variables, initialization) = if self.check(TokenKind::Semicolon) {
            (None, None)
        } else if self.at_variable_declaration() {
            (Some(self.parse_variable_declaration_list()), None)
        } else {
            (None, Some(self.parse_expression()))
        };
        let left_separator = self.expect(TokenKind::Semicolon);
        let condition = (!self.check(TokenKind::Semicolon)).then(|| self.parse_expression());
        let right_separator = self.expect(TokenKind::Semicolon);
        let updaters = if self.check(TokenKind::RParen) {
            SeparatedNodes::new()
        } else {
            self.parse_comma_separated(Self::parse_expression)
        };
        let right_paren = self.expect(TokenKind::RParen);
        let body = self.with_context(ParseContext::IN_LOOP, Self::parse_statement);

        Node::new(NodeKind::ForStatement {
            for_keyword,
            left_paren,
            variables,
            initialization,
            left_separator,
            condition,
            right_separator,
            updaters,
            right_paren,
            body,
        })
    }

    /// Grammar: `'return' expression? ';'`
    fn parse_return_statement(&mut self) -> Node {
        let keyword = self.expect(TokenKind::Return);
        let expression = (!self.check(TokenKind::Semicolon)).then(|| self.parse_expression());
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::ReturnStatement {
            keyword,
            expression,
            semicolon,
        })
    }

    /// Grammar: `'break' identifier? ';'`
    fn parse_break_statement(&mut self) -> Node {
        let span = self.current_span();
        let keyword = self.expect(TokenKind::Break);
        let label = self.check_ident().then(|| self.parse_simple_identifier());
        if label.is_none() && !self.context.allows_break() {
            self.error(ErrorCode::E1010, span);
        }
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::BreakStatement {
            keyword,
            label,
            semicolon,
        })
    }

    /// Grammar: `'continue' identifier? ';'`
    fn parse_continue_statement(&mut self) -> Node {
        let span = self.current_span();
        let keyword = self.expect(TokenKind::Continue);
        let label = self.check_ident().then(|| self.parse_simple_identifier());
        let targets_switch = label.is_some() && self.context.in_switch();
        if !self.context.in_loop() && !targets_switch {
            self.error(ErrorCode::E1011, span);
        }
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::ContinueStatement {
            keyword,
            label,
            semicolon,
        })
    }

    /// Grammar: `'switch' '(' expression ')' '{' switchMember* '}'`
    fn parse_switch_statement(&mut self) -> Node {
        let keyword = self.expect(TokenKind::Switch);
        let left_paren = self.expect(TokenKind::LParen);
        let expression = self.parse_expression();
        let right_paren = self.expect(TokenKind::RParen);
        let left_brace = self.expect(TokenKind::LBrace);
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if !self.at_switch_member_start() {
                self.skip_unexpected(ErrorCode::E1013);
                continue;
            }
            members.push(self.parse_switch_member());
        }
        let right_brace = self.expect(TokenKind::RBrace);
        Node::new(NodeKind::SwitchStatement {
            keyword,
            left_paren,
            expression,
            right_paren,
            left_brace,
            members,
            right_brace,
        })
    }

    fn at_switch_member_start(&self) -> bool {
        if self.check(TokenKind::Case) || self.check(TokenKind::Default) {
            return true;
        }
        // Labels may precede a member: `l1: l2: case x:`.
        let mut i = self.cursor.index();
        while self.cursor.kind_at(i) == TokenKind::Ident && self.cursor.kind_at(i + 1) == TokenKind::Colon {
            i += 2;
        }
        i != self.cursor.index()
            && matches!(self.cursor.kind_at(i), TokenKind::Case | TokenKind::Default)
    }

    /// Parse one `case` or `default` member of a switch, with its labels and
    /// statements.
    ///
    /// Grammar: `label* ('case' expression | 'default') ':' statement*`
    pub fn parse_switch_member(&mut self) -> Node {
        let mut labels = Vec::new();
        while self.at_label() {
            labels.push(self.parse_label());
        }
        let member = match self.current_kind() {
            TokenKind::Case => {
                let keyword = self.advance();
                let expression = self.parse_expression();
                let colon = self.expect(TokenKind::Colon);
                let statements = self.parse_switch_statements();
                NodeKind::SwitchCase {
                    labels,
                    keyword,
                    expression,
                    colon,
                    statements,
                }
            }
            TokenKind::Default => {
                let keyword = self.advance();
                let colon = self.expect(TokenKind::Colon);
                let statements = self.parse_switch_statements();
                NodeKind::SwitchDefault {
                    labels,
                    keyword,
                    colon,
                    statements,
                }
            }
            _ => {
                self.error(ErrorCode::E1013, self.current_span());
                NodeKind::SwitchDefault {
                    labels,
                    keyword: self.cursor.missing(TokenKind::Default),
                    colon: self.cursor.missing(TokenKind::Colon),
                    statements: Vec::new(),
                }
            }
        };
        Node::new(member)
    }

    fn parse_switch_statements(&mut self) -> Vec<Node> {
        self.with_context(ParseContext::IN_SWITCH, |p| {
            let mut statements = Vec::new();
            while !matches!(
                p.current_kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) && !p.at_switch_member_start()
            {
                if !p.at_statement_start() {
                    p.skip_unexpected(ErrorCode::E1001);
                    continue;
                }
                let before = p.position();
                let statement = p.parse_statement();
                if p.position() == before {
                    p.skip_unexpected(ErrorCode::E1001);
                    continue;
                }
                statements.push(statement);
            }
            statements
        })
    }

    /// Grammar: `'try' block catchClause* ('finally' block)?`
    fn parse_try_statement(&mut self) -> Node {
        let span = self.current_span();
        let try_keyword = self.expect(TokenKind::Try);
        let body = self.parse_block();
        let mut catch_clauses = Vec::new();
        while self.check(TokenKind::Catch) || self.check_contextual("on") {
            catch_clauses.push(self.parse_catch_clause());
        }
        let finally_keyword = self.eat(TokenKind::Finally);
        let finally_block = finally_keyword.map(|_| self.parse_block());
        if catch_clauses.is_empty() && finally_keyword.is_none() {
            self.error(ErrorCode::E1009, span);
        }
        Node::new(NodeKind::TryStatement {
            try_keyword,
            body,
            catch_clauses,
            finally_keyword,
            finally_block,
        })
    }

    /// Parse an `on`/`catch` clause of a try statement.
    ///
    /// Grammar: `('on' typeName)? ('catch' '(' identifier (',' identifier)? ')')? block`
    pub fn parse_catch_clause(&mut self) -> Node {
        let on_keyword = self.check_contextual("on").then(|| self.advance());
        let exception_type = on_keyword.map(|_| self.parse_type_name());

        let catch_keyword = (self.check(TokenKind::Catch) || on_keyword.is_none())
            .then(|| self.expect(TokenKind::Catch));
        let left_paren = catch_keyword.map(|_| self.expect(TokenKind::LParen));
        let exception_parameter = catch_keyword.map(|_| self.parse_simple_identifier());
        let comma = catch_keyword.and_then(|_| self.eat(TokenKind::Comma));
        let stack_trace_parameter = comma.map(|_| self.parse_simple_identifier());
        let right_paren = catch_keyword.map(|_| self.expect(TokenKind::RParen));
        let body = self.parse_block();

        Node::new(NodeKind::CatchClause {
            on_keyword,
            exception_type,
            catch_keyword,
            left_paren,
            exception_parameter,
            comma,
            stack_trace_parameter,
            right_paren,
            body,
        })
    }

    /// Grammar: `'assert' '(' expression ')' ';'`
    fn parse_assert_statement(&mut self) -> Node {
        let keyword = self.expect(TokenKind::Assert);
        let left_paren = self.expect(TokenKind::LParen);
        let condition = self.parse_expression();
        let right_paren = self.expect(TokenKind::RParen);
        let semicolon = self.expect(TokenKind::Semicolon);
        Node::new(NodeKind::AssertStatement {
            keyword,
            left_paren,
            condition,
            right_paren,
            semicolon,
        })
    }
}
