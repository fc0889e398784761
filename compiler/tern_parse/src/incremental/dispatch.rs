//! Which production re-reads a given child of a given parent.
//!
//! For every node kind there is a fixed rule per child slot. A slot whose
//! grammar does not depend on its surroundings names the parser entry point
//! that re-reads it. A slot whose meaning depends on the parent or on
//! ancestors (assignment operands, binary operands, statement expressions
//! that may turn into declarations) asks the driver to try the parent.
//!
//! Comments have no slot: they ride on tokens, so an edit inside one lands
//! on the node that owns the token after it.

use thiserror::Error;
use tracing::debug;

use tern_ir::{Node, NodeId, NodeKind, SeparatedNodes, SyntaxKind, TokenId};

use crate::Parser;

/// The dispatcher was handed a node that its parent does not hold.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
#[error("the visited node (a {parent}) was not the parent of the node to be replaced (a {child})")]
pub struct NotAChild {
    pub parent: SyntaxKind,
    pub child: SyntaxKind,
}

/// Result of dispatching one candidate.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The child was re-read from the parser's position.
    Reparsed(Node),
    /// Re-reading the child needs context the parent does not give.
    InsufficientContext,
    /// The child is not one of the parent's children. Fatal to the whole
    /// incremental attempt.
    NotAChild(NotAChild),
}

type Entry<'a> = fn(&mut Parser<'a>) -> Node;

/// What the rule table says about one slot.
#[derive(Copy, Clone)]
enum Rule<'a> {
    Parse(Entry<'a>),
    /// `parse_class_member` may fail to recover; that escalates. Carries
    /// the class name token, which tells constructors from methods.
    ClassMember(TokenId),
    Insufficient,
    NotAChild,
}

/// Re-read `old_child` as a child of `parent`, starting at the parser's
/// current token.
///
/// The parser must already be positioned where `old_child` started and
/// seeded with the context its ancestors imply.
pub fn dispatch<'a>(parser: &mut Parser<'a>, parent: &Node, old_child: &Node) -> DispatchOutcome {
    let rule: Rule<'a> = rule_for(parent.kind(), old_child.id());
    match rule {
        Rule::Parse(entry) => {
            debug!(parent = %parent.syntax_kind(), child = %old_child.syntax_kind(), "reparsing child");
            DispatchOutcome::Reparsed(entry(parser))
        }
        Rule::ClassMember(name) => match parser.parse_class_member(parser.stream_lexeme(name)) {
            Some(member) => DispatchOutcome::Reparsed(member),
            None => {
                debug!("class member did not recover");
                DispatchOutcome::InsufficientContext
            }
        },
        Rule::Insufficient => {
            debug!(parent = %parent.syntax_kind(), child = %old_child.syntax_kind(), "insufficient context");
            DispatchOutcome::InsufficientContext
        }
        Rule::NotAChild => DispatchOutcome::NotAChild(NotAChild {
            parent: parent.syntax_kind(),
            child: old_child.syntax_kind(),
        }),
    }
}

/// Slot holders that can tell whether a node id is among them.
trait Holds {
    fn holds(&self, id: NodeId) -> bool;
}

impl Holds for Node {
    fn holds(&self, id: NodeId) -> bool {
        self.id() == id
    }
}

impl Holds for Option<Node> {
    fn holds(&self, id: NodeId) -> bool {
        self.as_ref().is_some_and(|node| node.id() == id)
    }
}

impl Holds for Vec<Node> {
    fn holds(&self, id: NodeId) -> bool {
        self.iter().any(|node| node.id() == id)
    }
}

impl Holds for SeparatedNodes {
    fn holds(&self, id: NodeId) -> bool {
        self.nodes.holds(id)
    }
}

/// First matching `slot => rule` pair, or `NotAChild`.
macro_rules! rules {
    ($child:expr; $($slot:expr => $rule:expr),+ $(,)?) => {{
        let child = $child;
        $(
            if $slot.holds(child) {
                return $rule;
            }
        )+
        Rule::NotAChild
    }};
}

#[allow(clippy::too_many_lines, reason = "one arm per node kind, kept exhaustive")]
fn rule_for<'a>(parent: &NodeKind, child: NodeId) -> Rule<'a> {
    use Rule::{ClassMember, Insufficient, Parse};

    let string_literal: Entry<'a> = Parser::parse_string_literal;
    let prefixed_identifier: Entry<'a> = Parser::parse_prefixed_identifier;
    let simple_identifier: Entry<'a> = Parser::parse_simple_identifier;
    let argument_list: Entry<'a> = Parser::parse_argument_list;
    let argument: Entry<'a> = Parser::parse_argument;
    let annotation: Entry<'a> = Parser::parse_annotation;
    let expression: Entry<'a> = Parser::parse_expression;
    let bitwise_or: Entry<'a> = Parser::parse_bitwise_or_expression;
    let without_cascade: Entry<'a> = Parser::parse_expression_without_cascade;
    let conditional: Entry<'a> = Parser::parse_conditional_expression;
    let logical_or: Entry<'a> = Parser::parse_logical_or_expression;
    let formal_parameter_list: Entry<'a> = Parser::parse_formal_parameter_list;
    let statement: Entry<'a> = Parser::parse_statement;
    let block: Entry<'a> = Parser::parse_block;
    let type_name: Entry<'a> = Parser::parse_type_name;
    let return_type: Entry<'a> = Parser::parse_return_type;
    let label: Entry<'a> = Parser::parse_label;

    match parent {
        NodeKind::AdjacentStrings { strings } => rules!(child; strings => Parse(string_literal)),
        NodeKind::Annotation {
            name, arguments, ..
        } => rules!(child;
            name => Parse(prefixed_identifier),
            arguments => Parse(argument_list),
        ),
        NodeKind::ArgumentList { arguments, .. } => rules!(child; arguments => Parse(argument)),
        NodeKind::AsExpression {
            expression: operand,
            target_type,
            ..
        }
        | NodeKind::IsExpression {
            expression: operand,
            target_type,
            ..
        } => rules!(child;
            operand => Parse(bitwise_or),
            target_type => Parse(type_name),
        ),
        NodeKind::AssertStatement { condition, .. } => rules!(child; condition => Parse(expression)),
        NodeKind::AssignmentExpression {
            left_hand_side,
            right_hand_side,
            ..
        } => rules!(child;
            left_hand_side => Insufficient,
            right_hand_side => Insufficient,
        ),
        NodeKind::BinaryExpression {
            left_operand,
            right_operand,
            ..
        } => rules!(child;
            left_operand => Insufficient,
            right_operand => Insufficient,
        ),
        NodeKind::Block { statements, .. } => rules!(child; statements => Parse(statement)),
        NodeKind::BlockFunctionBody { block: body } => rules!(child; body => Parse(block)),
        NodeKind::BreakStatement { label: target, .. }
        | NodeKind::ContinueStatement { label: target, .. } => {
            rules!(child; target => Parse(simple_identifier))
        }
        NodeKind::CatchClause {
            exception_type,
            exception_parameter,
            stack_trace_parameter,
            body,
            ..
        } => rules!(child;
            exception_type => Insufficient,
            exception_parameter => Parse(simple_identifier),
            stack_trace_parameter => Parse(simple_identifier),
            body => Parse(block),
        ),
        NodeKind::ClassDeclaration {
            metadata,
            name,
            type_parameters,
            extends_clause,
            with_clause,
            implements_clause,
            members,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            name => Parse(simple_identifier),
            type_parameters => Parse(Parser::parse_type_parameter_list),
            extends_clause => Parse(Parser::parse_extends_clause),
            with_clause => Parse(Parser::parse_with_clause),
            implements_clause => Parse(Parser::parse_implements_clause),
            members => ClassMember(name.first_token()),
        ),
        NodeKind::CascadeExpression { target, sections } => rules!(child;
            target => Parse(conditional),
            sections => Insufficient,
        ),
        NodeKind::Combinator { names, .. } => rules!(child; names => Parse(simple_identifier)),
        NodeKind::CompilationUnit {
            directives,
            declarations,
            ..
        } => rules!(child;
            directives => Insufficient,
            declarations => Insufficient,
        ),
        NodeKind::ConditionalExpression {
            condition,
            then_expression,
            else_expression,
            ..
        } => rules!(child;
            condition => Parse(logical_or),
            then_expression => Parse(without_cascade),
            else_expression => Parse(without_cascade),
        ),
        NodeKind::ConstructorDeclaration {
            metadata,
            return_type: class_name,
            name,
            parameters,
            initializers,
            body,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            class_name => Insufficient,
            name => Insufficient,
            parameters => Parse(formal_parameter_list),
            initializers => Insufficient,
            body => Insufficient,
        ),
        NodeKind::ConstructorFieldInitializer {
            field_name,
            expression: value,
            ..
        } => rules!(child;
            field_name => Parse(simple_identifier),
            value => Insufficient,
        ),
        NodeKind::ConstructorName {
            constructor_type,
            name,
            ..
        } => rules!(child;
            constructor_type => Parse(type_name),
            name => Parse(simple_identifier),
        ),
        NodeKind::DefaultFormalParameter {
            parameter,
            default_value,
            ..
        } => rules!(child;
            parameter => Parse(Parser::parse_normal_formal_parameter),
            default_value => Parse(expression),
        ),
        NodeKind::DoStatement {
            body, condition, ..
        } => rules!(child;
            body => Parse(statement),
            condition => Parse(expression),
        ),
        NodeKind::ExpressionFunctionBody {
            expression: body, ..
        } => rules!(child; body => Parse(expression)),
        NodeKind::ExpressionStatement {
            expression: inner, ..
        } => rules!(child; inner => Insufficient),
        NodeKind::ExtendsClause { superclass, .. } => rules!(child; superclass => Parse(type_name)),
        NodeKind::FieldDeclaration {
            metadata, fields, ..
        } => rules!(child;
            metadata => Parse(annotation),
            fields => Insufficient,
        ),
        NodeKind::FieldFormalParameter {
            metadata,
            parameter_type,
            identifier,
            parameters,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            parameter_type => Parse(type_name),
            identifier => Parse(simple_identifier),
            parameters => Parse(formal_parameter_list),
        ),
        NodeKind::FormalParameterList { parameters, .. } => {
            rules!(child; parameters => Insufficient)
        }
        NodeKind::ForStatement {
            variables,
            initialization,
            condition,
            updaters,
            body,
            ..
        } => rules!(child;
            variables => Insufficient,
            initialization => Parse(expression),
            condition => Parse(expression),
            updaters => Parse(expression),
            body => Parse(statement),
        ),
        NodeKind::FunctionDeclaration {
            metadata,
            return_type: returns,
            name,
            function_expression,
        } => rules!(child;
            metadata => Parse(annotation),
            returns => Parse(return_type),
            name => Parse(simple_identifier),
            function_expression => Insufficient,
        ),
        NodeKind::FunctionExpression { parameters, body } => rules!(child;
            parameters => Parse(formal_parameter_list),
            body => Insufficient,
        ),
        NodeKind::FunctionExpressionInvocation {
            function,
            argument_list: arguments,
        } => rules!(child;
            function => Insufficient,
            arguments => Parse(argument_list),
        ),
        NodeKind::IfStatement {
            condition,
            then_statement,
            else_statement,
            ..
        } => rules!(child;
            condition => Parse(expression),
            then_statement => Parse(statement),
            else_statement => Parse(statement),
        ),
        NodeKind::ImplementsClause { interfaces, .. } => {
            rules!(child; interfaces => Parse(type_name))
        }
        NodeKind::ImportDirective {
            metadata,
            uri,
            prefix,
            combinators,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            uri => Parse(string_literal),
            prefix => Parse(simple_identifier),
            combinators => Parse(Parser::parse_combinator),
        ),
        NodeKind::IndexExpression { target, index, .. } => rules!(child;
            target => Insufficient,
            index => Parse(expression),
        ),
        NodeKind::InstanceCreationExpression {
            constructor_name,
            argument_list: arguments,
            ..
        } => rules!(child;
            constructor_name => Parse(Parser::parse_constructor_name),
            arguments => Parse(argument_list),
        ),
        NodeKind::Label { label: name, .. } => rules!(child; name => Parse(simple_identifier)),
        NodeKind::LabeledStatement {
            labels,
            statement: labeled,
        } => rules!(child;
            labels => Parse(label),
            labeled => Parse(statement),
        ),
        NodeKind::ListLiteral {
            type_arguments,
            elements,
            ..
        } => rules!(child;
            type_arguments => Parse(Parser::parse_type_argument_list),
            elements => Parse(expression),
        ),
        NodeKind::MapLiteral {
            type_arguments,
            entries,
            ..
        } => rules!(child;
            type_arguments => Parse(Parser::parse_type_argument_list),
            entries => Parse(Parser::parse_map_literal_entry),
        ),
        NodeKind::MapLiteralEntry { key, value, .. } => rules!(child;
            key => Parse(expression),
            value => Parse(expression),
        ),
        NodeKind::MethodDeclaration {
            metadata,
            return_type: returns,
            name,
            parameters,
            body,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            returns => Parse(return_type),
            name => Parse(simple_identifier),
            parameters => Parse(formal_parameter_list),
            body => Parse(Parser::parse_function_body),
        ),
        NodeKind::MethodInvocation {
            target,
            method_name,
            argument_list: arguments,
            ..
        } => rules!(child;
            target => Insufficient,
            method_name => Parse(simple_identifier),
            arguments => Parse(argument_list),
        ),
        NodeKind::NamedExpression {
            name,
            expression: value,
        } => rules!(child;
            name => Parse(label),
            value => Parse(expression),
        ),
        NodeKind::OptionalFormalParameters { parameters, .. } => {
            rules!(child; parameters => Insufficient)
        }
        NodeKind::ParenthesizedExpression {
            expression: inner, ..
        } => rules!(child; inner => Parse(expression)),
        NodeKind::PostfixExpression { operand, .. } | NodeKind::PrefixExpression { operand, .. } => {
            rules!(child; operand => Insufficient)
        }
        NodeKind::PrefixedIdentifier {
            prefix, identifier, ..
        } => rules!(child;
            prefix => Parse(simple_identifier),
            identifier => Parse(simple_identifier),
        ),
        NodeKind::PropertyAccess {
            target,
            property_name,
            ..
        } => rules!(child;
            target => Insufficient,
            property_name => Parse(simple_identifier),
        ),
        NodeKind::ReturnStatement {
            expression: value, ..
        } => rules!(child; value => Parse(expression)),
        NodeKind::SimpleFormalParameter {
            metadata,
            parameter_type,
            identifier,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            parameter_type => Parse(type_name),
            identifier => Parse(simple_identifier),
        ),
        NodeKind::SwitchStatement {
            expression: scrutinee,
            members,
            ..
        } => rules!(child;
            scrutinee => Parse(expression),
            members => Parse(Parser::parse_switch_member),
        ),
        NodeKind::SwitchCase {
            labels,
            expression: value,
            statements,
            ..
        } => rules!(child;
            labels => Parse(label),
            value => Parse(expression),
            statements => Parse(statement),
        ),
        NodeKind::SwitchDefault {
            labels, statements, ..
        } => rules!(child;
            labels => Parse(label),
            statements => Parse(statement),
        ),
        NodeKind::ThrowExpression {
            expression: thrown, ..
        } => rules!(child; thrown => Insufficient),
        NodeKind::TopLevelVariableDeclaration {
            metadata, variables, ..
        } => rules!(child;
            metadata => Parse(annotation),
            variables => Insufficient,
        ),
        NodeKind::TryStatement {
            body,
            catch_clauses,
            finally_block,
            ..
        } => rules!(child;
            body => Parse(block),
            catch_clauses => Insufficient,
            finally_block => Parse(block),
        ),
        NodeKind::TypeArgumentList { arguments, .. } => rules!(child; arguments => Parse(type_name)),
        NodeKind::TypeName {
            name,
            type_arguments,
        } => rules!(child;
            name => Parse(prefixed_identifier),
            type_arguments => Parse(Parser::parse_type_argument_list),
        ),
        NodeKind::TypeParameter {
            metadata,
            name,
            bound,
            ..
        } => rules!(child;
            metadata => Parse(annotation),
            name => Parse(simple_identifier),
            bound => Parse(type_name),
        ),
        NodeKind::TypeParameterList { parameters, .. } => {
            rules!(child; parameters => Parse(Parser::parse_type_parameter))
        }
        NodeKind::VariableDeclaration {
            name, initializer, ..
        } => rules!(child;
            name => Insufficient,
            initializer => Insufficient,
        ),
        NodeKind::VariableDeclarationList {
            variable_type,
            variables,
            ..
        } => rules!(child;
            variable_type => Insufficient,
            variables => Insufficient,
        ),
        NodeKind::VariableDeclarationStatement { variables, .. } => {
            rules!(child; variables => Insufficient)
        }
        NodeKind::WhileStatement {
            condition, body, ..
        } => rules!(child;
            condition => Parse(expression),
            body => Parse(statement),
        ),
        NodeKind::WithClause { mixins, .. } => rules!(child; mixins => Parse(type_name)),

        // No node children.
        NodeKind::EmptyFunctionBody { .. }
        | NodeKind::EmptyStatement { .. }
        | NodeKind::SimpleIdentifier { .. }
        | NodeKind::IntegerLiteral { .. }
        | NodeKind::DoubleLiteral { .. }
        | NodeKind::BooleanLiteral { .. }
        | NodeKind::NullLiteral { .. }
        | NodeKind::SimpleStringLiteral { .. }
        | NodeKind::ThisExpression { .. } => Rule::NotAChild,
    }
}
