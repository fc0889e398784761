//! The closed set of Tern node kinds.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use super::{AnnotationShape, AsSlot, Element, Node, SeparatedNodes, Slot, SlotMut};
use crate::TokenId;

/// Defines [`NodeKind`], its fieldless tag [`SyntaxKind`], and slot access.
///
/// Fields must be listed in source order: slot order is what the token walk,
/// the locator and the structural comparison rely on.
macro_rules! define_node_kinds {
    ($(
        $(#[$meta:meta])*
        $variant:ident { $($field:ident : $ty:ty),+ $(,)? }
    ),+ $(,)?) => {
        /// A syntax tree node kind with its fields.
        #[derive(Clone, Debug)]
        pub enum NodeKind {
            $(
                $(#[$meta])*
                $variant { $($field: $ty),+ },
            )+
        }

        /// Tag of a [`NodeKind`] without its fields.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum SyntaxKind {
            $($variant,)+
        }

        impl NodeKind {
            pub fn syntax_kind(&self) -> SyntaxKind {
                match self {
                    $(NodeKind::$variant { .. } => SyntaxKind::$variant,)+
                }
            }

            /// The fields of this node in source order.
            pub fn slots(&self) -> SmallVec<[Slot<'_>; 8]> {
                match self {
                    $(NodeKind::$variant { $($field),+ } => smallvec![$($field.as_slot()),+],)+
                }
            }

            /// Mutable access to the fields, in the same order as [`NodeKind::slots`].
            pub fn slots_mut(&mut self) -> SmallVec<[SlotMut<'_>; 8]> {
                match self {
                    $(NodeKind::$variant { $($field),+ } => smallvec![$($field.as_slot_mut()),+],)+
                }
            }
        }
    };
}

define_node_kinds! {
    // Library level

    /// A whole source file.
    CompilationUnit { directives: Vec<Node>, declarations: Vec<Node>, eof: TokenId },
    /// `import 'uri' as p show a, b hide c;`
    ImportDirective {
        metadata: Vec<Node>,
        keyword: TokenId,
        uri: Node,
        as_keyword: Option<TokenId>,
        prefix: Option<Node>,
        combinators: Vec<Node>,
        semicolon: TokenId,
    },
    /// `show a, b` or `hide c`.
    Combinator { keyword: TokenId, names: SeparatedNodes },
    /// `@name` or `@name(args)`.
    Annotation { at: TokenId, name: Node, arguments: Option<Node> },

    // Declarations

    ClassDeclaration {
        metadata: Vec<Node>,
        abstract_keyword: Option<TokenId>,
        class_keyword: TokenId,
        name: Node,
        type_parameters: Option<Node>,
        extends_clause: Option<Node>,
        with_clause: Option<Node>,
        implements_clause: Option<Node>,
        left_brace: TokenId,
        members: Vec<Node>,
        right_brace: TokenId,
    },
    TypeParameterList { left_bracket: TokenId, parameters: SeparatedNodes, right_bracket: TokenId },
    TypeParameter {
        metadata: Vec<Node>,
        name: Node,
        extends_keyword: Option<TokenId>,
        bound: Option<Node>,
    },
    ExtendsClause { keyword: TokenId, superclass: Node },
    WithClause { keyword: TokenId, mixins: SeparatedNodes },
    ImplementsClause { keyword: TokenId, interfaces: SeparatedNodes },
    /// A type reference; `void` is a type name too.
    TypeName { name: Node, type_arguments: Option<Node> },
    TypeArgumentList { left_bracket: TokenId, arguments: SeparatedNodes, right_bracket: TokenId },
    FieldDeclaration {
        metadata: Vec<Node>,
        static_keyword: Option<TokenId>,
        fields: Node,
        semicolon: TokenId,
    },
    MethodDeclaration {
        metadata: Vec<Node>,
        modifier_keyword: Option<TokenId>,
        return_type: Option<Node>,
        name: Node,
        parameters: Node,
        body: Node,
    },
    /// `A(this.x) : y = 1 { }` or `const A.named();`. `return_type` is the
    /// class name.
    ConstructorDeclaration {
        metadata: Vec<Node>,
        const_keyword: Option<TokenId>,
        return_type: Node,
        period: Option<TokenId>,
        name: Option<Node>,
        parameters: Node,
        separator: Option<TokenId>,
        initializers: SeparatedNodes,
        body: Node,
    },
    /// `this.x = e` in a constructor's initializer list.
    ConstructorFieldInitializer {
        this_keyword: Option<TokenId>,
        period: Option<TokenId>,
        field_name: Node,
        equals: TokenId,
        expression: Node,
    },
    FunctionDeclaration {
        metadata: Vec<Node>,
        return_type: Option<Node>,
        name: Node,
        function_expression: Node,
    },
    /// Parameters and body of a top-level function.
    FunctionExpression { parameters: Node, body: Node },
    FormalParameterList { left_paren: TokenId, parameters: SeparatedNodes, right_paren: TokenId },
    SimpleFormalParameter {
        metadata: Vec<Node>,
        keyword: Option<TokenId>,
        parameter_type: Option<Node>,
        identifier: Node,
    },
    /// `this.x`, optionally function-typed as `this.f(int a)`.
    FieldFormalParameter {
        metadata: Vec<Node>,
        keyword: Option<TokenId>,
        parameter_type: Option<Node>,
        this_keyword: TokenId,
        period: TokenId,
        identifier: Node,
        parameters: Option<Node>,
    },
    /// The trailing `[a = 1, b]` or `{c: 2}` group of a parameter list.
    /// Holds [`NodeKind::DefaultFormalParameter`]s only.
    OptionalFormalParameters {
        left_delimiter: TokenId,
        parameters: SeparatedNodes,
        right_delimiter: TokenId,
    },
    /// An optional parameter; `separator` is `=` in a positional group and
    /// `:` in a named one.
    DefaultFormalParameter {
        parameter: Node,
        separator: Option<TokenId>,
        default_value: Option<Node>,
    },
    BlockFunctionBody { block: Node },
    ExpressionFunctionBody { arrow: TokenId, expression: Node, semicolon: TokenId },
    EmptyFunctionBody { semicolon: TokenId },
    TopLevelVariableDeclaration { metadata: Vec<Node>, variables: Node, semicolon: TokenId },
    VariableDeclarationList {
        keyword: Option<TokenId>,
        variable_type: Option<Node>,
        variables: SeparatedNodes,
    },
    VariableDeclaration { name: Node, equals: Option<TokenId>, initializer: Option<Node> },

    // Statements

    Block { left_brace: TokenId, statements: Vec<Node>, right_brace: TokenId },
    ExpressionStatement { expression: Node, semicolon: TokenId },
    VariableDeclarationStatement { variables: Node, semicolon: TokenId },
    IfStatement {
        if_keyword: TokenId,
        left_paren: TokenId,
        condition: Node,
        right_paren: TokenId,
        then_statement: Node,
        else_keyword: Option<TokenId>,
        else_statement: Option<Node>,
    },
    WhileStatement {
        keyword: TokenId,
        left_paren: TokenId,
        condition: Node,
        right_paren: TokenId,
        body: Node,
    },
    DoStatement {
        do_keyword: TokenId,
        body: Node,
        while_keyword: TokenId,
        left_paren: TokenId,
        condition: Node,
        right_paren: TokenId,
        semicolon: TokenId,
    },
    /// `for (init; condition; updaters) body`, with either a declaration
    /// list or an initialization expression (or neither).
    ForStatement {
        for_keyword: TokenId,
        left_paren: TokenId,
        variables: Option<Node>,
        initialization: Option<Node>,
        left_separator: TokenId,
        condition: Option<Node>,
        right_separator: TokenId,
        updaters: SeparatedNodes,
        right_paren: TokenId,
        body: Node,
    },
    ReturnStatement { keyword: TokenId, expression: Option<Node>, semicolon: TokenId },
    BreakStatement { keyword: TokenId, label: Option<Node>, semicolon: TokenId },
    ContinueStatement { keyword: TokenId, label: Option<Node>, semicolon: TokenId },
    SwitchStatement {
        keyword: TokenId,
        left_paren: TokenId,
        expression: Node,
        right_paren: TokenId,
        left_brace: TokenId,
        members: Vec<Node>,
        right_brace: TokenId,
    },
    SwitchCase {
        labels: Vec<Node>,
        keyword: TokenId,
        expression: Node,
        colon: TokenId,
        statements: Vec<Node>,
    },
    SwitchDefault { labels: Vec<Node>, keyword: TokenId, colon: TokenId, statements: Vec<Node> },
    TryStatement {
        try_keyword: TokenId,
        body: Node,
        catch_clauses: Vec<Node>,
        finally_keyword: Option<TokenId>,
        finally_block: Option<Node>,
    },
    /// `on T catch (e, s) { }`; either half may be absent.
    CatchClause {
        on_keyword: Option<TokenId>,
        exception_type: Option<Node>,
        catch_keyword: Option<TokenId>,
        left_paren: Option<TokenId>,
        exception_parameter: Option<Node>,
        comma: Option<TokenId>,
        stack_trace_parameter: Option<Node>,
        right_paren: Option<TokenId>,
        body: Node,
    },
    LabeledStatement { labels: Vec<Node>, statement: Node },
    Label { label: Node, colon: TokenId },
    EmptyStatement { semicolon: TokenId },
    AssertStatement {
        keyword: TokenId,
        left_paren: TokenId,
        condition: Node,
        right_paren: TokenId,
        semicolon: TokenId,
    },

    // Expressions

    AssignmentExpression { left_hand_side: Node, operator: TokenId, right_hand_side: Node },
    ConditionalExpression {
        condition: Node,
        question: TokenId,
        then_expression: Node,
        colon: TokenId,
        else_expression: Node,
    },
    BinaryExpression { left_operand: Node, operator: TokenId, right_operand: Node },
    PrefixExpression { operator: TokenId, operand: Node },
    PostfixExpression { operand: Node, operator: TokenId },
    IsExpression {
        expression: Node,
        is_operator: TokenId,
        not_operator: Option<TokenId>,
        target_type: Node,
    },
    AsExpression { expression: Node, as_operator: TokenId, target_type: Node },
    ThrowExpression { keyword: TokenId, expression: Node },
    /// `target..a = 1..b()`. The innermost receiver of every section is
    /// left empty and its `..` stands in for the selector's period.
    CascadeExpression { target: Node, sections: Vec<Node> },
    /// `name(args)` or `target.name(args)`.
    MethodInvocation {
        target: Option<Node>,
        period: Option<TokenId>,
        method_name: Node,
        argument_list: Node,
    },
    /// Invocation of a callee that is not a plain name, e.g. `(f)(x)`.
    FunctionExpressionInvocation { function: Node, argument_list: Node },
    /// `target` is `None` at the head of a cascade section.
    PropertyAccess { target: Option<Node>, operator: TokenId, property_name: Node },
    /// `a.b` where `a` is a simple identifier.
    PrefixedIdentifier { prefix: Node, period: TokenId, identifier: Node },
    /// `period` is the `..` of a cascade section that starts with an index.
    IndexExpression {
        target: Option<Node>,
        period: Option<TokenId>,
        left_bracket: TokenId,
        index: Node,
        right_bracket: TokenId,
    },
    ParenthesizedExpression { left_paren: TokenId, expression: Node, right_paren: TokenId },
    InstanceCreationExpression { keyword: TokenId, constructor_name: Node, argument_list: Node },
    ConstructorName { constructor_type: Node, period: Option<TokenId>, name: Option<Node> },
    /// `label: expression` in an argument list.
    NamedExpression { name: Node, expression: Node },
    ArgumentList { left_paren: TokenId, arguments: SeparatedNodes, right_paren: TokenId },
    ListLiteral {
        const_keyword: Option<TokenId>,
        type_arguments: Option<Node>,
        left_bracket: TokenId,
        elements: SeparatedNodes,
        right_bracket: TokenId,
    },
    MapLiteral {
        const_keyword: Option<TokenId>,
        type_arguments: Option<Node>,
        left_brace: TokenId,
        entries: SeparatedNodes,
        right_brace: TokenId,
    },
    MapLiteralEntry { key: Node, separator: TokenId, value: Node },
    SimpleIdentifier { token: TokenId },
    IntegerLiteral { literal: TokenId },
    DoubleLiteral { literal: TokenId },
    BooleanLiteral { literal: TokenId },
    NullLiteral { literal: TokenId },
    SimpleStringLiteral { literal: TokenId },
    AdjacentStrings { strings: Vec<Node> },
    ThisExpression { keyword: TokenId },
}

impl NodeKind {
    /// Tokens and child nodes in source order.
    pub fn elements(&self) -> Vec<Element<'_>> {
        let mut out = Vec::new();
        for slot in self.slots() {
            match slot {
                Slot::Token(token) => out.push(Element::Token(token)),
                Slot::OptToken(token) => out.extend(token.map(Element::Token)),
                Slot::Node(node) => out.push(Element::Node(node)),
                Slot::OptNode(node) => out.extend(node.map(Element::Node)),
                Slot::List(nodes) => out.extend(nodes.iter().map(Element::Node)),
                Slot::Separated(list) => out.extend(list.elements()),
            }
        }
        out
    }

    /// Clone this kind, passing every child through `on_node` and every
    /// token through `on_token`.
    pub fn try_map<E>(
        &self,
        mut on_node: impl FnMut(&Node) -> Result<Node, E>,
        mut on_token: impl FnMut(TokenId) -> Result<TokenId, E>,
    ) -> Result<NodeKind, E> {
        let mut kind = self.clone();
        for slot in kind.slots_mut() {
            match slot {
                SlotMut::Token(token) => *token = on_token(*token)?,
                SlotMut::OptToken(token) => {
                    if let Some(token) = token {
                        *token = on_token(*token)?;
                    }
                }
                SlotMut::Node(node) => *node = on_node(node)?,
                SlotMut::OptNode(node) => {
                    if let Some(node) = node {
                        *node = on_node(node)?;
                    }
                }
                SlotMut::List(nodes) => {
                    for node in nodes.iter_mut() {
                        *node = on_node(node)?;
                    }
                }
                SlotMut::Separated(list) => {
                    for node in &mut list.nodes {
                        *node = on_node(node)?;
                    }
                    for token in &mut list.separators {
                        *token = on_token(*token)?;
                    }
                }
            }
        }
        Ok(kind)
    }
}

impl SyntaxKind {
    /// Which annotation fields the resolution phase fills in for this kind.
    pub fn annotation_shape(self) -> AnnotationShape {
        match self {
            SyntaxKind::SimpleIdentifier
            | SyntaxKind::PrefixedIdentifier
            | SyntaxKind::AssignmentExpression
            | SyntaxKind::BinaryExpression
            | SyntaxKind::PrefixExpression
            | SyntaxKind::PostfixExpression
            | SyntaxKind::IndexExpression
            | SyntaxKind::InstanceCreationExpression => AnnotationShape::TypedWithElement,

            SyntaxKind::ConditionalExpression
            | SyntaxKind::IsExpression
            | SyntaxKind::AsExpression
            | SyntaxKind::ThrowExpression
            | SyntaxKind::CascadeExpression
            | SyntaxKind::MethodInvocation
            | SyntaxKind::FunctionExpressionInvocation
            | SyntaxKind::PropertyAccess
            | SyntaxKind::ParenthesizedExpression
            | SyntaxKind::NamedExpression
            | SyntaxKind::ListLiteral
            | SyntaxKind::MapLiteral
            | SyntaxKind::IntegerLiteral
            | SyntaxKind::DoubleLiteral
            | SyntaxKind::BooleanLiteral
            | SyntaxKind::NullLiteral
            | SyntaxKind::SimpleStringLiteral
            | SyntaxKind::AdjacentStrings
            | SyntaxKind::ThisExpression
            | SyntaxKind::FunctionExpression => AnnotationShape::Typed,

            SyntaxKind::TypeName => AnnotationShape::TypeOnly,

            SyntaxKind::Annotation | SyntaxKind::ConstructorName => AnnotationShape::ElementOnly,

            SyntaxKind::CompilationUnit
            | SyntaxKind::ImportDirective
            | SyntaxKind::Combinator
            | SyntaxKind::ClassDeclaration
            | SyntaxKind::TypeParameterList
            | SyntaxKind::TypeParameter
            | SyntaxKind::ExtendsClause
            | SyntaxKind::WithClause
            | SyntaxKind::ImplementsClause
            | SyntaxKind::TypeArgumentList
            | SyntaxKind::FieldDeclaration
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::ConstructorDeclaration
            | SyntaxKind::ConstructorFieldInitializer
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::FormalParameterList
            | SyntaxKind::SimpleFormalParameter
            | SyntaxKind::FieldFormalParameter
            | SyntaxKind::OptionalFormalParameters
            | SyntaxKind::DefaultFormalParameter
            | SyntaxKind::BlockFunctionBody
            | SyntaxKind::ExpressionFunctionBody
            | SyntaxKind::EmptyFunctionBody
            | SyntaxKind::TopLevelVariableDeclaration
            | SyntaxKind::VariableDeclarationList
            | SyntaxKind::VariableDeclaration
            | SyntaxKind::Block
            | SyntaxKind::ExpressionStatement
            | SyntaxKind::VariableDeclarationStatement
            | SyntaxKind::IfStatement
            | SyntaxKind::WhileStatement
            | SyntaxKind::DoStatement
            | SyntaxKind::ForStatement
            | SyntaxKind::ReturnStatement
            | SyntaxKind::BreakStatement
            | SyntaxKind::ContinueStatement
            | SyntaxKind::SwitchStatement
            | SyntaxKind::SwitchCase
            | SyntaxKind::SwitchDefault
            | SyntaxKind::TryStatement
            | SyntaxKind::CatchClause
            | SyntaxKind::LabeledStatement
            | SyntaxKind::Label
            | SyntaxKind::EmptyStatement
            | SyntaxKind::AssertStatement
            | SyntaxKind::ArgumentList
            | SyntaxKind::MapLiteralEntry => AnnotationShape::None,
        }
    }

    /// Check whether this kind is an expression.
    #[inline]
    pub fn is_expression(self) -> bool {
        !matches!(
            self.annotation_shape(),
            AnnotationShape::None | AnnotationShape::TypeOnly | AnnotationShape::ElementOnly
        ) && self != SyntaxKind::FunctionExpression
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
