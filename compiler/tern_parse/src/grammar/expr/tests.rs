use pretty_assertions::assert_eq;
use tern_diagnostic::ErrorCode;
use tern_ir::TokenKind;

use crate::tests::parse_with;
use crate::Parser;

fn expr(source: &str) -> String {
    let parsed = parse_with(source, |p| p.parse_expression());
    assert!(!parsed.has_errors(), "{source}: {:?}", parsed.diagnostics);
    assert_eq!(parsed.rest, TokenKind::Eof, "{source} not fully consumed");
    parsed.dump()
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        expr("1 + 2 * 3"),
        "(BinaryExpression (IntegerLiteral 1) + (BinaryExpression (IntegerLiteral 2) * (IntegerLiteral 3)))"
    );
}

#[test]
fn test_binary_operators_associate_left() {
    assert_eq!(
        expr("a - b - c"),
        "(BinaryExpression (BinaryExpression (SimpleIdentifier a) - (SimpleIdentifier b)) - (SimpleIdentifier c))"
    );
}

#[test]
fn test_assignment_associates_right() {
    assert_eq!(
        expr("a = b = 1"),
        "(AssignmentExpression (SimpleIdentifier a) = (AssignmentExpression (SimpleIdentifier b) = (IntegerLiteral 1)))"
    );
}

#[test]
fn test_conditional_and_logical() {
    assert_eq!(
        expr("a || b ? 1 : 2"),
        "(ConditionalExpression (BinaryExpression (SimpleIdentifier a) || (SimpleIdentifier b)) ? (IntegerLiteral 1) : (IntegerLiteral 2))"
    );
}

#[test]
fn test_cascade_sections() {
    assert_eq!(
        expr("a..b = 1..c.d"),
        "(CascadeExpression (SimpleIdentifier a) (AssignmentExpression (PropertyAccess .. (SimpleIdentifier b)) = (IntegerLiteral 1)) (PropertyAccess (PropertyAccess .. (SimpleIdentifier c)) . (SimpleIdentifier d)))"
    );
    assert_eq!(
        expr("o..m(1)..[0] = x"),
        "(CascadeExpression (SimpleIdentifier o) (MethodInvocation .. (SimpleIdentifier m) (ArgumentList ( (IntegerLiteral 1) ))) (AssignmentExpression (IndexExpression .. [ (IntegerLiteral 0) ]) = (SimpleIdentifier x)))"
    );
}

#[test]
fn test_cascade_applies_to_whole_conditional() {
    assert_eq!(
        expr("c ? a : b..m()"),
        "(CascadeExpression (ConditionalExpression (SimpleIdentifier c) ? (SimpleIdentifier a) : (SimpleIdentifier b)) (MethodInvocation .. (SimpleIdentifier m) (ArgumentList ( ))))"
    );
}

#[test]
fn test_expression_without_cascade_stops_at_sections() {
    let parsed = parse_with("a = b..c", |p| p.parse_expression_without_cascade());
    assert!(!parsed.has_errors());
    assert_eq!(parsed.rest, TokenKind::DotDot);
    assert_eq!(
        parsed.dump(),
        "(AssignmentExpression (SimpleIdentifier a) = (SimpleIdentifier b))"
    );
}

#[test]
fn test_is_not_and_as() {
    assert_eq!(
        expr("x is! int"),
        "(IsExpression (SimpleIdentifier x) is ! (TypeName (SimpleIdentifier int)))"
    );
    assert_eq!(
        expr("x as p.T"),
        "(AsExpression (SimpleIdentifier x) as (TypeName (PrefixedIdentifier (SimpleIdentifier p) . (SimpleIdentifier T))))"
    );
}

#[test]
fn test_selectors() {
    assert_eq!(
        expr("a.b"),
        "(PrefixedIdentifier (SimpleIdentifier a) . (SimpleIdentifier b))"
    );
    assert_eq!(
        expr("a.b.c"),
        "(PropertyAccess (PrefixedIdentifier (SimpleIdentifier a) . (SimpleIdentifier b)) . (SimpleIdentifier c))"
    );
    assert_eq!(
        expr("a[0].x"),
        "(PropertyAccess (IndexExpression (SimpleIdentifier a) [ (IntegerLiteral 0) ]) . (SimpleIdentifier x))"
    );
    assert_eq!(
        expr("o.m(1)"),
        "(MethodInvocation (SimpleIdentifier o) . (SimpleIdentifier m) (ArgumentList ( (IntegerLiteral 1) )))"
    );
    assert_eq!(
        expr("(f)(x)"),
        "(FunctionExpressionInvocation (ParenthesizedExpression ( (SimpleIdentifier f) )) (ArgumentList ( (SimpleIdentifier x) )))"
    );
}

#[test]
fn test_named_argument() {
    assert_eq!(
        expr("f(a, b: 2)"),
        "(MethodInvocation (SimpleIdentifier f) (ArgumentList ( (SimpleIdentifier a) , (NamedExpression (Label (SimpleIdentifier b) :) (IntegerLiteral 2)) )))"
    );
}

#[test]
fn test_prefix_and_postfix() {
    assert_eq!(
        expr("-x++"),
        "(PrefixExpression - (PostfixExpression (SimpleIdentifier x) ++))"
    );
    assert_eq!(
        expr("++a.b"),
        "(PrefixExpression ++ (PrefixedIdentifier (SimpleIdentifier a) . (SimpleIdentifier b)))"
    );
}

#[test]
fn test_collection_literals() {
    assert_eq!(
        expr("const <int>[1, 2,]"),
        "(ListLiteral const (TypeArgumentList < (TypeName (SimpleIdentifier int)) >) [ (IntegerLiteral 1) , (IntegerLiteral 2) , ])"
    );
    assert_eq!(
        expr("{'a': 1}"),
        "(MapLiteral { (MapLiteralEntry (SimpleStringLiteral 'a') : (IntegerLiteral 1)) })"
    );
}

#[test]
fn test_nested_type_arguments_split_shift() {
    assert_eq!(
        expr("<List<int>>[]"),
        "(ListLiteral (TypeArgumentList < (TypeName (SimpleIdentifier List) (TypeArgumentList < (TypeName (SimpleIdentifier int)) >)) >) [ ])"
    );
}

#[test]
fn test_instance_creation() {
    assert_eq!(
        expr("new p.A.named(1)"),
        "(InstanceCreationExpression new (ConstructorName (TypeName (PrefixedIdentifier (SimpleIdentifier p) . (SimpleIdentifier A))) . (SimpleIdentifier named)) (ArgumentList ( (IntegerLiteral 1) )))"
    );
    assert_eq!(
        expr("const A()"),
        "(InstanceCreationExpression const (ConstructorName (TypeName (SimpleIdentifier A))) (ArgumentList ( )))"
    );
}

#[test]
fn test_adjacent_strings() {
    assert_eq!(
        expr("'a' 'b'"),
        "(AdjacentStrings (SimpleStringLiteral 'a') (SimpleStringLiteral 'b'))"
    );
}

#[test]
fn test_throw() {
    assert_eq!(
        expr("throw e"),
        "(ThrowExpression throw (SimpleIdentifier e))"
    );
}

#[test]
fn test_missing_operand_is_placeholder() {
    let parsed = parse_with("a + ;", |p| p.parse_expression());
    assert_eq!(
        parsed.dump(),
        "(BinaryExpression (SimpleIdentifier a) + (SimpleIdentifier <missing>))"
    );
    assert_eq!(parsed.codes(), vec![ErrorCode::E1003]);
    assert_eq!(parsed.rest, TokenKind::Semicolon);
}

#[test]
fn test_assignment_to_literal_is_reported() {
    let parsed = parse_with("1 = 2", |p| p.parse_expression());
    assert_eq!(parsed.codes(), vec![ErrorCode::E1014]);
    assert_eq!(
        parsed.dump(),
        "(AssignmentExpression (IntegerLiteral 1) = (IntegerLiteral 2))"
    );
}

#[test]
fn test_unclosed_argument_list() {
    let parsed = parse_with("f(a", |p| p.parse_expression());
    assert_eq!(parsed.codes(), vec![ErrorCode::E1002]);
    assert_eq!(
        parsed.dump(),
        "(MethodInvocation (SimpleIdentifier f) (ArgumentList ( (SimpleIdentifier a) <missing>))"
    );
}
