//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Literals and statement lists
//! - Variable and function declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - The factory driven literal parser

use rstest::rstest;
use serde_json::{json, Value};

use crate::errors::errors::ErrorImpl;

use super::{
    factory::{DefaultFactory, FactoryParser, SExpr, SExpressionFactory},
    parser::{Parser, MAX_NESTING_DEPTH},
};

fn parse(source: &str) -> Value {
    let program = Parser::new(Some("test.lt".to_string()))
        .parse(source)
        .unwrap();
    serde_json::to_value(program).unwrap()
}

/// The expression of the first statement.
fn expression(source: &str) -> Value {
    parse(source)["body"][0]["expression"].clone()
}

fn error_name(source: &str) -> String {
    Parser::new(None)
        .parse(source)
        .unwrap_err()
        .get_error_name()
        .to_string()
}

fn num(value: i64) -> Value {
    json!({ "type": "NumericLiteral", "value": value })
}

fn id(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

#[test]
fn test_parse_literals() {
    assert_eq!(expression("42;"), num(42));
    assert_eq!(expression(r#""hello";"#), json!({ "type": "StringLiteral", "value": "hello" }));
    assert_eq!(expression("'hello';"), json!({ "type": "StringLiteral", "value": "hello" }));
    assert_eq!(expression("true;"), json!({ "type": "BooleanLiteral", "value": true }));
    assert_eq!(expression("false;"), json!({ "type": "BooleanLiteral", "value": false }));
    assert_eq!(expression("null;"), json!({ "type": "NullLiteral", "value": null }));
}

#[test]
fn test_string_escapes_are_kept_verbatim() {
    assert_eq!(
        expression(r#""a\nb";"#),
        json!({ "type": "StringLiteral", "value": "a\\nb" })
    );
}

#[test]
fn test_parse_statement_list() {
    assert_eq!(
        parse(r#"'hello'; 42;"#),
        json!({
            "type": "Program",
            "body": [
                { "type": "ExpressionStatement", "expression": { "type": "StringLiteral", "value": "hello" } },
                { "type": "ExpressionStatement", "expression": num(42) }
            ]
        })
    );
}

#[test]
fn test_parse_empty_statement() {
    assert_eq!(
        parse(";"),
        json!({ "type": "Program", "body": [{ "type": "EmptyStatement" }] })
    );
}

#[test]
fn test_parse_nested_blocks() {
    assert_eq!(
        parse("{ 42; { 'hello'; } {} }"),
        json!({
            "type": "Program",
            "body": [{
                "type": "BlockStatement",
                "body": [
                    { "type": "ExpressionStatement", "expression": num(42) },
                    {
                        "type": "BlockStatement",
                        "body": [{ "type": "ExpressionStatement", "expression": { "type": "StringLiteral", "value": "hello" } }]
                    },
                    { "type": "BlockStatement", "body": [] }
                ]
            }]
        })
    );
}

#[test]
fn test_parse_empty_program() {
    assert_eq!(parse(""), json!({ "type": "Program", "body": [] }));
    assert_eq!(parse("  // only a comment\n"), json!({ "type": "Program", "body": [] }));
}

#[test]
fn test_parse_variable_declarations() {
    assert_eq!(
        parse("let x = 42;"),
        json!({
            "type": "Program",
            "body": [{
                "type": "VariableStatement",
                "declarations": [{ "type": "VariableDeclaration", "id": id("x"), "init": num(42) }]
            }]
        })
    );

    assert_eq!(
        parse("let a, b = 2;")["body"][0]["declarations"],
        json!([
            { "type": "VariableDeclaration", "id": id("a"), "init": null },
            { "type": "VariableDeclaration", "id": id("b"), "init": num(2) }
        ])
    );
}

#[test]
fn test_variable_initializer_is_assignment_expression() {
    assert_eq!(
        parse("let x = y = 10;")["body"][0]["declarations"][0]["init"],
        json!({ "type": "AssignmentExpression", "operator": "=", "left": id("y"), "right": num(10) })
    );
}

#[test]
fn test_parse_if_else() {
    assert_eq!(
        parse("if (x) { x = 1; } else x = 2;"),
        json!({
            "type": "Program",
            "body": [{
                "type": "IfStatement",
                "test": id("x"),
                "consequent": {
                    "type": "BlockStatement",
                    "body": [{
                        "type": "ExpressionStatement",
                        "expression": { "type": "AssignmentExpression", "operator": "=", "left": id("x"), "right": num(1) }
                    }]
                },
                "alternate": {
                    "type": "ExpressionStatement",
                    "expression": { "type": "AssignmentExpression", "operator": "=", "left": id("x"), "right": num(2) }
                }
            }]
        })
    );
}

#[test]
fn test_if_without_else_has_null_alternate() {
    assert_eq!(parse("if (x) ;")["body"][0]["alternate"], Value::Null);
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let statement = parse("if (a) if (b) 1; else 2;")["body"][0].clone();

    assert_eq!(statement["alternate"], Value::Null);
    assert_eq!(statement["consequent"]["alternate"]["expression"], num(2));
}

#[test]
fn test_parse_while() {
    assert_eq!(
        parse("while (x > 10) { x -= 1; }")["body"][0],
        json!({
            "type": "WhileStatement",
            "test": { "type": "BinaryExpression", "operator": ">", "left": id("x"), "right": num(10) },
            "body": {
                "type": "BlockStatement",
                "body": [{
                    "type": "ExpressionStatement",
                    "expression": { "type": "AssignmentExpression", "operator": "-=", "left": id("x"), "right": num(1) }
                }]
            }
        })
    );
}

#[test]
fn test_parse_do_while() {
    assert_eq!(
        parse("do { x -= 1; } while (x > 10);")["body"][0],
        json!({
            "type": "DoWhileStatement",
            "body": {
                "type": "BlockStatement",
                "body": [{
                    "type": "ExpressionStatement",
                    "expression": { "type": "AssignmentExpression", "operator": "-=", "left": id("x"), "right": num(1) }
                }]
            },
            "test": { "type": "BinaryExpression", "operator": ">", "left": id("x"), "right": num(10) }
        })
    );
}

#[test]
fn test_do_while_requires_semicolon() {
    assert_eq!(error_name("do {} while (x)"), "UnexpectedEndOfInput");
}

#[test]
fn test_parse_for_with_variable_init() {
    assert_eq!(
        parse("for (let i = 0; i < 10; i += 1) { x += 1; }")["body"][0],
        json!({
            "type": "ForStatement",
            "init": {
                "type": "VariableStatement",
                "declarations": [{ "type": "VariableDeclaration", "id": id("i"), "init": num(0) }]
            },
            "test": { "type": "BinaryExpression", "operator": "<", "left": id("i"), "right": num(10) },
            "update": { "type": "AssignmentExpression", "operator": "+=", "left": id("i"), "right": num(1) },
            "body": {
                "type": "BlockStatement",
                "body": [{
                    "type": "ExpressionStatement",
                    "expression": { "type": "AssignmentExpression", "operator": "+=", "left": id("x"), "right": num(1) }
                }]
            }
        })
    );
}

#[test]
fn test_parse_for_with_sequence_init() {
    assert_eq!(
        parse("for (i = 0, j = 1; ; ) ;")["body"][0]["init"],
        json!({
            "type": "SequenceExpression",
            "assignments": [
                { "type": "AssignmentExpression", "operator": "=", "left": id("i"), "right": num(0) },
                { "type": "AssignmentExpression", "operator": "=", "left": id("j"), "right": num(1) }
            ]
        })
    );
}

#[test]
fn test_parse_empty_for() {
    assert_eq!(
        parse("for (;;) {}")["body"][0],
        json!({
            "type": "ForStatement",
            "init": null,
            "test": null,
            "update": null,
            "body": { "type": "BlockStatement", "body": [] }
        })
    );
}

#[rstest]
#[case("for (i = 0, j; ;) ;", "Identifier")]
#[case("for (x + 1; ;) ;", "BinaryExpression")]
#[case("for (f(); ;) ;", "CallExpression")]
fn test_for_init_rejects_non_assignments(#[case] source: &str, #[case] found: &str) {
    let error = Parser::new(None).parse(source).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidForInit");
    assert_eq!(
        error.to_string(),
        format!("unexpected expression: {}, expected AssignmentExpression", found)
    );
}

#[test]
fn test_parse_function_declaration() {
    assert_eq!(
        parse("def square(x) { return x * x; }")["body"][0],
        json!({
            "type": "FunctionDeclaration",
            "name": id("square"),
            "params": [id("x")],
            "body": {
                "type": "BlockStatement",
                "body": [{
                    "type": "ReturnStatement",
                    "argument": { "type": "BinaryExpression", "operator": "*", "left": id("x"), "right": id("x") }
                }]
            }
        })
    );
}

#[test]
fn test_parse_function_without_params_or_return_value() {
    assert_eq!(
        parse("def empty() { return; }")["body"][0],
        json!({
            "type": "FunctionDeclaration",
            "name": id("empty"),
            "params": [],
            "body": { "type": "BlockStatement", "body": [{ "type": "ReturnStatement", "argument": null }] }
        })
    );
}

#[test]
fn test_function_body_must_be_block() {
    assert_eq!(error_name("def f() return;"), "UnexpectedToken");
}

#[rstest]
#[case("x + y - z;", "-", "+")]
#[case("x * y / z;", "/", "*")]
#[case("a == b != c;", "!=", "==")]
#[case("a < b >= c;", ">=", "<")]
fn test_binary_operators_are_left_associative(
    #[case] source: &str,
    #[case] outer: &str,
    #[case] inner: &str,
) {
    let expr = expression(source);

    assert_eq!(expr["type"], "BinaryExpression");
    assert_eq!(expr["operator"], outer);
    assert_eq!(expr["left"]["operator"], inner);
    assert_eq!(expr["left"]["type"], "BinaryExpression");
}

#[test]
fn test_relational_binds_tighter_than_equality() {
    assert_eq!(
        expression("x + 5 > 10 == true;"),
        json!({
            "type": "BinaryExpression",
            "operator": "==",
            "left": {
                "type": "BinaryExpression",
                "operator": ">",
                "left": { "type": "BinaryExpression", "operator": "+", "left": id("x"), "right": num(5) },
                "right": num(10)
            },
            "right": { "type": "BooleanLiteral", "value": true }
        })
    );
}

#[test]
fn test_logical_and_binds_tighter_than_or() {
    assert_eq!(
        expression("x || y && z;"),
        json!({
            "type": "LogicalExpression",
            "operator": "||",
            "left": id("x"),
            "right": { "type": "LogicalExpression", "operator": "&&", "left": id("y"), "right": id("z") }
        })
    );
}

#[test]
fn test_logical_over_relational() {
    assert_eq!(
        expression("x > 5 && y < 10;"),
        json!({
            "type": "LogicalExpression",
            "operator": "&&",
            "left": { "type": "BinaryExpression", "operator": ">", "left": id("x"), "right": num(5) },
            "right": { "type": "BinaryExpression", "operator": "<", "left": id("y"), "right": num(10) }
        })
    );
}

#[test]
fn test_parse_unary() {
    assert_eq!(
        expression("-x;"),
        json!({ "type": "UnaryExpression", "operator": "-", "argument": id("x") })
    );
    assert_eq!(
        expression("!x;"),
        json!({ "type": "UnaryExpression", "operator": "!", "argument": id("x") })
    );
    assert_eq!(
        expression("+-x;"),
        json!({
            "type": "UnaryExpression",
            "operator": "+",
            "argument": { "type": "UnaryExpression", "operator": "-", "argument": id("x") }
        })
    );
}

#[test]
fn test_unary_binds_tighter_than_multiplicative() {
    assert_eq!(
        expression("-x * 2;"),
        json!({
            "type": "BinaryExpression",
            "operator": "*",
            "left": { "type": "UnaryExpression", "operator": "-", "argument": id("x") },
            "right": num(2)
        })
    );
}

#[test]
fn test_parse_member_expressions() {
    assert_eq!(
        expression("x.y;"),
        json!({ "type": "MemberExpression", "computed": false, "object": id("x"), "property": id("y") })
    );
    assert_eq!(
        expression("x[0] = 1;"),
        json!({
            "type": "AssignmentExpression",
            "operator": "=",
            "left": { "type": "MemberExpression", "computed": true, "object": id("x"), "property": num(0) },
            "right": num(1)
        })
    );
}

#[test]
fn test_member_chain_nests_leftwards() {
    assert_eq!(
        expression("a.b[c].d;"),
        json!({
            "type": "MemberExpression",
            "computed": false,
            "object": {
                "type": "MemberExpression",
                "computed": true,
                "object": { "type": "MemberExpression", "computed": false, "object": id("a"), "property": id("b") },
                "property": id("c")
            },
            "property": id("d")
        })
    );
}

#[test]
fn test_parse_call_expressions() {
    assert_eq!(
        expression("foo(x, 1 + 2);"),
        json!({
            "type": "CallExpression",
            "callee": id("foo"),
            "arguments": [
                id("x"),
                { "type": "BinaryExpression", "operator": "+", "left": num(1), "right": num(2) }
            ]
        })
    );
    assert_eq!(
        expression("console.log();"),
        json!({
            "type": "CallExpression",
            "callee": { "type": "MemberExpression", "computed": false, "object": id("console"), "property": id("log") },
            "arguments": []
        })
    );
}

#[test]
fn test_chained_calls() {
    assert_eq!(
        expression("foo(x)();"),
        json!({
            "type": "CallExpression",
            "callee": { "type": "CallExpression", "callee": id("foo"), "arguments": [id("x")] },
            "arguments": []
        })
    );
}

#[test]
fn test_call_result_is_not_a_member_object() {
    assert_eq!(error_name("f().x;"), "UnexpectedToken");
}

#[rstest]
#[case("1 = 2;", "NumericLiteral")]
#[case("a + b = 2;", "BinaryExpression")]
#[case("f() = 2;", "CallExpression")]
#[case("-x = 2;", "UnaryExpression")]
fn test_invalid_assignment_targets(#[case] source: &str, #[case] found: &str) {
    let error = Parser::new(None).parse(source).unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");
    assert_eq!(
        error.to_string(),
        format!("invalid left-hand side in assignment expression: {}", found)
    );
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_parenthesized_assignment_target() {
    assert_eq!(expression("(x) = 1;")["left"], id("x"));
}

#[test]
fn test_eat_reports_found_and_expected() {
    let error = Parser::new(None).parse("let x = 1 }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.to_string(), "unexpected token: \"}\", expected: \";\"");
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_eat_reports_end_of_input() {
    let error = Parser::new(None).parse("{ 42;").unwrap_err();

    assert_eq!(error.to_string(), "unexpected end of input, expected: \"}\"");
    assert_eq!(error.get_position().0, 5);
}

#[test]
fn test_lexical_error_propagates() {
    assert_eq!(error_name("let x = #;"), "UnrecognisedToken");
}

#[test]
fn test_parser_is_reusable() {
    let mut parser = Parser::new(None);

    assert!(parser.parse("let = 1;").is_err());
    let program = parser.parse("1;").unwrap();
    assert_eq!(program.body.len(), 1);
}

fn nested(open: &str, inner: &str, close: &str, depth: usize) -> String {
    format!("{}{}{}", open.repeat(depth), inner, close.repeat(depth))
}

#[test]
fn test_moderate_nesting_parses() {
    assert_eq!(expression(&(nested("(", "1", ")", 64) + ";")), num(1));

    let minus = expression(&format!("{}x;", "-".repeat(90)));
    assert_eq!(minus["type"], "UnaryExpression");

    let program = parse(&nested("{", "1;", "}", 64));
    assert_eq!(program["body"][0]["type"], "BlockStatement");
}

#[rstest]
#[case(nested("(", "1", ")", 10_000) + ";")]
#[case(format!("{}x;", "-".repeat(10_000)))]
#[case(nested("{", "1;", "}", 10_000))]
#[case(nested("f(", "1", ")", 10_000) + ";")]
#[case(format!("{}1;", "x = ".repeat(10_000)))]
#[case(format!("{}1;", "if (x) ".repeat(10_000)))]
fn test_deep_nesting_is_an_error(#[case] source: String) {
    let error = Parser::new(None).parse(&source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(
        error.kind(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
}

#[test]
fn test_nesting_depth_is_released() {
    let mut parser = Parser::new(None);

    assert!(parser.parse(&nested("(", "1", ")", 10_000)).is_err());

    let program = parser.parse(&(nested("(", "1", ")", 64) + ";")).unwrap();
    assert_eq!(program.body.len(), 1);
    assert_eq!(parser.depth(), 0);
}

#[test]
fn test_default_factory() {
    let mut parser = FactoryParser::new(DefaultFactory, None);

    assert_eq!(
        parser.parse("42; 'hi'; ; {}").unwrap(),
        json!({
            "type": "Program",
            "body": [
                { "type": "ExpressionStatement", "expression": num(42) },
                { "type": "ExpressionStatement", "expression": { "type": "StringLiteral", "value": "hi" } },
                { "type": "EmptyStatement" },
                { "type": "BlockStatement", "body": [] }
            ]
        })
    );
}

#[test]
fn test_default_factory_matches_full_parser() {
    let source = "42; { 'hello'; ; }";
    let from_factory = FactoryParser::new(DefaultFactory, None).parse(source).unwrap();

    assert_eq!(from_factory, parse(source));
}

#[test]
fn test_s_expression_factory() {
    let mut parser = FactoryParser::new(SExpressionFactory, None);
    let node = parser.parse(r#"42; { "hello"; }"#).unwrap();

    assert_eq!(node.to_string(), r#"(begin (42 (begin ("hello"))))"#);
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!(["begin", [42, ["begin", ["\"hello\""]]]])
    );
}

#[test]
fn test_s_expression_empty_statement_is_nil() {
    let node = FactoryParser::new(SExpressionFactory, None).parse(";").unwrap();

    assert_eq!(
        node,
        SExpr::List(vec![
            SExpr::Symbol("begin".to_string()),
            SExpr::List(vec![SExpr::Nil])
        ])
    );
}

#[test]
fn test_factory_parser_rejects_non_literals() {
    let error = FactoryParser::new(SExpressionFactory, None)
        .parse("x;")
        .unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedLiteral");
    assert_eq!(error.to_string(), "unexpected literal production: \"x\"");
}

#[test]
fn test_factory_parser_bounds_block_nesting() {
    let error = FactoryParser::new(SExpressionFactory, None)
        .parse(&nested("{", "1;", "}", 10_000))
        .unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");

    let node = FactoryParser::new(DefaultFactory, None)
        .parse(&nested("{", "1;", "}", 32))
        .unwrap();
    assert_eq!(node["body"][0]["type"], "BlockStatement");
}
