//! Pluggable node construction for the literal grammar subset.
//!
//! A [`FactoryParser`] knows the grammar of programs made of empty, block and
//! expression statements over numeric and string literals. Which shape it
//! builds is decided by the [`NodeFactory`] handed to its constructor:
//!
//! - [`DefaultFactory`] builds tagged JSON objects, the same shape the full
//!   parser serializes to
//! - [`SExpressionFactory`] builds bracketed prefix lists, `(begin (42))`
//!
//! The full grammar in `stmt`/`expr` does not go through a factory and always
//! produces typed AST nodes.

use std::fmt::Display;

use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    ast::{
        ast::serialize_number,
        expressions::{NumericLiteral, StringLiteral},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_numeric_literal, parse_string_literal, unexpected_literal},
    parser::Parser,
};

/// Builds one node per producible kind.
pub trait NodeFactory {
    type Node;

    fn program(&self, body: Vec<Self::Node>) -> Self::Node;
    fn empty_statement(&self) -> Self::Node;
    fn block_statement(&self, body: Vec<Self::Node>) -> Self::Node;
    fn expression_statement(&self, expression: Self::Node) -> Self::Node;
    fn string_literal(&self, value: &str) -> Self::Node;
    fn numeric_literal(&self, value: f64) -> Self::Node;
}

/// Tagged-node objects: `{"type": "NumericLiteral", "value": 42}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl NodeFactory for DefaultFactory {
    type Node = Value;

    fn program(&self, body: Vec<Value>) -> Value {
        json!({ "type": "Program", "body": body })
    }

    fn empty_statement(&self) -> Value {
        json!({ "type": "EmptyStatement" })
    }

    fn block_statement(&self, body: Vec<Value>) -> Value {
        json!({ "type": "BlockStatement", "body": body })
    }

    fn expression_statement(&self, expression: Value) -> Value {
        json!({ "type": "ExpressionStatement", "expression": expression })
    }

    fn string_literal(&self, value: &str) -> Value {
        json!({ "type": "StringLiteral", "value": value })
    }

    fn numeric_literal(&self, value: f64) -> Value {
        let value = serialize_number(&value, serde_json::value::Serializer).unwrap_or(Value::Null);

        json!({ "type": "NumericLiteral", "value": value })
    }
}

/// A minimal s-expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SExpr {
    Nil,
    Number(#[serde(serialize_with = "serialize_number")] f64),
    Symbol(String),
    List(Vec<SExpr>),
}

impl Display for SExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SExpr::Nil => write!(f, "nil"),
            SExpr::Number(value) => write!(f, "{}", value),
            SExpr::Symbol(symbol) => write!(f, "{}", symbol),
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Prefix lists: programs and blocks become `(begin (...))`, statements
/// collapse to their expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct SExpressionFactory;

impl NodeFactory for SExpressionFactory {
    type Node = SExpr;

    fn program(&self, body: Vec<SExpr>) -> SExpr {
        SExpr::List(vec![SExpr::Symbol(String::from("begin")), SExpr::List(body)])
    }

    fn empty_statement(&self) -> SExpr {
        SExpr::Nil
    }

    fn block_statement(&self, body: Vec<SExpr>) -> SExpr {
        SExpr::List(vec![SExpr::Symbol(String::from("begin")), SExpr::List(body)])
    }

    fn expression_statement(&self, expression: SExpr) -> SExpr {
        expression
    }

    fn string_literal(&self, value: &str) -> SExpr {
        SExpr::Symbol(format!("\"{}\"", value))
    }

    fn numeric_literal(&self, value: f64) -> SExpr {
        SExpr::Number(value)
    }
}

/// Parser for the literal subset, emitting nodes through a [`NodeFactory`].
///
/// Program : OptStatementList
/// Statement : EmptyStatement | BlockStatement | ExpressionStatement
/// ExpressionStatement : Literal ';'
/// Literal : NumericLiteral | StringLiteral
pub struct FactoryParser<F: NodeFactory> {
    parser: Parser,
    factory: F,
}

impl<F: NodeFactory> FactoryParser<F> {
    pub fn new(factory: F, file: Option<String>) -> Self {
        FactoryParser {
            parser: Parser::new(file),
            factory,
        }
    }

    pub fn parse(&mut self, source: &str) -> Result<F::Node, Error> {
        self.parser.init(source)?;

        let body = if self.parser.has_tokens() {
            self.statement_list(None)?
        } else {
            vec![]
        };

        Ok(self.factory.program(body))
    }

    fn statement_list(&mut self, stop_kind: Option<TokenKind>) -> Result<Vec<F::Node>, Error> {
        let mut statements = vec![self.statement()?];

        while let Some(kind) = self.parser.lookahead_kind() {
            if Some(kind) == stop_kind {
                break;
            }
            statements.push(self.statement()?);
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<F::Node, Error> {
        self.parser.enter()?;
        let statement = self.dispatch_statement();
        self.parser.leave();
        statement
    }

    fn dispatch_statement(&mut self) -> Result<F::Node, Error> {
        match self.parser.lookahead_kind() {
            Some(TokenKind::Semicolon) => {
                self.parser.eat(TokenKind::Semicolon)?;
                Ok(self.factory.empty_statement())
            }
            Some(TokenKind::OpenCurly) => self.block_statement(),
            _ => self.expression_statement(),
        }
    }

    fn block_statement(&mut self) -> Result<F::Node, Error> {
        self.parser.eat(TokenKind::OpenCurly)?;

        let body = if !self.parser.is_at(TokenKind::CloseCurly) {
            self.statement_list(Some(TokenKind::CloseCurly))?
        } else {
            vec![]
        };

        self.parser.eat(TokenKind::CloseCurly)?;

        Ok(self.factory.block_statement(body))
    }

    fn expression_statement(&mut self) -> Result<F::Node, Error> {
        let expression = self.literal()?;
        self.parser.eat(TokenKind::Semicolon)?;

        Ok(self.factory.expression_statement(expression))
    }

    fn literal(&mut self) -> Result<F::Node, Error> {
        match self.parser.lookahead_kind() {
            Some(TokenKind::Number) => {
                let NumericLiteral { value } = parse_numeric_literal(&mut self.parser)?;
                Ok(self.factory.numeric_literal(value))
            }
            Some(TokenKind::String) => {
                let StringLiteral { value } = parse_string_literal(&mut self.parser)?;
                Ok(self.factory.string_literal(&value))
            }
            _ => Err(unexpected_literal(&self.parser)),
        }
    }
}
