use serde::{Serialize, Serializer};

use super::{expressions::*, statements::*};

/// Root of a parsed source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    /// Single-line JSON in the tagged-node shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Statement
///
/// Every statement node kind. Serialized untagged: each node struct carries
/// its own `type` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stmt {
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Empty(EmptyStatement),
    Variable(VariableStatement),
    If(IfStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    For(ForStatement),
    FunctionDeclaration(FunctionDeclaration),
    Return(ReturnStatement),
}

impl Stmt {
    pub fn type_name(&self) -> &'static str {
        match self {
            Stmt::Expression(_) => "ExpressionStatement",
            Stmt::Block(_) => "BlockStatement",
            Stmt::Empty(_) => "EmptyStatement",
            Stmt::Variable(_) => "VariableStatement",
            Stmt::If(_) => "IfStatement",
            Stmt::While(_) => "WhileStatement",
            Stmt::DoWhile(_) => "DoWhileStatement",
            Stmt::For(_) => "ForStatement",
            Stmt::FunctionDeclaration(_) => "FunctionDeclaration",
            Stmt::Return(_) => "ReturnStatement",
        }
    }
}

/// Expression
///
/// Every expression node kind, serialized the same way as [`Stmt`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Identifier(Identifier),
    NumericLiteral(NumericLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    NullLiteral(NullLiteral),
    Assignment(AssignmentExpression),
    Logical(LogicalExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Member(MemberExpression),
    Call(CallExpression),
}

impl Expr {
    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "Identifier",
            Expr::NumericLiteral(_) => "NumericLiteral",
            Expr::StringLiteral(_) => "StringLiteral",
            Expr::BooleanLiteral(_) => "BooleanLiteral",
            Expr::NullLiteral(_) => "NullLiteral",
            Expr::Assignment(_) => "AssignmentExpression",
            Expr::Logical(_) => "LogicalExpression",
            Expr::Binary(_) => "BinaryExpression",
            Expr::Unary(_) => "UnaryExpression",
            Expr::Member(_) => "MemberExpression",
            Expr::Call(_) => "CallExpression",
        }
    }
}

impl From<AssignmentTarget> for Expr {
    fn from(target: AssignmentTarget) -> Self {
        match target {
            AssignmentTarget::Identifier(identifier) => Expr::Identifier(identifier),
            AssignmentTarget::Member(member) => Expr::Member(member),
        }
    }
}

macro_rules! impl_from_node {
    ($target:ident, $($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for $target {
                fn from(node: $node) -> Self {
                    $target::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(
    Stmt,
    ExpressionStatement => Expression,
    BlockStatement => Block,
    EmptyStatement => Empty,
    VariableStatement => Variable,
    IfStatement => If,
    WhileStatement => While,
    DoWhileStatement => DoWhile,
    ForStatement => For,
    FunctionDeclaration => FunctionDeclaration,
    ReturnStatement => Return,
);

impl_from_node!(
    Expr,
    Identifier => Identifier,
    NumericLiteral => NumericLiteral,
    StringLiteral => StringLiteral,
    BooleanLiteral => BooleanLiteral,
    NullLiteral => NullLiteral,
    AssignmentExpression => Assignment,
    LogicalExpression => Logical,
    BinaryExpression => Binary,
    UnaryExpression => Unary,
    MemberExpression => Member,
    CallExpression => Call,
);

/// Writes integral values without a fractional part, `42` rather than `42.0`.
pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
