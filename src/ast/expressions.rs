use std::fmt::Display;

use serde::Serialize;

use super::ast::{serialize_number, Expr};

// LITERALS

/// Identifier
/// A bare name, also used for declaration names and parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    pub name: String,
}

/// Numeric Literal
/// Integral values serialize as JSON integers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct NumericLiteral {
    #[serde(serialize_with = "serialize_number")]
    pub value: f64,
}

/// String Literal
/// Holds the lexeme with its delimiting quotes removed. Escapes are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BooleanLiteral {
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct NullLiteral {
    pub value: (),
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
}

impl AssignmentOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "=" => Some(AssignmentOperator::Assign),
            "+=" => Some(AssignmentOperator::AddAssign),
            "-=" => Some(AssignmentOperator::SubAssign),
            "*=" => Some(AssignmentOperator::MulAssign),
            "/=" => Some(AssignmentOperator::DivAssign),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl LogicalOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "&&" => Some(LogicalOperator::And),
            "||" => Some(LogicalOperator::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

/// Relational, equality, additive and multiplicative operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEquals,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEquals,
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
}

impl BinaryOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Sub),
            "*" => Some(BinaryOperator::Mul),
            "/" => Some(BinaryOperator::Div),
            ">" => Some(BinaryOperator::Greater),
            ">=" => Some(BinaryOperator::GreaterEquals),
            "<" => Some(BinaryOperator::Less),
            "<=" => Some(BinaryOperator::LessEquals),
            "==" => Some(BinaryOperator::Equals),
            "!=" => Some(BinaryOperator::NotEquals),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    Not,
}

impl UnaryOperator {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(UnaryOperator::Plus),
            "-" => Some(UnaryOperator::Minus),
            "!" => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
        }
    }
}

macro_rules! impl_operator_display {
    ($($operator:ty),*) => {
        $(
            impl Display for $operator {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

impl_operator_display!(AssignmentOperator, LogicalOperator, BinaryOperator, UnaryOperator);

// COMPOUND EXPRESSIONS

/// Left side of an assignment.
///
/// Only built through `TryFrom<Expr>`, which rejects every other expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssignmentTarget {
    Identifier(Identifier),
    Member(MemberExpression),
}

impl TryFrom<Expr> for AssignmentTarget {
    type Error = Expr;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Identifier(identifier) => Ok(AssignmentTarget::Identifier(identifier)),
            Expr::Member(member) => Ok(AssignmentTarget::Member(member)),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub left: Box<AssignmentTarget>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Expr>,
}

/// Member Expression
/// `object.property` when not computed, `object[property]` when computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct MemberExpression {
    pub computed: bool,
    pub object: Box<Expr>,
    pub property: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CallExpression {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

/// Comma separated assignments, only found in a `for` initializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SequenceExpression {
    pub assignments: Vec<AssignmentExpression>,
}
