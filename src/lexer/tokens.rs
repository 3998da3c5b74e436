use std::fmt::Display;

use crate::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Number,
    String,
    Identifier,

    Semicolon,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Dot,

    // Reserved
    Let,
    If,
    Else,
    While,
    Do,
    For,
    Def,
    Return,
    True,
    False,
    Null,

    SimpleAssign,  // =
    ComplexAssign, // += -= *= /=

    AdditiveOperator,       // + -
    MultiplicativeOperator, // * /
    RelationalOperator,     // > >= < <=
    EqualityOperator,       // == !=

    LogicalAnd, // &&
    LogicalOr,  // ||
    LogicalNot, // !
}

impl TokenKind {
    /// Whether this kind starts a literal production.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    pub fn is_assignment_operator(&self) -> bool {
        matches!(self, TokenKind::SimpleAssign | TokenKind::ComplexAssign)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Semicolon => ";",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Def => "def",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            other => return write!(f, "{:?}", other),
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{ kind: {:?}, value: {:?} }}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// One-line dump used by the `--tokens` CLI mode.
    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            format!("{:?} ({}) @{}", self.kind, self.value, self.span.start.0)
        } else {
            format!("{:?} `{}` @{}", self.kind, self.value, self.span.start.0)
        }
    }
}
