use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_RULE, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

/// A lexical rule. Rules without a kind are skipped (whitespace, comments).
pub struct Rule {
    pub regex: Regex,
    pub kind: Option<TokenKind>,
}

lazy_static! {
    /// Tried in order against the unconsumed input; the first match wins.
    static ref RULES: Vec<Rule> = vec![
        // Whitespace
        MK_RULE!(r"\s+"),

        // Comments
        MK_RULE!(r"//.*"),
        MK_RULE!(r"/\*[\s\S]*?\*/"),

        // Symbols, delimiters
        MK_RULE!(r";", TokenKind::Semicolon),
        MK_RULE!(r"\{", TokenKind::OpenCurly),
        MK_RULE!(r"\}", TokenKind::CloseCurly),
        MK_RULE!(r"\(", TokenKind::OpenParen),
        MK_RULE!(r"\)", TokenKind::CloseParen),
        MK_RULE!(r"\[", TokenKind::OpenBracket),
        MK_RULE!(r"\]", TokenKind::CloseBracket),
        MK_RULE!(r",", TokenKind::Comma),
        MK_RULE!(r"\.", TokenKind::Dot),

        // Keywords
        MK_RULE!(r"\blet\b", TokenKind::Let),
        MK_RULE!(r"\bif\b", TokenKind::If),
        MK_RULE!(r"\belse\b", TokenKind::Else),
        MK_RULE!(r"\btrue\b", TokenKind::True),
        MK_RULE!(r"\bfalse\b", TokenKind::False),
        MK_RULE!(r"\bnull\b", TokenKind::Null),
        MK_RULE!(r"\bwhile\b", TokenKind::While),
        MK_RULE!(r"\bdo\b", TokenKind::Do),
        MK_RULE!(r"\bfor\b", TokenKind::For),
        MK_RULE!(r"\bdef\b", TokenKind::Def),
        MK_RULE!(r"\breturn\b", TokenKind::Return),

        // Numbers, ASCII digits only
        MK_RULE!(r"[0-9]+", TokenKind::Number),

        // Identifiers, ASCII word characters only
        MK_RULE!(r"[A-Za-z0-9_]+", TokenKind::Identifier),

        // Equality must precede simple assignment
        MK_RULE!(r"[=!]=", TokenKind::EqualityOperator),

        // Assignment
        MK_RULE!(r"=", TokenKind::SimpleAssign),
        MK_RULE!(r"[*/+\-]=", TokenKind::ComplexAssign),

        // Math and relational operators
        MK_RULE!(r"[+\-]", TokenKind::AdditiveOperator),
        MK_RULE!(r"[*/]", TokenKind::MultiplicativeOperator),
        MK_RULE!(r"[><]=?", TokenKind::RelationalOperator),

        // Logical operators
        MK_RULE!(r"&&", TokenKind::LogicalAnd),
        MK_RULE!(r"\|\|", TokenKind::LogicalOr),
        MK_RULE!(r"!", TokenKind::LogicalNot),

        // Strings
        MK_RULE!(r#""[^"]*""#, TokenKind::String),
        MK_RULE!(r"'[^']*'", TokenKind::String),
    ];
}

/// Pull-based tokenizer over an in-memory source.
///
/// The tokenizer holds a cursor into the source and hands out one token per
/// [`Tokenizer::next_token`] call. It can be re-initialised for another
/// source with [`Tokenizer::init`].
#[derive(Clone, Debug)]
pub struct Tokenizer {
    source: String,
    cursor: usize,
    file: Rc<String>,
}

impl Tokenizer {
    pub fn new(file: Option<String>) -> Tokenizer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Tokenizer {
            source: String::new(),
            cursor: 0,
            file: file_name,
        }
    }

    /// Resets the cursor and stores a new source.
    pub fn init(&mut self, source: &str) {
        self.source = String::from(source);
        self.cursor = 0;
    }

    pub fn is_eof(&self) -> bool {
        self.cursor >= self.source.len()
    }

    pub fn has_more_tokens(&self) -> bool {
        !self.is_eof()
    }

    pub fn position(&self) -> Position {
        Position(self.cursor as u32, Rc::clone(&self.file))
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Returns the next significant token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, Error> {
        loop {
            if !self.has_more_tokens() {
                return Ok(None);
            }

            let remaining = &self.source[self.cursor..];
            let matched = RULES
                .iter()
                .find_map(|rule| rule.regex.find(remaining).map(|m| (rule.kind, m.end())));

            let Some((kind, length)) = matched else {
                let token = remaining.chars().next().map(String::from).unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token },
                    self.position(),
                ));
            };

            let start = self.cursor;
            self.cursor += length;

            let Some(kind) = kind else {
                trace!("skipped {} bytes at {}", length, start);
                continue;
            };

            let value = String::from(&self.source[start..self.cursor]);

            return Ok(Some(MK_TOKEN!(
                kind,
                value,
                Span {
                    start: Position(start as u32, Rc::clone(&self.file)),
                    end: self.position(),
                }
            )));
        }
    }
}

/// Drains a fresh tokenizer over `source` into a vector.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Tokenizer::new(file);
    lex.init(source);

    let mut tokens = vec![];
    while let Some(token) = lex.next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}
