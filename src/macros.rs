//! Utility macros for the parser.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Creates a lexical rule from a pattern and an optional kind
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexical rule anchored at the start of the remaining input.
///
/// A rule without a kind consumes its match and produces no token.
///
/// # Example
///
/// ```ignore
/// MK_RULE!(r"\s+");
/// MK_RULE!(r";", TokenKind::Semicolon);
/// ```
#[macro_export]
macro_rules! MK_RULE {
    ($pattern:literal) => {
        Rule {
            regex: Regex::new(concat!("^", $pattern)).unwrap(),
            kind: None,
        }
    };
    ($pattern:literal, $kind:expr) => {
        Rule {
            regex: Regex::new(concat!("^", $pattern)).unwrap(),
            kind: Some($kind),
        }
    };
}
