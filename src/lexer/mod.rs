//! Lexical analysis module.
//!
//! This module contains the tokenizer that turns source text into a lazy
//! stream of tokens for the parser. It handles:
//!
//! - An ordered table of regex rules where the first match wins
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace skipping

pub mod lexer;
pub mod tokens;
