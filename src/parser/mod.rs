//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the predictive recursive-descent parser that turns
//! the token stream into a `Program`. Every grammar production is one
//! function, and a single token of lookahead picks between alternatives:
//!
//! - Statement parsing (variables, functions, control flow, blocks)
//! - Expression parsing, one function per precedence level
//! - A node factory layer for the literal subset of the grammar
//!
//! Binary precedence levels share a left fold helper that receives the
//! next-higher level as a plain function reference.

pub mod expr;
pub mod factory;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
