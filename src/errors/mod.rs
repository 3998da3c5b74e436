//! Error types and error handling for the parser.
//!
//! This module defines the error types raised by the tokenizer and the
//! grammar engine. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexical and syntax failures
//! - Helpful error messages and suggestions

pub mod errors;
