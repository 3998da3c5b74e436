//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser is predictive:
//! it keeps exactly one token of lookahead, pulled on demand from its
//! tokenizer, and never backtracks. Grammar productions live in `stmt` and
//! `expr` as free functions over `&mut Parser`.
//!
//! It maintains a lookup table for statement handlers keyed by the token
//! kind that starts the statement.

use std::collections::HashMap;

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Tokenizer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{create_stmt_lookups, StmtHandler, StmtLookup},
    stmt::parse_program,
};

/// Deepest statement or expression nesting a parse may reach.
pub const MAX_NESTING_DEPTH: usize = 96;

/// The main parser structure that maintains parsing state.
///
/// A parser owns its tokenizer and the single pending token. It can be
/// reused for any number of sources; each call to [`Parser::parse`] starts
/// from a clean state.
pub struct Parser {
    /// Source of tokens, advanced one token at a time
    tokenizer: Tokenizer,
    /// The next unconsumed token, `None` once input is exhausted
    lookahead: Option<Token>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Current statement/expression nesting, bounded by [`MAX_NESTING_DEPTH`]
    depth: usize,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `file` - Optional name of the source, used in error positions
    pub fn new(file: Option<String>) -> Self {
        let mut parser = Parser {
            tokenizer: Tokenizer::new(file),
            lookahead: None,
            stmt_lookup: HashMap::new(),
            depth: 0,
        };
        create_stmt_lookups(&mut parser);
        parser
    }

    /// Parses a complete program.
    ///
    /// The first syntax error aborts the parse and no partial tree is kept.
    pub fn parse(&mut self, source: &str) -> Result<Program, Error> {
        debug!("parsing {} ({} bytes)", self.tokenizer.file(), source.len());

        self.init(source)?;
        let program = parse_program(self)?;

        debug!("parsed {} top-level statements", program.body.len());
        Ok(program)
    }

    /// Resets the tokenizer to `source` and primes the lookahead.
    pub fn init(&mut self, source: &str) -> Result<(), Error> {
        self.lookahead = None;
        self.depth = 0;
        self.tokenizer.init(source);
        self.lookahead = self.tokenizer.next_token()?;
        Ok(())
    }

    /// Returns the pending token without consuming it.
    pub fn lookahead(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    /// Returns the kind of the pending token.
    pub fn lookahead_kind(&self) -> Option<TokenKind> {
        self.lookahead.as_ref().map(|token| token.kind)
    }

    /// Whether the pending token is of the given kind.
    pub fn is_at(&self, kind: TokenKind) -> bool {
        self.lookahead_kind() == Some(kind)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.lookahead.is_some()
    }

    /// Consumes the pending token, which must be of `expected_kind`.
    ///
    /// # Returns
    ///
    /// The consumed token. Fails with `UnexpectedEndOfInput` when no token is
    /// pending and with `UnexpectedToken` on a kind mismatch; the lookahead
    /// is left untouched in both cases.
    pub fn eat(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let Some(token) = self.lookahead.take() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedEndOfInput {
                    expected: expected_kind.to_string(),
                },
                self.tokenizer.position(),
            ));
        };

        if token.kind != expected_kind {
            let error = unexpected_token(&token, expected_kind);
            self.lookahead = Some(token);
            return Err(error);
        }

        self.lookahead = self.tokenizer.next_token()?;
        Ok(token)
    }

    /// Opens one nesting level, failing with `NestingTooDeep` at the limit.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs `production` one nesting level deeper.
    pub fn nested<T>(
        &mut self,
        production: fn(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.enter()?;
        let result = production(self);
        self.leave();
        result
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind that starts the statement
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Position of the pending token, or the end of input when there is none.
    pub fn get_position(&self) -> Position {
        match &self.lookahead {
            Some(token) => token.span.start.clone(),
            None => self.tokenizer.position(),
        }
    }
}

/// Builds the error for a token that does not fit the production.
pub fn unexpected_token(token: &Token, expected_kind: TokenKind) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
            expected: expected_kind.to_string(),
        },
        token.span.start.clone(),
    )
}
