use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;

/// A precedence level, passed by reference to the shared fold helpers.
pub type ExprHandler = fn(&mut Parser) -> Result<Expr, Error>;

pub fn create_stmt_lookups(parser: &mut Parser) {
    parser.stmt(TokenKind::Semicolon, parse_empty_stmt);
    parser.stmt(TokenKind::OpenCurly, |parser: &mut Parser| {
        parse_block_stmt(parser).map(Stmt::from)
    });
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Let, parse_var_stmt);
    parser.stmt(TokenKind::Def, parse_fn_decl_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);

    // Iteration
    parser.stmt(TokenKind::While, parse_iteration_stmt);
    parser.stmt(TokenKind::Do, parse_iteration_stmt);
    parser.stmt(TokenKind::For, parse_iteration_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
