use log::trace;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{AssignmentExpression, Identifier, SequenceExpression},
        statements::{
            BlockStatement, DoWhileStatement, EmptyStatement, ExpressionStatement, ForInit,
            ForStatement, FunctionDeclaration, IfStatement, ReturnStatement, VariableDeclaration,
            VariableStatement, WhileStatement,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_assignment_expr, parse_expr, parse_identifier},
    parser::Parser,
};

/// Program : OptStatementList
///
/// An empty (or comment-only) source yields an empty body.
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let body = if parser.has_tokens() {
        parse_stmt_list(parser, None)?
    } else {
        vec![]
    };

    Ok(Program { body })
}

/// StatementList : Statement | StatementList Statement
///
/// Collects at least one statement, then keeps going until the lookahead is
/// `stop_kind` or input runs out.
pub fn parse_stmt_list(parser: &mut Parser, stop_kind: Option<TokenKind>) -> Result<Vec<Stmt>, Error> {
    let mut statements = vec![parse_stmt(parser)?];

    while let Some(kind) = parser.lookahead_kind() {
        if Some(kind) == stop_kind {
            break;
        }
        statements.push(parse_stmt(parser)?);
    }

    Ok(statements)
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.nested(dispatch_stmt)
}

fn dispatch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .lookahead_kind()
        .and_then(|kind| parser.get_stmt_lookup().get(&kind).copied());

    let stmt = match handler {
        Some(handler) => handler(parser)?,
        None => parse_expression_stmt(parser)?,
    };

    trace!("parsed {}", stmt.type_name());
    Ok(stmt)
}

pub fn parse_empty_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::Semicolon)?;
    Ok(EmptyStatement {}.into())
}

/// BlockStatement : '{' OptStatementList '}'
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStatement, Error> {
    parser.eat(TokenKind::OpenCurly)?;

    let body = if !parser.is_at(TokenKind::CloseCurly) {
        parse_stmt_list(parser, Some(TokenKind::CloseCurly))?
    } else {
        vec![]
    };

    parser.eat(TokenKind::CloseCurly)?;

    Ok(BlockStatement { body })
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser)?;
    parser.eat(TokenKind::Semicolon)?;

    Ok(ExpressionStatement { expression }.into())
}

/// VariableStatement : 'let' VariableDeclarationList ';'
pub fn parse_var_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let statement = parse_var_stmt_init(parser)?;
    parser.eat(TokenKind::Semicolon)?;

    Ok(statement.into())
}

/// `let` and its declarations, without the trailing `;`.
pub fn parse_var_stmt_init(parser: &mut Parser) -> Result<VariableStatement, Error> {
    parser.eat(TokenKind::Let)?;
    let declarations = parse_var_decl_list(parser)?;

    Ok(VariableStatement { declarations })
}

pub fn parse_var_decl_list(parser: &mut Parser) -> Result<Vec<VariableDeclaration>, Error> {
    let mut declarations = vec![parse_var_decl(parser)?];

    while parser.is_at(TokenKind::Comma) {
        parser.eat(TokenKind::Comma)?;
        declarations.push(parse_var_decl(parser)?);
    }

    Ok(declarations)
}

/// VariableDeclaration : Identifier OptVariableInitializer
pub fn parse_var_decl(parser: &mut Parser) -> Result<VariableDeclaration, Error> {
    let id = parse_identifier(parser)?;

    let init = if !parser.is_at(TokenKind::Semicolon) && !parser.is_at(TokenKind::Comma) {
        parser.eat(TokenKind::SimpleAssign)?;
        Some(parse_assignment_expr(parser)?)
    } else {
        None
    };

    Ok(VariableDeclaration { id, init })
}

/// IfStatement : 'if' '(' Expression ')' Statement OptElse
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::If)?;

    let test = parse_parenthesized_test(parser)?;
    let consequent = parse_stmt(parser)?;

    let alternate = if parser.is_at(TokenKind::Else) {
        parser.eat(TokenKind::Else)?;
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(IfStatement {
        test,
        consequent: Box::new(consequent),
        alternate,
    }
    .into())
}

pub fn parse_iteration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.lookahead_kind() {
        Some(TokenKind::While) => parse_while_stmt(parser),
        Some(TokenKind::Do) => parse_do_while_stmt(parser),
        _ => parse_for_stmt(parser),
    }
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::While)?;

    let test = parse_parenthesized_test(parser)?;
    let body = parse_stmt(parser)?;

    Ok(WhileStatement {
        test,
        body: Box::new(body),
    }
    .into())
}

/// DoWhileStatement : 'do' Statement 'while' '(' Expression ')' ';'
pub fn parse_do_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::Do)?;

    let body = parse_stmt(parser)?;

    parser.eat(TokenKind::While)?;
    let test = parse_parenthesized_test(parser)?;
    parser.eat(TokenKind::Semicolon)?;

    Ok(DoWhileStatement {
        body: Box::new(body),
        test,
    }
    .into())
}

/// ForStatement : 'for' '(' OptInit ';' OptExpression ';' OptExpression ')' Statement
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::For)?;
    parser.eat(TokenKind::OpenParen)?;

    let init = if !parser.is_at(TokenKind::Semicolon) {
        Some(parse_for_init(parser)?)
    } else {
        None
    };
    parser.eat(TokenKind::Semicolon)?;

    let test = if !parser.is_at(TokenKind::Semicolon) {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.eat(TokenKind::Semicolon)?;

    let update = if !parser.is_at(TokenKind::CloseParen) {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.eat(TokenKind::CloseParen)?;

    let body = parse_stmt(parser)?;

    Ok(ForStatement {
        init,
        test,
        update,
        body: Box::new(body),
    }
    .into())
}

pub fn parse_for_init(parser: &mut Parser) -> Result<ForInit, Error> {
    if parser.is_at(TokenKind::Let) {
        return Ok(ForInit::Variable(parse_var_stmt_init(parser)?));
    }

    Ok(ForInit::Sequence(parse_sequence_expr(parser)?))
}

/// SequenceExpression : AssignmentExpression (',' AssignmentExpression)*
///
/// Every item has to be an actual assignment.
pub fn parse_sequence_expr(parser: &mut Parser) -> Result<SequenceExpression, Error> {
    let mut assignments = vec![parse_sequence_item(parser)?];

    while parser.is_at(TokenKind::Comma) {
        parser.eat(TokenKind::Comma)?;
        assignments.push(parse_sequence_item(parser)?);
    }

    Ok(SequenceExpression { assignments })
}

fn parse_sequence_item(parser: &mut Parser) -> Result<AssignmentExpression, Error> {
    let start = parser.get_position();

    match parse_assignment_expr(parser)? {
        Expr::Assignment(assignment) => Ok(assignment),
        other => Err(Error::new(
            ErrorImpl::InvalidForInit {
                found: String::from(other.type_name()),
            },
            start,
        )),
    }
}

/// FunctionDeclaration : 'def' Identifier '(' OptFormalParameterList ')' BlockStatement
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::Def)?;

    let name = parse_identifier(parser)?;

    parser.eat(TokenKind::OpenParen)?;
    let params = if !parser.is_at(TokenKind::CloseParen) {
        parse_formal_params(parser)?
    } else {
        vec![]
    };
    parser.eat(TokenKind::CloseParen)?;

    let body = parse_block_stmt(parser)?;

    Ok(FunctionDeclaration { name, params, body }.into())
}

pub fn parse_formal_params(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut params = vec![parse_identifier(parser)?];

    while parser.is_at(TokenKind::Comma) {
        parser.eat(TokenKind::Comma)?;
        params.push(parse_identifier(parser)?);
    }

    Ok(params)
}

/// ReturnStatement : 'return' OptExpression ';'
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.eat(TokenKind::Return)?;

    let argument = if !parser.is_at(TokenKind::Semicolon) {
        Some(parse_expr(parser)?)
    } else {
        None
    };
    parser.eat(TokenKind::Semicolon)?;

    Ok(ReturnStatement { argument }.into())
}

fn parse_parenthesized_test(parser: &mut Parser) -> Result<Expr, Error> {
    parser.eat(TokenKind::OpenParen)?;
    let test = parse_expr(parser)?;
    parser.eat(TokenKind::CloseParen)?;

    Ok(test)
}
