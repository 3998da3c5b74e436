use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpression, AssignmentOperator, AssignmentTarget, BinaryExpression,
            BinaryOperator, BooleanLiteral, CallExpression, Identifier, LogicalExpression,
            LogicalOperator, MemberExpression, NullLiteral, NumericLiteral, StringLiteral,
            UnaryExpression, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::ExprHandler,
    parser::{unexpected_token, Parser},
};

/// Expression : AssignmentExpression
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_assignment_expr(parser)
}

/// AssignmentExpression
///   : LogicalORExpression
///   | LeftHandSideExpression AssignmentOperator AssignmentExpression
///
/// Right associative through recursion on the right operand. Every nested
/// expression passes through here, so this is where nesting is bounded.
pub fn parse_assignment_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.nested(parse_assignment)
}

fn parse_assignment(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.get_position();
    let left = parse_logical_or_expr(parser)?;

    let Some(kind) = parser
        .lookahead_kind()
        .filter(TokenKind::is_assignment_operator)
    else {
        return Ok(left);
    };

    let left = AssignmentTarget::try_from(left).map_err(|expr| {
        Error::new(
            ErrorImpl::InvalidAssignmentTarget {
                found: String::from(expr.type_name()),
            },
            start,
        )
    })?;

    let token = parser.eat(kind)?;
    let operator =
        AssignmentOperator::from_lexeme(&token.value).ok_or_else(|| unexpected_token(&token, kind))?;

    let right = parse_assignment_expr(parser)?;

    Ok(AssignmentExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }
    .into())
}

pub fn parse_logical_or_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_logical_expr(parser, parse_logical_and_expr, TokenKind::LogicalOr)
}

pub fn parse_logical_and_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_logical_expr(parser, parse_equality_expr, TokenKind::LogicalAnd)
}

/// `==` and `!=`
pub fn parse_equality_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, parse_relational_expr, TokenKind::EqualityOperator)
}

/// `>`, `>=`, `<` and `<=`
pub fn parse_relational_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, parse_additive_expr, TokenKind::RelationalOperator)
}

pub fn parse_additive_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, parse_multiplicative_expr, TokenKind::AdditiveOperator)
}

pub fn parse_multiplicative_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, parse_unary_expr, TokenKind::MultiplicativeOperator)
}

/// Left-folds `operand (operator operand)*` into nested binary expressions.
pub fn parse_binary_expr(
    parser: &mut Parser,
    operand: ExprHandler,
    operator_kind: TokenKind,
) -> Result<Expr, Error> {
    let mut left = operand(parser)?;

    while parser.is_at(operator_kind) {
        let token = parser.eat(operator_kind)?;
        let operator = BinaryOperator::from_lexeme(&token.value)
            .ok_or_else(|| unexpected_token(&token, operator_kind))?;

        let right = operand(parser)?;

        left = BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
        .into();
    }

    Ok(left)
}

/// Same fold as [`parse_binary_expr`], building logical expressions.
pub fn parse_logical_expr(
    parser: &mut Parser,
    operand: ExprHandler,
    operator_kind: TokenKind,
) -> Result<Expr, Error> {
    let mut left = operand(parser)?;

    while parser.is_at(operator_kind) {
        let token = parser.eat(operator_kind)?;
        let operator = LogicalOperator::from_lexeme(&token.value)
            .ok_or_else(|| unexpected_token(&token, operator_kind))?;

        let right = operand(parser)?;

        left = LogicalExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
        .into();
    }

    Ok(left)
}

/// UnaryExpression
///   : LeftHandSideExpression
///   | AdditiveOperator UnaryExpression
///   | LogicalNot UnaryExpression
pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let kind = match parser.lookahead_kind() {
        Some(kind @ (TokenKind::AdditiveOperator | TokenKind::LogicalNot)) => kind,
        _ => return parse_lhs_expr(parser),
    };

    let token = parser.eat(kind)?;
    let operator =
        UnaryOperator::from_lexeme(&token.value).ok_or_else(|| unexpected_token(&token, kind))?;

    let argument = parser.nested(parse_unary_expr)?;

    Ok(UnaryExpression {
        operator,
        argument: Box::new(argument),
    }
    .into())
}

/// LeftHandSideExpression : CallMemberExpression
pub fn parse_lhs_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_call_member_expr(parser)
}

/// CallMemberExpression : MemberExpression | CallExpression
pub fn parse_call_member_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let member = parse_member_expr(parser)?;

    if parser.is_at(TokenKind::OpenParen) {
        return parse_call_expr(parser, member);
    }

    Ok(member)
}

/// Wraps `callee` in calls for as long as argument lists follow: `f()()`.
pub fn parse_call_expr(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    let mut callee = callee;

    while parser.is_at(TokenKind::OpenParen) {
        let arguments = parse_arguments(parser)?;

        callee = CallExpression {
            callee: Box::new(callee),
            arguments,
        }
        .into();
    }

    Ok(callee)
}

/// Arguments : '(' OptArgumentList ')'
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    parser.eat(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    if !parser.is_at(TokenKind::CloseParen) {
        arguments.push(parse_assignment_expr(parser)?);

        while parser.is_at(TokenKind::Comma) {
            parser.eat(TokenKind::Comma)?;
            arguments.push(parse_assignment_expr(parser)?);
        }
    }

    parser.eat(TokenKind::CloseParen)?;

    Ok(arguments)
}

/// MemberExpression
///   : PrimaryExpression
///   | MemberExpression '.' Identifier
///   | MemberExpression '[' Expression ']'
pub fn parse_member_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut object = parse_primary_expr(parser)?;

    loop {
        let (computed, property) = match parser.lookahead_kind() {
            Some(TokenKind::Dot) => {
                parser.eat(TokenKind::Dot)?;
                (false, Expr::from(parse_identifier(parser)?))
            }
            Some(TokenKind::OpenBracket) => {
                parser.eat(TokenKind::OpenBracket)?;
                let property = parse_expr(parser)?;
                parser.eat(TokenKind::CloseBracket)?;
                (true, property)
            }
            _ => break,
        };

        object = MemberExpression {
            computed,
            object: Box::new(object),
            property: Box::new(property),
        }
        .into();
    }

    Ok(object)
}

/// PrimaryExpression : Literal | ParenthesizedExpression | Identifier
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.lookahead_kind() {
        Some(kind) if kind.is_literal() => parse_literal(parser),
        Some(TokenKind::OpenParen) => parse_grouping_expr(parser),
        _ => Ok(parse_identifier(parser)?.into()),
    }
}

/// Parentheses only steer parsing; the inner expression is returned as is.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.eat(TokenKind::OpenParen)?;
    let expr = parse_expr(parser)?;
    parser.eat(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Identifier, Error> {
    let name = parser.eat(TokenKind::Identifier)?.value;

    Ok(Identifier { name })
}

/// Literal : NumericLiteral | StringLiteral | BooleanLiteral | NullLiteral
pub fn parse_literal(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.lookahead_kind() {
        Some(TokenKind::Number) => Ok(parse_numeric_literal(parser)?.into()),
        Some(TokenKind::String) => Ok(parse_string_literal(parser)?.into()),
        Some(TokenKind::True) => {
            parser.eat(TokenKind::True)?;
            Ok(BooleanLiteral { value: true }.into())
        }
        Some(TokenKind::False) => {
            parser.eat(TokenKind::False)?;
            Ok(BooleanLiteral { value: false }.into())
        }
        Some(TokenKind::Null) => {
            parser.eat(TokenKind::Null)?;
            Ok(NullLiteral { value: () }.into())
        }
        _ => Err(unexpected_literal(parser)),
    }
}

pub fn parse_numeric_literal(parser: &mut Parser) -> Result<NumericLiteral, Error> {
    let token = parser.eat(TokenKind::Number)?;

    match token.value.parse::<f64>() {
        Ok(value) => Ok(NumericLiteral { value }),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        )),
    }
}

/// Strips the delimiting quotes. Escape sequences are not interpreted.
pub fn parse_string_literal(parser: &mut Parser) -> Result<StringLiteral, Error> {
    let token = parser.eat(TokenKind::String)?;
    let value = strip_quotes(&token.value);

    Ok(StringLiteral { value })
}

fn strip_quotes(lexeme: &str) -> String {
    let inner = lexeme
        .strip_prefix(['"', '\''])
        .and_then(|rest| rest.strip_suffix(['"', '\'']))
        .unwrap_or(lexeme);

    String::from(inner)
}

/// Error for a lookahead that starts no literal production.
pub(crate) fn unexpected_literal(parser: &Parser) -> Error {
    match parser.lookahead() {
        Some(token) => Error::new(
            ErrorImpl::UnexpectedLiteral {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        ),
        None => Error::new(
            ErrorImpl::UnexpectedEndOfInput {
                expected: String::from("Literal"),
            },
            parser.get_position(),
        ),
    }
}
