use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedLiteral { .. } => "UnexpectedLiteral",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::InvalidForInit { .. } => "InvalidForInit",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedEndOfInput { expected } => ErrorTip::Suggestion(format!(
                "Unexpected end of input, expected `{}`",
                expected
            )),
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected `{}`",
                token, expected
            )),
            ErrorImpl::UnexpectedLiteral { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected a number, string, boolean or null",
                token
            )),
            ErrorImpl::InvalidAssignmentTarget { found } => ErrorTip::Suggestion(format!(
                "Cannot assign to {}, only identifiers and member expressions can be assigned",
                found
            )),
            ErrorImpl::InvalidForInit { found } => ErrorTip::Suggestion(format!(
                "Found {} in a for-loop initializer, only assignments may be listed",
                found
            )),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the nested expression or block into smaller pieces",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected end of input, expected: {expected:?}")]
    UnexpectedEndOfInput { expected: String },
    #[error("unexpected token: {token:?}, expected: {expected:?}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected literal production: {token:?}")]
    UnexpectedLiteral { token: String },
    #[error("invalid left-hand side in assignment expression: {found}")]
    InvalidAssignmentTarget { found: String },
    #[error("unexpected expression: {found}, expected AssignmentExpression")]
    InvalidForInit { found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep { limit: usize },
}
