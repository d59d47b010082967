//! Errors surfaced to whoever invokes a function.

use thiserror::Error;

use crate::cal;


/// Everything that can go wrong while decoding, computing, or encoding.
///
/// An *absent* input is never an error: functions return `Ok(None)` for
/// that case instead.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum Error {

    /// A record field, or an explicit component argument, is missing,
    /// of the wrong type, or outside its valid range.
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Text didn’t match the canonical form or the supplied pattern.
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// A pattern string is malformed, or asks for a field the value
    /// doesn’t have.
    #[error("invalid pattern {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A scalar divisor of zero, or a zero-length divisor duration.
    #[error("division by zero")]
    DivisionByZero,

    /// A chronology mode selector that isn’t one of the known modes.
    #[error("chronology mode '{0}' is invalid - must be one of: 'IS_BEFORE','IS_AFTER','IS_EQUAL'")]
    InvalidMode(String),

    /// The result of a computation fell outside the supported range.
    #[error("arithmetic failed: {0}")]
    Arithmetic(cal::Error),

    /// No function is registered under this name.
    #[error("unknown function {0}")]
    UnknownFunction(String),

    /// A function exists, but none of its overloads accepts the arguments.
    #[error("no overload of {name} accepts {arity} argument(s) of the given types")]
    NoMatchingOverload { name: String, arity: usize },
}

impl Error {
    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidField { field, reason: reason.into() }
    }

    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Error::Parse { input: input.to_owned(), reason: reason.into() }
    }

    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Error::Pattern { pattern: pattern.to_owned(), reason: reason.into() }
    }
}

impl From<cal::Error> for Error {
    fn from(error: cal::Error) -> Self {
        match error {
            cal::Error::DivisionByZero => Error::DivisionByZero,
            other                      => Error::Arithmetic(other),
        }
    }
}

/// Shorthand used across the function modules.
pub type Result<T, E = Error> = std::result::Result<T, E>;
