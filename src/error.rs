use std::collections::TryReserveError;
use thiserror::Error;

/// Everything that can go wrong between raw text and a numeric result.
///
/// Each pipeline stage returns the first error it meets; nothing is retried and
/// no partial value is ever handed back alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Input is empty")]
    NullOrEmptyInput,

    #[error("Input is {len} characters long, the limit is {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("Invalid character or format: '{0}'")]
    InvalidCharacterOrFormat(String),

    #[error("Mismatched parenthesis")]
    MismatchedParenthesis,

    #[error("Syntax error: {0}")]
    SyntaxError(String),

    #[error("Unknown operator: '{0}'")]
    UnknownOperator(char),

    #[error("Function '{0}' is not defined")]
    UndefinedFunction(String),

    #[error("Function '{name}' cannot take {arity} argument(s)")]
    WrongArity { name: String, arity: usize },

    #[error("Invalid assignment target: {0}")]
    InvalidAssignmentTarget(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Memory allocation failed")]
    MemoryAllocationFailure,
}

/// Fieldless discriminant of [`CalcError`], handed to callers that only need
/// to branch on the failure class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullOrEmptyInput,
    InputTooLong,
    InvalidCharacterOrFormat,
    MismatchedParenthesis,
    SyntaxError,
    UnknownOperator,
    UndefinedFunction,
    WrongArity,
    InvalidAssignmentTarget,
    DivisionByZero,
    InvalidOperation,
    MemoryAllocationFailure,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::NullOrEmptyInput => ErrorKind::NullOrEmptyInput,
            CalcError::InputTooLong { .. } => ErrorKind::InputTooLong,
            CalcError::InvalidCharacterOrFormat(_) => ErrorKind::InvalidCharacterOrFormat,
            CalcError::MismatchedParenthesis => ErrorKind::MismatchedParenthesis,
            CalcError::SyntaxError(_) => ErrorKind::SyntaxError,
            CalcError::UnknownOperator(_) => ErrorKind::UnknownOperator,
            CalcError::UndefinedFunction(_) => ErrorKind::UndefinedFunction,
            CalcError::WrongArity { .. } => ErrorKind::WrongArity,
            CalcError::InvalidAssignmentTarget(_) => ErrorKind::InvalidAssignmentTarget,
            CalcError::DivisionByZero => ErrorKind::DivisionByZero,
            CalcError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            CalcError::MemoryAllocationFailure => ErrorKind::MemoryAllocationFailure,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        CalcError::SyntaxError(message.into())
    }
}

impl From<TryReserveError> for CalcError {
    fn from(_: TryReserveError) -> Self {
        CalcError::MemoryAllocationFailure
    }
}

pub type Result<T, E = CalcError> = std::result::Result<T, E>;

/// Pushes onto a stack or queue, reporting allocation failure instead of
/// aborting. Growth stays amortized O(1) since `try_reserve` doubles like `push`.
pub(crate) fn push_checked<T>(buffer: &mut Vec<T>, item: T) -> Result<()> {
    buffer.try_reserve(1)?;
    buffer.push(item);
    Ok(())
}

/// Allocates an empty buffer able to hold `capacity` items without growing.
pub(crate) fn buffer_with_capacity<T>(capacity: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer.try_reserve(capacity)?;
    Ok(buffer)
}
