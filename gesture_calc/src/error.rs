//! Calculator error types.

use thiserror::Error;

/// Errors produced while evaluating `operand1 operator operand2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum EvalError {
    /// `/` with a zero right-hand operand.
    #[error("division by zero")]
    DivisionByZero,

    /// The exact result does not fit the numeric representation.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Errors from parsing gesture vocabulary text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    /// Anything other than `+`, `-`, `*` or `/`.
    #[error("unknown operator {0:?}")]
    UnknownOperator(String),
}
