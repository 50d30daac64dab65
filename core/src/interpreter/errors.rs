//! Error types for the stepper, the expression evaluator and the interpreter

use super::types::Path;
use thiserror::Error;

/// Stepper misuse and corrupted traversal state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepperError {
    /// A step primitive was called before `start()`
    #[error("cannot step further: traversal has not started")]
    NotStarted,

    #[error("traversal has already started")]
    AlreadyStarted,

    /// A restored state does not describe a position in this tree
    #[error("invalid stepper state: {reason}")]
    InvalidState { reason: String },

    /// The stepper derived a path that does not resolve. Never caused by input.
    #[error("path {path:?} does not resolve to an instruction")]
    Unresolvable { path: Path },
}

/// Failure while evaluating an expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("operator '{op}' cannot be applied to {left} and {right}")]
    TypeMismatch {
        op: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,
}

/// Failure of one interpreter call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Stepper(#[from] StepperError),

    #[error("instruction at {path:?} failed: {source}")]
    Eval {
        path: Path,
        #[source]
        source: EvalError,
    },
}
