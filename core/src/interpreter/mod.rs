//! # GDS Interpreter - Resumable Tree-Walking Execution
//!
//! ## Core Principles
//!
//! 1. **Path-driven traversal**: position is a path of child indices, no recursion
//! 2. **Explicit state**: the stepper's `{done, path, exiting}` triple can be
//!    captured and restored at any point
//! 3. **Turn-based execution**: the interpreter runs until a `Pause` instruction
//!    or the end of the script, then hands the scope back to the caller
//! 4. **Pure executor**: no I/O, no async - rendering the scope is the caller's job

pub mod driver;
pub mod effects;
pub mod errors;
pub mod expressions;
pub mod navigation;
pub mod stepper;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use driver::{Checkpoint, Interpreter, Turn};
pub use errors::{EvalError, InterpreterError, StepperError};
pub use expressions::eval_expr;
pub use navigation::{children, resolve};
pub use stepper::{Action, StepEvent, Stepper, StepperState};
pub use types::{Command, Expr, Instruction, Path, ScriptScope, Val};
