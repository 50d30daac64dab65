//! Type definitions for the interpreter
//!
//! - Instruction tree nodes and expressions (ast)
//! - Runtime values (values)
//! - The shared script scope (scope)

pub mod ast;
pub mod scope;
pub mod values;

pub use ast::{BinaryOp, Command, Expr, Instruction, UnaryOp};
pub use scope::ScriptScope;
pub use values::Val;

/// Sequence of child indices from the root; empty is the root itself
pub type Path = Vec<usize>;
