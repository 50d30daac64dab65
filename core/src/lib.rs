pub mod cli;
pub mod config;
pub mod interpreter;

// Re-export main types
pub use interpreter::{
    Checkpoint, Instruction, Interpreter, InterpreterError, ScriptScope, StepEvent, Stepper,
    StepperError, StepperState, Turn, Val,
};
