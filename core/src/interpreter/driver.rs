//! Execution driver
//!
//! The [`Interpreter`] rides a [`Stepper`] over a script, applies each visited
//! instruction's effect to the scope and stops at `Pause` instructions. Each call
//! to [`Interpreter::next`] runs one "turn": from wherever the previous call
//! stopped up to the next pause or the end of the tree.
//!
//! ## Terminal signal
//! The call that runs the last instructions still returns [`Turn::Yielded`].
//! Only the following call, which does no work, returns [`Turn::Done`].
//! [`Interpreter::is_done`] reports exhaustion without that extra call.

use super::errors::InterpreterError;
use super::stepper::{Action, Stepper, StepperState};
use super::types::{Instruction, ScriptScope};
use serde::{Deserialize, Serialize};
use tracing::debug;

/* ===================== Turn ===================== */

/// Result of one interpreter call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Turn<'s> {
    /// Execution ran up to a pause or to the end of the tree
    Yielded(&'s ScriptScope),
    /// The script was already exhausted, nothing ran
    Done,
}

/* ===================== Checkpoint ===================== */

/// Everything needed to continue a script run later
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub stepper: StepperState,
    pub scope: ScriptScope,
}

/* ===================== Interpreter ===================== */

#[derive(Debug, Clone)]
pub struct Interpreter<'a> {
    stepper: Stepper<'a>,
    scope: ScriptScope,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with a fresh scope
    pub fn new(script: &'a Instruction) -> Self {
        Self::with_scope(script, ScriptScope::new())
    }

    /// Create an interpreter over an existing scope (e.g. with preset variables)
    pub fn with_scope(script: &'a Instruction, scope: ScriptScope) -> Self {
        Self {
            stepper: Stepper::new(script),
            scope,
        }
    }

    /// Rebuild an interpreter from a checkpoint taken over the same script
    pub fn resume(script: &'a Instruction, checkpoint: Checkpoint) -> Result<Self, InterpreterError> {
        Ok(Self {
            stepper: Stepper::with_state(script, checkpoint.stepper)?,
            scope: checkpoint.scope,
        })
    }

    pub fn scope(&self) -> &ScriptScope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut ScriptScope {
        &mut self.scope
    }

    /// Whether the script has been fully executed
    pub fn is_done(&self) -> bool {
        self.stepper.is_done()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            stepper: self.stepper.state(),
            scope: self.scope.clone(),
        }
    }

    /// Run one turn
    ///
    /// Clears the dialog buffer, then applies instructions in pre-order until a
    /// `Pause` is reached (not applied) or the traversal ends. If an instruction
    /// fails the error is returned and the run continues after it on the next
    /// call.
    pub fn next(&mut self) -> Result<Turn<'_>, InterpreterError> {
        if self.stepper.is_done() {
            return Ok(Turn::Done);
        }

        self.scope.clear_dialog();

        loop {
            let event = self.stepper.next()?;
            if self.stepper.is_done() {
                debug!("script finished");
                break;
            }

            if matches!(event.action, Action::Start | Action::Exit) {
                continue;
            }

            let Some(node) = event.node else {
                continue;
            };

            if node.is_pause() {
                debug!(path = ?event.path, "paused");
                break;
            }

            if node.has_effect() {
                node.apply(&mut self.scope)
                    .map_err(|source| InterpreterError::Eval {
                        path: event.path.unwrap_or_default(),
                        source,
                    })?;
            }
        }

        Ok(Turn::Yielded(&self.scope))
    }

    /// Run every remaining turn, collecting the dialog of each
    pub fn run_to_end(&mut self) -> Result<Vec<String>, InterpreterError> {
        let mut turns = Vec::new();
        while let Turn::Yielded(scope) = self.next()? {
            turns.push(scope.dialog.clone());
        }
        Ok(turns)
    }
}
