//! Instruction effect handlers
//!
//! Each instruction kind that has an effect on the scope gets a handler here.
//! Composite kinds, the pause marker and unknown kinds have none.

use super::errors::EvalError;
use super::expressions::eval_expr;
use super::types::{Expr, Instruction, ScriptScope};

impl Instruction {
    /// Whether applying this instruction can change the scope
    pub fn has_effect(&self) -> bool {
        matches!(
            self,
            Instruction::Dialog { .. } | Instruction::Expression { .. }
        )
    }

    /// Apply this instruction's effect to the scope
    ///
    /// No-op for instructions without an effect.
    pub fn apply(&self, scope: &mut ScriptScope) -> Result<(), EvalError> {
        match self {
            Instruction::Dialog { text } => {
                apply_dialog(scope, text);
                Ok(())
            }
            Instruction::Expression { expr } => apply_expression(scope, expr),
            Instruction::Script { .. }
            | Instruction::Command(_)
            | Instruction::Pause
            | Instruction::Unknown => Ok(()),
        }
    }
}

fn apply_dialog(scope: &mut ScriptScope, text: &str) {
    scope.push_dialog(text);
}

fn apply_expression(scope: &mut ScriptScope, expr: &Expr) -> Result<(), EvalError> {
    // The value itself is discarded; only assignments are observable
    eval_expr(expr, scope)?;
    Ok(())
}
