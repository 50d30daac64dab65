//! Script scope shared by every instruction of one script run

use super::values::Val;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mutable record threaded through instruction effects
///
/// `dialog` only holds what was produced during the current interpreter call;
/// `vars` persist for the whole run. `Default` gives a fresh scope, so no two
/// interpreters ever share one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptScope {
    /// Dialog produced since the last pause
    pub dialog: String,

    /// Script variables
    #[serde(default)]
    pub vars: HashMap<String, Val>,
}

impl ScriptScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope pre-populated with variables
    pub fn with_vars(vars: HashMap<String, Val>) -> Self {
        Self {
            dialog: String::new(),
            vars,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Val> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Val) {
        self.vars.insert(name.into(), value);
    }

    pub fn push_dialog(&mut self, text: &str) {
        self.dialog.push_str(text);
    }

    pub fn clear_dialog(&mut self) {
        self.dialog.clear();
    }
}
