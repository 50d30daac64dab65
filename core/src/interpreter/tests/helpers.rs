//! Test helpers for interpreter tests
//!
//! Script fixtures and small node constructors

use crate::interpreter::{Action, Command, Expr, Instruction, Path, Stepper};

/// Parse a JSON script and round-trip it through serialization
///
/// The round-trip makes sure every fixture also exercises the serde layout.
pub fn parse_script(json: &str) -> Instruction {
    let script = Instruction::from_json(json).expect("Parse script failed");
    let json = serde_json::to_string(&script).expect("Script serialization failed");
    serde_json::from_str(&json).expect("Script deserialization failed")
}

pub fn script(instructions: Vec<Instruction>) -> Instruction {
    Instruction::Script { instructions }
}

pub fn dialog(text: &str) -> Instruction {
    Instruction::Dialog {
        text: text.to_string(),
    }
}

pub fn each(block: Vec<Instruction>) -> Instruction {
    Instruction::Command(Command::EachBlock { block })
}

pub fn if_block(links: Vec<Vec<Instruction>>) -> Instruction {
    Instruction::Command(Command::IfBlock {
        chain: links
            .into_iter()
            .map(|block| Instruction::Command(Command::IfChainLink { block }))
            .collect(),
    })
}

pub fn expression(expr: Expr) -> Instruction {
    Instruction::Expression { expr }
}

/// Drain a stepper, returning `(action, path)` for every event up to `End`
pub fn trace(stepper: &mut Stepper<'_>) -> Vec<(Action, Option<Path>)> {
    stepper
        .events()
        .map(|event| event.expect("Step failed"))
        .map(|event| (event.action, event.path))
        .collect()
}
