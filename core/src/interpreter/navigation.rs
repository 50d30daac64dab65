//! Children navigation policy
//!
//! Which field of a node holds its children depends on the node kind (and for
//! commands, on `cmdType`). Everything else is a leaf, including kinds that are
//! not known to this crate.

use super::types::{Command, Instruction};

/// Children of a node, or `None` for leaves and empty composites
///
/// An empty child list is reported as `None` so callers only ever see
/// something they can descend into.
pub fn children(node: &Instruction) -> Option<&[Instruction]> {
    let children: &[Instruction] = match node {
        Instruction::Script { instructions } => instructions,

        Instruction::Command(command) => match command {
            Command::IfBlock { chain } => chain,
            Command::IfChainLink { block } | Command::EachBlock { block } => block,
            Command::Unknown => return None,
        },

        Instruction::Dialog { .. }
        | Instruction::Expression { .. }
        | Instruction::Pause
        | Instruction::Unknown => return None,
    };

    if children.is_empty() {
        None
    } else {
        Some(children)
    }
}

/// Resolve a path from `root`, one child index per level
///
/// Returns `None` if any index is out of range.
pub fn resolve<'a>(root: &'a Instruction, path: &[usize]) -> Option<&'a Instruction> {
    path.iter()
        .try_fold(root, |node, &index| children(node)?.get(index))
}
