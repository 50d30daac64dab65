//! Tree Stepper - resumable depth-first traversal
//!
//! Walks an instruction tree in pre-order without recursion. The position is a
//! path of child indices plus two flags, so it can be captured with
//! [`Stepper::state`] and restored with [`Stepper::restore`] at any point.
//!
//! ## Transitions
//! - `start`: position at the root
//! - `enter`: descend into the first child
//! - `skip`: move to the next sibling
//! - `exit`: ascend to the parent without moving sideways
//! - `end`: traversal finished
//!
//! [`Stepper::next`] combines them: enter if possible, otherwise skip, otherwise
//! exit. After an exit it does not try to enter again (that would revisit the
//! subtree it just left), it keeps trying skip then exit until a sibling is
//! found or the root is exited.

use super::errors::StepperError;
use super::navigation::{children, resolve};
use super::types::{Instruction, Path};
use serde::{Deserialize, Serialize};
use tracing::trace;

/* ===================== State ===================== */

/// Captured traversal position
///
/// `done == true` implies `path == None`. `exiting` is ignored once done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepperState {
    pub done: bool,
    pub path: Option<Path>,
    pub exiting: bool,
}

/* ===================== Events ===================== */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Start,
    Enter,
    Skip,
    Exit,
    End,
    /// Refetch of the terminal result after the traversal ended
    None,
}

/// One traversal transition and where it landed
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent<'a> {
    pub action: Action,
    pub node: Option<&'a Instruction>,
    pub path: Option<Path>,
}

/* ===================== Stepper ===================== */

#[derive(Debug, Clone)]
pub struct Stepper<'a> {
    root: &'a Instruction,
    done: bool,
    path: Option<Path>,
    exiting: bool,
    /// Node at `path`, cached
    node: Option<&'a Instruction>,
}

impl<'a> Stepper<'a> {
    /// Create a stepper positioned before the root
    pub fn new(root: &'a Instruction) -> Self {
        Self {
            root,
            done: false,
            path: None,
            exiting: false,
            node: None,
        }
    }

    /// Create a stepper positioned at a previously captured state
    pub fn with_state(root: &'a Instruction, state: StepperState) -> Result<Self, StepperError> {
        let mut stepper = Self::new(root);
        stepper.restore(state)?;
        Ok(stepper)
    }

    pub fn root(&self) -> &'a Instruction {
        self.root
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn path(&self) -> Option<&[usize]> {
        self.path.as_deref()
    }

    /// Node at the current position
    pub fn node(&self) -> Option<&'a Instruction> {
        self.node
    }

    /// Capture the current position
    pub fn state(&self) -> StepperState {
        StepperState {
            done: self.done,
            path: self.path.clone(),
            exiting: self.exiting,
        }
    }

    /// Replace the current position with a captured one
    ///
    /// The state is checked against this stepper's tree; on error the stepper
    /// is left unchanged.
    pub fn restore(&mut self, state: StepperState) -> Result<(), StepperError> {
        let node = match (&state.path, state.done) {
            (Some(_), true) => {
                return Err(StepperError::InvalidState {
                    reason: "a finished traversal cannot have a path".to_string(),
                })
            }
            (Some(path), false) => {
                Some(
                    resolve(self.root, path).ok_or_else(|| StepperError::InvalidState {
                        reason: format!("path {:?} does not resolve in this tree", path),
                    })?,
                )
            }
            (None, _) => None,
        };

        self.done = state.done;
        self.path = state.path;
        self.exiting = state.exiting;
        self.node = node;

        Ok(())
    }

    /* ===================== Primitives ===================== */

    /// Position at the root
    pub fn start(&mut self) -> Result<StepEvent<'a>, StepperError> {
        if self.done || self.path.is_some() {
            return Err(StepperError::AlreadyStarted);
        }

        self.move_to(Action::Start, Vec::new())
    }

    /// Descend into the first child
    ///
    /// `Ok(None)` if the current node has no children.
    pub fn enter(&mut self) -> Result<Option<StepEvent<'a>>, StepperError> {
        if self.done {
            return Ok(Some(self.terminal()));
        }
        let path = self.current_path()?;

        let node = self.current_node(path)?;
        if children(node).is_none() {
            return Ok(None);
        }

        let mut child_path = path.to_vec();
        child_path.push(0);

        self.move_to(Action::Enter, child_path).map(Some)
    }

    /// Move to the next sibling
    ///
    /// At the root this ends the traversal. `Ok(None)` if the current node is
    /// the last child of its parent.
    pub fn skip(&mut self) -> Result<Option<StepEvent<'a>>, StepperError> {
        if self.done {
            return Ok(Some(self.terminal()));
        }
        let path = self.current_path()?;

        let Some((&index, parent_path)) = path.split_last() else {
            return Ok(Some(self.end()));
        };

        let sibling_count = resolve(self.root, parent_path)
            .and_then(children)
            .map(<[Instruction]>::len)
            .ok_or_else(|| StepperError::Unresolvable {
                path: parent_path.to_vec(),
            })?;

        if index + 1 >= sibling_count {
            return Ok(None);
        }

        let mut sibling_path = parent_path.to_vec();
        sibling_path.push(index + 1);

        self.move_to(Action::Skip, sibling_path).map(Some)
    }

    /// Ascend to the parent
    ///
    /// At the root this ends the traversal.
    pub fn exit(&mut self) -> Result<StepEvent<'a>, StepperError> {
        if self.done {
            return Ok(self.terminal());
        }
        let path = self.current_path()?;

        let Some((_, parent_path)) = path.split_last() else {
            return Ok(self.end());
        };
        let parent_path = parent_path.to_vec();

        self.move_to(Action::Exit, parent_path)
    }

    /// Finish the traversal
    pub fn end(&mut self) -> StepEvent<'a> {
        trace!("traversal ended");

        self.done = true;
        self.path = None;
        self.node = None;

        StepEvent {
            action: Action::End,
            node: None,
            path: None,
        }
    }

    /* ===================== Driver ===================== */

    /// Advance one pre-order transition
    ///
    /// Once the traversal has ended this keeps returning the same terminal
    /// event (action `None`); `End` is emitted exactly once.
    pub fn next(&mut self) -> Result<StepEvent<'a>, StepperError> {
        if self.done {
            return Ok(self.terminal());
        }

        if self.path.is_none() {
            return self.start();
        }

        if !self.exiting {
            if let Some(event) = self.enter()? {
                self.exiting = false;
                return Ok(event);
            }
        }

        if let Some(event) = self.skip()? {
            self.exiting = false;
            return Ok(event);
        }

        self.exiting = true;
        self.exit()
    }

    /// Iterate over the remaining events, stopping after `End`
    pub fn events(&mut self) -> Events<'_, 'a> {
        Events { stepper: self }
    }

    /* ===================== Helpers ===================== */

    fn current_path(&self) -> Result<&[usize], StepperError> {
        self.path.as_deref().ok_or(StepperError::NotStarted)
    }

    fn current_node(&self, path: &[usize]) -> Result<&'a Instruction, StepperError> {
        self.node.ok_or_else(|| StepperError::Unresolvable {
            path: path.to_vec(),
        })
    }

    fn move_to(&mut self, action: Action, path: Path) -> Result<StepEvent<'a>, StepperError> {
        let node = resolve(self.root, &path)
            .ok_or_else(|| StepperError::Unresolvable { path: path.clone() })?;

        trace!(?action, ?path, kind = node.kind(), "step");

        self.node = Some(node);
        self.path = Some(path);

        Ok(StepEvent {
            action,
            node: Some(node),
            path: self.path.clone(),
        })
    }

    fn terminal(&self) -> StepEvent<'a> {
        StepEvent {
            action: Action::None,
            node: None,
            path: None,
        }
    }
}

/* ===================== Iterator ===================== */

/// Iterator over a stepper's events, see [`Stepper::events`]
///
/// Yields every transition up to and including `End`, then stops.
pub struct Events<'s, 'a> {
    stepper: &'s mut Stepper<'a>,
}

impl<'s, 'a> Iterator for Events<'s, 'a> {
    type Item = Result<StepEvent<'a>, StepperError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stepper.is_done() {
            return None;
        }
        Some(self.stepper.next())
    }
}
