//! Tests for capturing and restoring execution position

use super::helpers::{dialog, each, if_block, script, trace};
use crate::interpreter::{
    Checkpoint, Instruction, Interpreter, InterpreterError, Stepper, StepperError, StepperState,
    Turn, Val,
};
use maplit::hashmap;

fn branching_script() -> Instruction {
    script(vec![
        dialog("a"),
        if_block(vec![
            vec![dialog("b"), each(vec![dialog("c"), dialog("d")])],
            vec![dialog("e")],
        ]),
        Instruction::Pause,
        dialog("f"),
    ])
}

#[test]
fn test_restored_stepper_continues_identically() {
    let root = branching_script();

    for steps_before_capture in 0..12 {
        let mut original = Stepper::new(&root);
        for _ in 0..steps_before_capture {
            original.next().unwrap();
        }
        let state = original.state();

        // Fresh tree value with identical content
        let copy = branching_script();
        let mut restored = Stepper::with_state(&copy, state.clone()).unwrap();
        assert_eq!(restored.state(), state);

        assert_eq!(trace(&mut restored), trace(&mut original));
    }
}

#[test]
fn test_state_captures_exiting_flag() {
    let root = script(vec![each(vec![dialog("x")]), dialog("y")]);
    let mut stepper = Stepper::new(&root);

    // Start, Enter [0], Enter [0, 0], Exit [0]
    for _ in 0..4 {
        stepper.next().unwrap();
    }
    let state = stepper.state();
    assert_eq!(
        state,
        StepperState {
            done: false,
            path: Some(vec![0]),
            exiting: true,
        }
    );

    // Without the flag the restored stepper would re-enter [0, 0]
    let mut restored = Stepper::with_state(&root, state).unwrap();
    let event = restored.next().unwrap();
    assert_eq!(event.path, Some(vec![1]));
}

#[test]
fn test_state_round_trips_through_json() {
    let root = branching_script();
    let mut stepper = Stepper::new(&root);
    for _ in 0..5 {
        stepper.next().unwrap();
    }

    let json = serde_json::to_string(&stepper.state()).unwrap();
    let state: StepperState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, stepper.state());
}

#[test]
fn test_restore_rejects_foreign_paths() {
    let root = script(vec![dialog("only")]);
    let mut stepper = Stepper::new(&root);

    let result = stepper.restore(StepperState {
        done: false,
        path: Some(vec![3, 1]),
        exiting: false,
    });
    assert!(matches!(result, Err(StepperError::InvalidState { .. })));

    let result = stepper.restore(StepperState {
        done: true,
        path: Some(vec![]),
        exiting: false,
    });
    assert!(matches!(result, Err(StepperError::InvalidState { .. })));

    // Stepper is untouched by a rejected restore
    assert_eq!(stepper.state(), StepperState::default());
}

#[test]
fn test_restore_finished_state() {
    let root = script(vec![dialog("only")]);
    let state = StepperState {
        done: true,
        path: None,
        exiting: true,
    };
    let mut stepper = Stepper::with_state(&root, state).unwrap();

    assert!(stepper.is_done());
    assert!(trace(&mut stepper).is_empty());
}

#[test]
fn test_interpreter_resumes_from_checkpoint() {
    let root = script(vec![
        dialog("Hello"),
        Instruction::Pause,
        dialog("World"),
    ]);
    let mut interpreter = Interpreter::new(&root);
    interpreter.next().unwrap();
    interpreter.scope_mut().set("seen", Val::Bool(true));

    let json = serde_json::to_string(&interpreter.checkpoint()).unwrap();
    drop(interpreter);

    let checkpoint: Checkpoint = serde_json::from_str(&json).unwrap();
    let mut resumed = Interpreter::resume(&root, checkpoint).unwrap();

    match resumed.next().unwrap() {
        Turn::Yielded(scope) => {
            assert_eq!(scope.dialog, "World");
            assert_eq!(
                scope.vars,
                hashmap! { "seen".to_string() => Val::Bool(true) }
            );
        }
        Turn::Done => panic!("expected a turn"),
    }
    assert_eq!(resumed.next().unwrap(), Turn::Done);
}

#[test]
fn test_resume_rejects_checkpoint_for_other_script() {
    let long = script(vec![dialog("a"), dialog("b"), dialog("c")]);
    let short = script(vec![dialog("a")]);

    let mut stepper = Stepper::new(&long);
    for _ in 0..3 {
        stepper.next().unwrap();
    }
    let checkpoint = Checkpoint {
        stepper: stepper.state(),
        ..Checkpoint::default()
    };

    assert!(matches!(
        Interpreter::resume(&short, checkpoint),
        Err(InterpreterError::Stepper(StepperError::InvalidState { .. }))
    ));
}
