//! Tests for the interpreter
//!
//! Organized by component

mod checkpoint_tests;
mod helpers;
