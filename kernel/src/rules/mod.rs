//! Puzzle rules: the validity predicate and the transition function.
//!
//! Depends on `model`. Both are pure functions of their inputs.

pub mod transition;
pub mod validity;
