//! Independent breadth-first reference solver.
//!
//! Shares only the kernel rules with the search crate, so its answers can
//! be used to check the search's results.

use std::collections::{BTreeSet, VecDeque};

use crossing_kernel::model::configuration::Configuration;
use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_kernel::rules::transition::apply;

/// Minimum number of crossings from initial to goal, if reachable.
#[must_use]
pub fn min_moves(puzzle: &PuzzleV1) -> Option<usize> {
    let mut seen = BTreeSet::from([puzzle.initial()]);
    let mut queue = VecDeque::from([(puzzle.initial(), 0usize)]);
    while let Some((config, depth)) = queue.pop_front() {
        if config == puzzle.goal() {
            return Some(depth);
        }
        for op in puzzle.catalog() {
            if let Ok(next) = apply(&config, op) {
                if seen.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
    }
    None
}

/// Every valid configuration reachable from the initial one.
#[must_use]
pub fn reachable(puzzle: &PuzzleV1) -> BTreeSet<Configuration> {
    let mut seen = BTreeSet::from([puzzle.initial()]);
    let mut stack = vec![puzzle.initial()];
    while let Some(config) = stack.pop() {
        for op in puzzle.catalog() {
            if let Ok(next) = apply(&config, op) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
    }
    seen
}
