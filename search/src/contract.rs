//! Search observer contract.
//!
//! Observers receive read-only views of search progress for display and
//! pacing. They cannot reach the frontier, visited set or RNG mutably, so
//! attaching, detaching or swapping observers never changes the search
//! trace.

use crossing_kernel::model::configuration::Configuration;

use crate::frontier::Frontier;
use crate::graph::{CandidateRecordV1, TerminationReasonV1};
use crate::node::SearchNodeV1;

/// One finished expansion.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionView<'a> {
    pub expansion_order: u64,
    /// The node that was popped and expanded.
    pub node: &'a SearchNodeV1,
    /// `(operator, candidate, outcome)` per catalog operator, in order.
    pub candidates: &'a [CandidateRecordV1],
    pub dead_end: bool,
    /// The frontier after every insertion of this expansion.
    pub frontier: &'a Frontier,
}

/// Hooks invoked by the search driver. All methods default to no-ops.
///
/// # Contract
///
/// - `on_iteration_start` runs before each frontier pop, including the pop
///   that finds the goal.
/// - `on_expansion` runs once per expanded (non-goal) node.
/// - `between_iterations` is the pacing point; it runs after each expansion
///   while the search is still running.
/// - `on_termination` runs exactly once, with the goal configuration when
///   one was reached.
pub trait SearchObserverV1 {
    fn on_iteration_start(&mut self, _frontier: &Frontier) {}

    fn on_expansion(&mut self, _view: &ExpansionView<'_>) {}

    fn between_iterations(&mut self) {}

    fn on_termination(&mut self, _reason: &TerminationReasonV1, _goal: Option<&Configuration>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserverV1 for NoopObserver {}

impl<T: SearchObserverV1 + ?Sized> SearchObserverV1 for &mut T {
    fn on_iteration_start(&mut self, frontier: &Frontier) {
        (**self).on_iteration_start(frontier);
    }

    fn on_expansion(&mut self, view: &ExpansionView<'_>) {
        (**self).on_expansion(view);
    }

    fn between_iterations(&mut self) {
        (**self).between_iterations();
    }

    fn on_termination(&mut self, reason: &TerminationReasonV1, goal: Option<&Configuration>) {
        (**self).on_termination(reason, goal);
    }
}
