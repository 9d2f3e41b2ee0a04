//! Transition function: apply an operator to a configuration.
//!
//! The boat always departs from the bank it is on. The departing bank loses
//! the operator's passengers, the opposite bank gains them, and the boat
//! flips. The input is never mutated.

use crate::model::configuration::{Bank, Configuration, Side};
use crate::model::operator::Operator;
use crate::rules::validity::{self, Violation};

/// Compute the successor of `config` under `op` without judging it.
///
/// The result may hold negative counts or outnumbered missionaries.
/// Counts within [`MAX_POPULATION`](crate::model::MAX_POPULATION) and
/// loadings within [`MAX_CAPACITY`](crate::model::MAX_CAPACITY) cannot
/// overflow.
#[must_use]
pub fn successor(config: &Configuration, op: &Operator) -> Configuration {
    let from = config.side(config.boat);
    let to = config.side(config.boat.opposite());

    let from_after = Side::new(
        from.missionaries - op.missionaries(),
        from.cannibals - op.cannibals(),
    );
    let to_after = Side::new(
        to.missionaries + op.missionaries(),
        to.cannibals + op.cannibals(),
    );

    match config.boat {
        Bank::Left => Configuration::new(from_after, to_after, Bank::Right),
        Bank::Right => Configuration::new(to_after, from_after, Bank::Left),
    }
}

/// Apply `op` and report the validity checker's verdict.
///
/// When `ok` is `false` the returned configuration carries no meaning and
/// must be discarded by the caller.
#[must_use]
pub fn transition(config: &Configuration, op: &Operator) -> (Configuration, bool) {
    let next = successor(config, op);
    let ok = validity::valid(&next);
    (next, ok)
}

/// [`transition`] in `Result` form, carrying the rule that rejected the move.
///
/// # Errors
///
/// Returns the [`Violation`] if the successor is not a legal configuration.
pub fn apply(config: &Configuration, op: &Operator) -> Result<Configuration, Violation> {
    let next = successor(config, op);
    validity::check(&next).map(|()| next)
}
