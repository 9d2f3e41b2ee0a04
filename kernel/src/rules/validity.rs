//! Validity checker: the safety predicate over a configuration.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. Any negative count on either bank.
//! 2. Left bank: missionaries present and outnumbered by cannibals.
//! 3. Right bank: same rule.
//!
//! A bank with zero missionaries is always safe, whatever its cannibal count.

use std::fmt;

use crate::model::configuration::{Bank, Configuration};

/// Which rule rejected a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// More people left a bank than were on it.
    NegativePopulation,
    /// Missionaries on `bank` are outnumbered.
    Outnumbered { bank: Bank },
}

impl Violation {
    /// Stable identifier used in audit artifacts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NegativePopulation => "negative_population",
            Self::Outnumbered { bank: Bank::Left } => "outnumbered_left",
            Self::Outnumbered { bank: Bank::Right } => "outnumbered_right",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativePopulation => write!(f, "negative population"),
            Self::Outnumbered { bank } => write!(f, "missionaries outnumbered on {bank} bank"),
        }
    }
}

/// Check a configuration, reporting the first rule it breaks.
///
/// # Errors
///
/// Returns the [`Violation`] of the first failing rule.
pub fn check(config: &Configuration) -> Result<(), Violation> {
    if config.left.has_negative() || config.right.has_negative() {
        return Err(Violation::NegativePopulation);
    }
    if config.left.is_outnumbered() {
        return Err(Violation::Outnumbered { bank: Bank::Left });
    }
    if config.right.is_outnumbered() {
        return Err(Violation::Outnumbered { bank: Bank::Right });
    }
    Ok(())
}

/// `true` iff [`check`] passes.
#[must_use]
pub fn valid(config: &Configuration) -> bool {
    check(config).is_ok()
}
