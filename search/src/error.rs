//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, frontier exhausted, expansion budget hit) are expressed
//! via [`crate::graph::TerminationReasonV1`] and always produce a
//! `SearchGraphV1` audit trail.

use crossing_kernel::rules::validity::Violation;

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No
/// `SearchGraphV1` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy has an unusable setting.
    InvalidPolicy { detail: String },
    /// The initial or goal configuration breaks the validity rules.
    InvalidEndpoint {
        role: &'static str,
        violation: Violation,
    },
    /// The initial or goal configuration holds more than
    /// [`MAX_POPULATION`](crossing_kernel::model::MAX_POPULATION) of a kind.
    PopulationTooLarge { role: &'static str, detail: String },
    /// Initial and goal configurations hold different populations.
    PopulationMismatch { detail: String },
    /// Building a run binding (catalog or policy digest) failed.
    Serialization { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::InvalidEndpoint { role, violation } => {
                write!(f, "{role} configuration is invalid: {violation}")
            }
            Self::PopulationTooLarge { role, detail } => {
                write!(f, "{role} configuration exceeds the population bound: {detail}")
            }
            Self::PopulationMismatch { detail } => {
                write!(f, "initial and goal populations differ: {detail}")
            }
            Self::Serialization { detail } => write!(f, "serialization error: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
