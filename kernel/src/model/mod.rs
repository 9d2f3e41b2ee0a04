//! Domain model: banks, configurations, operators and puzzle instances.
//!
//! Everything here is plain immutable data. Construction-time validation
//! ([`ModelError`]) is the only fallible step; once built, values are shared
//! read-only by the rest of the workspace.

pub mod configuration;
pub mod operator;
pub mod puzzle;

/// Largest missionary or cannibal total a puzzle may hold.
///
/// Keeps every count the transition function computes far inside `i32`.
pub const MAX_POPULATION: i32 = 1_000_000;

/// Largest boat capacity. A catalog for capacity `k` holds
/// `(k + 1)(k + 2) / 2 - 1` loadings.
pub const MAX_CAPACITY: i32 = 64;

/// Typed failure for building model values from untrusted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A population total was negative.
    NegativePopulation { detail: String },
    /// A population total exceeded [`MAX_POPULATION`].
    PopulationTooLarge { detail: String },
    /// Boat capacity outside `1..=MAX_CAPACITY`.
    InvalidCapacity { capacity: i32 },
    /// Operator moves a negative count, nobody, or more than the boat holds.
    OperatorOutOfRange {
        missionaries: i32,
        cannibals: i32,
        capacity: i32,
    },
    /// The same operator appears twice in a catalog.
    DuplicateOperator { missionaries: i32, cannibals: i32 },
    /// A catalog must contain at least one operator.
    EmptyCatalog,
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativePopulation { detail } => write!(f, "negative population: {detail}"),
            Self::PopulationTooLarge { detail } => {
                write!(f, "population above {MAX_POPULATION}: {detail}")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "boat capacity must be in 1..={MAX_CAPACITY}, got {capacity}")
            }
            Self::OperatorOutOfRange {
                missionaries,
                cannibals,
                capacity,
            } => write!(
                f,
                "operator ({missionaries} M, {cannibals} C) out of range for capacity {capacity}"
            ),
            Self::DuplicateOperator {
                missionaries,
                cannibals,
            } => write!(f, "duplicate operator ({missionaries} M, {cannibals} C)"),
            Self::EmptyCatalog => write!(f, "operator catalog is empty"),
        }
    }
}

impl std::error::Error for ModelError {}
