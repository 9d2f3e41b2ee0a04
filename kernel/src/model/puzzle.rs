//! `PuzzleV1`: one puzzle instance (population, boat, endpoints, catalog).

use super::configuration::Configuration;
use super::operator::OperatorCatalog;
use super::{ModelError, MAX_POPULATION};

/// A validated puzzle instance.
///
/// The initial configuration has everyone and the boat on the left bank;
/// the goal has everyone and the boat on the right bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleV1 {
    missionaries: i32,
    cannibals: i32,
    initial: Configuration,
    goal: Configuration,
    catalog: OperatorCatalog,
}

impl PuzzleV1 {
    /// Three missionaries, three cannibals, a two-seat boat.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
            initial: Configuration::CLASSIC_INITIAL,
            goal: Configuration::CLASSIC_GOAL,
            catalog: OperatorCatalog::classic(),
        }
    }

    /// Build an instance with the generated catalog for `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NegativePopulation`] or
    /// [`ModelError::PopulationTooLarge`] for totals outside
    /// `0..=MAX_POPULATION`, and [`ModelError::InvalidCapacity`] for a
    /// capacity outside `1..=MAX_CAPACITY`.
    pub fn new(missionaries: i32, cannibals: i32, capacity: i32) -> Result<Self, ModelError> {
        let catalog = OperatorCatalog::for_capacity(capacity)?;
        Self::with_catalog(missionaries, cannibals, catalog)
    }

    /// Build an instance with an explicit catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NegativePopulation`] for negative totals and
    /// [`ModelError::PopulationTooLarge`] for totals above [`MAX_POPULATION`].
    pub fn with_catalog(
        missionaries: i32,
        cannibals: i32,
        catalog: OperatorCatalog,
    ) -> Result<Self, ModelError> {
        if missionaries < 0 || cannibals < 0 {
            return Err(ModelError::NegativePopulation {
                detail: format!("missionaries={missionaries}, cannibals={cannibals}"),
            });
        }
        if missionaries > MAX_POPULATION || cannibals > MAX_POPULATION {
            return Err(ModelError::PopulationTooLarge {
                detail: format!("missionaries={missionaries}, cannibals={cannibals}"),
            });
        }
        Ok(Self {
            missionaries,
            cannibals,
            initial: Configuration::all_left(missionaries, cannibals),
            goal: Configuration::all_right(missionaries, cannibals),
            catalog,
        })
    }

    #[must_use]
    pub fn missionaries(&self) -> i32 {
        self.missionaries
    }

    #[must_use]
    pub fn cannibals(&self) -> i32 {
        self.cannibals
    }

    #[must_use]
    pub fn capacity(&self) -> i32 {
        self.catalog.capacity()
    }

    #[must_use]
    pub fn initial(&self) -> Configuration {
        self.initial
    }

    #[must_use]
    pub fn goal(&self) -> Configuration {
        self.goal
    }

    #[must_use]
    pub fn catalog(&self) -> &OperatorCatalog {
        &self.catalog
    }

    /// True if `config` holds exactly this instance's population.
    #[must_use]
    pub fn conserves(&self, config: &Configuration) -> bool {
        config.total_missionaries() == self.missionaries
            && config.total_cannibals() == self.cannibals
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cannibals": self.cannibals,
            "catalog": self.catalog.to_json(),
            "goal": self.goal.to_json(),
            "initial": self.initial.to_json(),
            "missionaries": self.missionaries,
        })
    }
}
