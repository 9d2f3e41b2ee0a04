//! `Configuration`: one complete snapshot of both banks plus the boat.
//!
//! Equality, hashing and ordering are structural over all three fields.
//! Two configurations that differ only in boat location are distinct
//! states.

use std::fmt;

use super::MAX_POPULATION;
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Which bank of the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    /// The other bank.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Lowercase name used in transcripts and canonical JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Population of one bank.
///
/// Counts are signed: the transition function computes the departure side
/// by plain subtraction and leaves negative results for the validity
/// checker to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Side {
    pub missionaries: i32,
    pub cannibals: i32,
}

impl Side {
    #[must_use]
    pub const fn new(missionaries: i32, cannibals: i32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    /// True if either count is negative.
    #[must_use]
    pub const fn has_negative(&self) -> bool {
        self.missionaries < 0 || self.cannibals < 0
    }

    /// True if missionaries are present and outnumbered.
    #[must_use]
    pub const fn is_outnumbered(&self) -> bool {
        self.missionaries > 0 && self.cannibals > self.missionaries
    }

    fn to_json(self) -> serde_json::Value {
        serde_json::json!({
            "c": self.cannibals,
            "m": self.missionaries,
        })
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}M{}C)", self.missionaries, self.cannibals)
    }
}

/// A complete, immutable puzzle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Configuration {
    pub left: Side,
    pub right: Side,
    pub boat: Bank,
}

impl Configuration {
    /// Three missionaries, three cannibals and the boat on the left bank.
    pub const CLASSIC_INITIAL: Self = Self::new(Side::new(3, 3), Side::new(0, 0), Bank::Left);

    /// Everyone and the boat on the right bank.
    pub const CLASSIC_GOAL: Self = Self::new(Side::new(0, 0), Side::new(3, 3), Bank::Right);

    #[must_use]
    pub const fn new(left: Side, right: Side, boat: Bank) -> Self {
        Self { left, right, boat }
    }

    /// Everyone on the left bank, boat on the left.
    #[must_use]
    pub const fn all_left(missionaries: i32, cannibals: i32) -> Self {
        Self::new(
            Side::new(missionaries, cannibals),
            Side::new(0, 0),
            Bank::Left,
        )
    }

    /// Everyone on the right bank, boat on the right.
    #[must_use]
    pub const fn all_right(missionaries: i32, cannibals: i32) -> Self {
        Self::new(
            Side::new(0, 0),
            Side::new(missionaries, cannibals),
            Bank::Right,
        )
    }

    /// Population on the given bank.
    #[must_use]
    pub const fn side(&self, bank: Bank) -> Side {
        match bank {
            Bank::Left => self.left,
            Bank::Right => self.right,
        }
    }

    /// Total missionaries across both banks.
    #[must_use]
    pub const fn total_missionaries(&self) -> i32 {
        self.left.missionaries + self.right.missionaries
    }

    /// Total cannibals across both banks.
    #[must_use]
    pub const fn total_cannibals(&self) -> i32 {
        self.left.cannibals + self.right.cannibals
    }

    /// True if no count exceeds [`MAX_POPULATION`].
    #[must_use]
    pub const fn within_population_bound(&self) -> bool {
        self.left.missionaries <= MAX_POPULATION
            && self.left.cannibals <= MAX_POPULATION
            && self.right.missionaries <= MAX_POPULATION
            && self.right.cannibals <= MAX_POPULATION
    }

    /// Canonical JSON projection (`{"boat":..,"left":{"c":..,"m":..},"right":..}`).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "boat": self.boat.as_str(),
            "left": self.left.to_json(),
            "right": self.right.to_json(),
        })
    }

    /// Content fingerprint for audit artifacts.
    ///
    /// Deduplication never uses this; it compares configurations
    /// structurally.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn fingerprint(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(HashDomain::Configuration, &bytes))
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.left, self.right, self.boat)
    }
}
