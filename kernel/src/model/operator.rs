//! Operators (boat loadings) and the ordered catalog the search expands over.

use std::fmt;

use super::{ModelError, MAX_CAPACITY};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// One boat loading: how many missionaries and cannibals cross together.
///
/// Invariant (enforced by [`Operator::new`]): both counts are non-negative
/// and `1 <= missionaries + cannibals <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operator {
    missionaries: i32,
    cannibals: i32,
}

impl Operator {
    /// Build an operator for a boat of the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCapacity`] if `capacity` is outside
    /// `1..=MAX_CAPACITY`, or [`ModelError::OperatorOutOfRange`] if the
    /// loading is empty, negative or exceeds the capacity.
    pub fn new(missionaries: i32, cannibals: i32, capacity: i32) -> Result<Self, ModelError> {
        if !(1..=MAX_CAPACITY).contains(&capacity) {
            return Err(ModelError::InvalidCapacity { capacity });
        }
        let load = missionaries.saturating_add(cannibals);
        if missionaries < 0 || cannibals < 0 || load < 1 || load > capacity {
            return Err(ModelError::OperatorOutOfRange {
                missionaries,
                cannibals,
                capacity,
            });
        }
        Ok(Self::raw(missionaries, cannibals))
    }

    const fn raw(missionaries: i32, cannibals: i32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    #[must_use]
    pub const fn missionaries(&self) -> i32 {
        self.missionaries
    }

    #[must_use]
    pub const fn cannibals(&self) -> i32 {
        self.cannibals
    }

    /// People in the boat.
    #[must_use]
    pub const fn load(&self) -> i32 {
        self.missionaries + self.cannibals
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "c": self.cannibals,
            "m": self.missionaries,
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} M, {} C)", self.missionaries, self.cannibals)
    }
}

/// The classic two-seat catalog, in expansion order.
pub const CLASSIC_OPERATORS: [Operator; 5] = [
    Operator::raw(2, 0),
    Operator::raw(1, 0),
    Operator::raw(1, 1),
    Operator::raw(0, 1),
    Operator::raw(0, 2),
];

/// Ordered, read-only operator list.
///
/// The search applies operators in catalog order, so the order is part of
/// the search trace and of the catalog digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCatalog {
    operators: Vec<Operator>,
    capacity: i32,
}

impl OperatorCatalog {
    /// `{(2,0), (1,0), (1,1), (0,1), (0,2)}`.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            operators: CLASSIC_OPERATORS.to_vec(),
            capacity: 2,
        }
    }

    /// Every loading of 1..=`capacity` people, missionaries descending then
    /// cannibals ascending. `for_capacity(2)` equals [`OperatorCatalog::classic`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCapacity`] if `capacity` is outside
    /// `1..=MAX_CAPACITY`.
    pub fn for_capacity(capacity: i32) -> Result<Self, ModelError> {
        if !(1..=MAX_CAPACITY).contains(&capacity) {
            return Err(ModelError::InvalidCapacity { capacity });
        }
        let mut operators = Vec::new();
        for m in (0..=capacity).rev() {
            for c in 0..=(capacity - m) {
                if m + c >= 1 {
                    operators.push(Operator::raw(m, c));
                }
            }
        }
        Ok(Self {
            operators,
            capacity,
        })
    }

    /// Validate an explicit `(missionaries, cannibals)` list.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the list is empty, any entry is out of range
    /// for `capacity`, or an entry repeats.
    pub fn from_pairs(pairs: &[(i32, i32)], capacity: i32) -> Result<Self, ModelError> {
        if pairs.is_empty() {
            return Err(ModelError::EmptyCatalog);
        }
        let mut operators: Vec<Operator> = Vec::with_capacity(pairs.len());
        for &(m, c) in pairs {
            let op = Operator::new(m, c, capacity)?;
            if operators.contains(&op) {
                return Err(ModelError::DuplicateOperator {
                    missionaries: m,
                    cannibals: c,
                });
            }
            operators.push(op);
        }
        Ok(Self {
            operators,
            capacity,
        })
    }

    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    #[must_use]
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operator> {
        self.operators.iter()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "capacity": self.capacity,
            "operators": self.operators.iter().map(Operator::to_json).collect::<Vec<_>>(),
        })
    }

    /// Digest of the ordered catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(HashDomain::OperatorCatalog, &bytes))
    }
}

impl<'a> IntoIterator for &'a OperatorCatalog {
    type Item = &'a Operator;
    type IntoIter = std::slice::Iter<'a, Operator>;

    fn into_iter(self) -> Self::IntoIter {
        self.operators.iter()
    }
}
