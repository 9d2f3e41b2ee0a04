//! Search policy types.

use crossing_kernel::proof::canon::{canonical_json_bytes, CanonError};
use crossing_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;

/// Search configuration: seed, insertion discipline and budget.
///
/// Same policy + same puzzle ⇒ byte-identical search graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Seed for the per-search RNG that draws insertion positions.
    pub seed: u64,
    /// Where newly discovered configurations enter the frontier.
    pub insertion: InsertionPolicyV1,
    /// Hard cap on node expansions. Once spent the search stops, unless the
    /// goal is already at the frontier head, in which case it is popped and
    /// reported.
    pub max_expansions: u64,
}

impl SearchPolicyV1 {
    /// Default policy with the given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Validate the policy before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Policy snapshot as JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "insertion": self.insertion.as_str(),
            "max_expansions": self.max_expansions,
            "seed": self.seed,
        })
    }

    /// Digest of the canonical policy snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            seed: 0,
            insertion: InsertionPolicyV1::UniformRandom,
            max_expansions: 100_000,
        }
    }
}

/// Insertion discipline for newly discovered configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionPolicyV1 {
    /// Uniform over `[0, len]`, drawn fresh per insertion. Default.
    UniformRandom,
    /// Always at the tail (breadth-first order). Consumes no randomness.
    Append,
    /// Always at the head (depth-first order). Consumes no randomness.
    Prepend,
}

impl InsertionPolicyV1 {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UniformRandom => "uniform_random",
            Self::Append => "append",
            Self::Prepend => "prepend",
        }
    }

    /// Parse the identifier produced by [`InsertionPolicyV1::as_str`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "uniform_random" => Some(Self::UniformRandom),
            "append" => Some(Self::Append),
            "prepend" => Some(Self::Prepend),
            _ => None,
        }
    }
}
