//! Visited set: every configuration ever inserted into the frontier.
//!
//! Keyed by structural equality. `BTreeMap` (not `HashMap`) keeps iteration
//! deterministic at serialization boundaries. The value is the node that
//! first discovered the configuration; first-seen wins and is never
//! replaced.

use std::collections::BTreeMap;

use crossing_kernel::model::configuration::Configuration;

#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    first_seen: BTreeMap<Configuration, u64>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `config` as discovered by `node_id`.
    ///
    /// Returns `false` (and keeps the original discoverer) if it was
    /// already visited.
    pub fn insert(&mut self, config: Configuration, node_id: u64) -> bool {
        if self.first_seen.contains_key(&config) {
            return false;
        }
        self.first_seen.insert(config, node_id);
        true
    }

    #[must_use]
    pub fn contains(&self, config: &Configuration) -> bool {
        self.first_seen.contains_key(config)
    }

    /// Node that first discovered `config`.
    #[must_use]
    pub fn first_seen(&self, config: &Configuration) -> Option<u64> {
        self.first_seen.get(config).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Visited configurations in structural order.
    pub fn iter(&self) -> impl Iterator<Item = &Configuration> + '_ {
        self.first_seen.keys()
    }
}
