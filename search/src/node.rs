//! Search nodes: configurations tagged with discovery provenance.

use crossing_kernel::model::configuration::Configuration;
use crossing_kernel::model::operator::Operator;

/// An immutable search node.
///
/// Parent links record the *first* discovery of a configuration. Later
/// rediscoveries are suppressed, so following parents yields the path the
/// search actually took, not necessarily a shortest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNodeV1 {
    /// Monotonic identifier in discovery order (root = 0).
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// The configuration at this node.
    pub configuration: Configuration,
    /// Moves from the root.
    pub depth: u32,
    /// The operator that produced this node from its parent.
    pub producing_operator: Option<Operator>,
}

impl SearchNodeV1 {
    /// The root node for a search.
    #[must_use]
    pub fn root(configuration: Configuration) -> Self {
        Self {
            node_id: 0,
            parent_id: None,
            configuration,
            depth: 0,
            producing_operator: None,
        }
    }

    /// A child of `self` reached by `operator`.
    #[must_use]
    pub fn child(&self, node_id: u64, configuration: Configuration, operator: Operator) -> Self {
        Self {
            node_id,
            parent_id: Some(self.node_id),
            configuration,
            depth: self.depth + 1,
            producing_operator: Some(operator),
        }
    }
}
