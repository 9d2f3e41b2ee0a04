//! Queue frontier with arbitrary-position insertion.
//!
//! Nodes leave from the head only. New nodes may enter at any index
//! `0..=len`; the driver picks the index. Insertion is stable: every other
//! entry keeps its relative order.

use std::collections::VecDeque;

use crossing_kernel::model::configuration::Configuration;

use crate::node::SearchNodeV1;

/// Rejected frontier operation. The frontier is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontierError {
    /// Insertion index above the current length.
    PositionOutOfRange { position: usize, len: usize },
}

impl std::fmt::Display for FrontierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionOutOfRange { position, len } => {
                write!(f, "insert position {position} out of range 0..={len}")
            }
        }
    }
}

impl std::error::Error for FrontierError {}

/// Ordered collection of discovered, unexpanded nodes.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<SearchNodeV1>,
    high_water: u64,
}

impl Frontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frontier holding only `root`.
    #[must_use]
    pub fn seeded(root: SearchNodeV1) -> Self {
        let mut frontier = Self::new();
        frontier.queue.push_back(root);
        frontier.high_water = 1;
        frontier
    }

    /// Insert `node` so that it ends up at index `position`.
    ///
    /// # Errors
    ///
    /// Returns [`FrontierError::PositionOutOfRange`] if `position > len`.
    pub fn insert_at(&mut self, position: usize, node: SearchNodeV1) -> Result<(), FrontierError> {
        let len = self.queue.len();
        if position > len {
            return Err(FrontierError::PositionOutOfRange { position, len });
        }
        self.queue.insert(position, node);
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        Ok(())
    }

    /// Remove and return the head.
    pub fn pop_front(&mut self) -> Option<SearchNodeV1> {
        self.queue.pop_front()
    }

    /// The node [`Frontier::pop_front`] would return next.
    #[must_use]
    pub fn front(&self) -> Option<&SearchNodeV1> {
        self.queue.front()
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest size the frontier has reached.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Nodes in queue order, head first.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNodeV1> + '_ {
        self.queue.iter()
    }

    /// Configurations in queue order, head first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Configuration> {
        self.queue.iter().map(|n| n.configuration).collect()
    }
}
