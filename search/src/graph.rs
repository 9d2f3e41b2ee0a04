//! `SearchGraphV1`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEventV1`
//! entries. Node summaries are a derived index for path reconstruction.

use crossing_kernel::model::configuration::Configuration;
use crossing_kernel::model::operator::Operator;
use crossing_kernel::proof::canon::{canonical_json_bytes, CanonError};
use crossing_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use crossing_kernel::rules::validity::Violation;

use crate::policy::InsertionPolicyV1;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraphV1 {
    /// Ordered expansion events (normative decision surface).
    pub expansions: Vec<ExpandEventV1>,
    /// Derived node index sorted by `node_id` ascending.
    pub node_summaries: Vec<SearchGraphNodeSummaryV1>,
    /// Aggregate metadata.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier-pop + candidate-expansion event.
#[derive(Debug, Clone)]
pub struct ExpandEventV1 {
    /// Total order of expansions.
    pub expansion_order: u64,
    /// The node being expanded.
    pub node_id: u64,
    /// The configuration being expanded.
    pub configuration: Configuration,
    /// One record per catalog operator, in catalog order.
    pub candidates: Vec<CandidateRecordV1>,
    /// True if no candidate was inserted.
    pub dead_end: bool,
    /// Frontier length once all insertions are done.
    pub frontier_len_after: u64,
}

/// An operator application with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecordV1 {
    /// Position in the operator catalog.
    pub index: u64,
    pub operator: Operator,
    /// The structurally computed successor (meaningless when illegal).
    pub candidate: Configuration,
    pub outcome: CandidateOutcomeV1,
}

/// Outcome of processing a candidate during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOutcomeV1 {
    /// New configuration; became `to_node`, inserted at frontier index `position`.
    Inserted { to_node: u64, position: u64 },
    /// Already visited (first-seen-wins dedup); `existing_node` discovered it.
    DuplicateSkipped { existing_node: u64 },
    /// The successor broke a validity rule.
    IllegalSkipped { violation: Violation },
}

impl CandidateOutcomeV1 {
    #[must_use]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Derived node summary for path reconstruction.
#[derive(Debug, Clone)]
pub struct SearchGraphNodeSummaryV1 {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub configuration: Configuration,
    pub depth: u32,
    pub is_goal: bool,
    pub dead_end: bool,
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata with run bindings.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    // Run bindings
    pub initial: Configuration,
    pub goal: Configuration,
    pub catalog_digest: String,
    pub search_policy_digest: String,
    pub seed: u64,
    pub insertion: InsertionPolicyV1,
    pub max_expansions: u64,

    // Counters
    pub total_expansions: u64,
    pub total_candidates_generated: u64,
    pub total_illegal_skipped: u64,
    pub total_duplicates_suppressed: u64,
    pub total_insertions: u64,
    pub total_dead_ends: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// The goal configuration was popped from the frontier.
    GoalReached { node_id: u64 },
    /// Frontier emptied without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// The frontier rejected an insertion the driver computed in range.
    FrontierInvariantViolation,
}

impl TerminationReasonV1 {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::FrontierInvariantViolation => "frontier_invariant_violation",
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraphV1 {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Digest of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchGraph, &bytes))
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self.node_summaries.iter().map(node_summary_to_json).collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "candidates": e.candidates.iter().map(candidate_record_to_json).collect::<Vec<_>>(),
        "configuration": e.configuration.to_json(),
        "dead_end": e.dead_end,
        "expansion_order": e.expansion_order,
        "frontier_len_after": e.frontier_len_after,
        "node_id": e.node_id,
    })
}

fn candidate_record_to_json(r: &CandidateRecordV1) -> serde_json::Value {
    serde_json::json!({
        "candidate": r.candidate.to_json(),
        "index": r.index,
        "operator": r.operator.to_json(),
        "outcome": outcome_to_json(&r.outcome),
    })
}

fn outcome_to_json(o: &CandidateOutcomeV1) -> serde_json::Value {
    match o {
        CandidateOutcomeV1::Inserted { to_node, position } => {
            serde_json::json!({"position": position, "to_node": to_node, "type": "inserted"})
        }
        CandidateOutcomeV1::DuplicateSkipped { existing_node } => {
            serde_json::json!({"existing_node": existing_node, "type": "duplicate_skipped"})
        }
        CandidateOutcomeV1::IllegalSkipped { violation } => {
            serde_json::json!({"type": "illegal_skipped", "violation": violation.as_str()})
        }
    }
}

fn node_summary_to_json(n: &SearchGraphNodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "configuration": n.configuration.to_json(),
        "dead_end": n.dead_end,
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "is_goal": n.is_goal,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "catalog_digest": m.catalog_digest,
        "frontier_high_water": m.frontier_high_water,
        "goal": m.goal.to_json(),
        "initial": m.initial.to_json(),
        "insertion": m.insertion.as_str(),
        "max_expansions": m.max_expansions,
        "search_policy_digest": m.search_policy_digest,
        "seed": m.seed,
        "termination_reason": termination_reason_to_json(&m.termination_reason),
        "total_candidates_generated": m.total_candidates_generated,
        "total_dead_ends": m.total_dead_ends,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_illegal_skipped": m.total_illegal_skipped,
        "total_insertions": m.total_insertions,
    })
}

fn termination_reason_to_json(r: &TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": r.as_str()})
        }
        TerminationReasonV1::FrontierExhausted
        | TerminationReasonV1::ExpansionBudgetExceeded
        | TerminationReasonV1::FrontierInvariantViolation => serde_json::json!({"type": r.as_str()}),
    }
}
