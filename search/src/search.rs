//! Search entry point and expansion loop.
//!
//! A [`Search`] owns everything one invocation needs: the seeded RNG, the
//! frontier, the visited set and the audit log. Nothing is shared between
//! searches, so independent runs (and tests) never interfere.
//!
//! Each iteration pops the frontier head, stops if it is the goal, and
//! otherwise applies every catalog operator in order. Legal, unvisited
//! successors are recorded and inserted at a position chosen by the
//! policy: uniformly in `[0, len]` by default, drawn fresh per insertion.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crossing_kernel::model::configuration::{Bank, Configuration};
use crossing_kernel::model::operator::{Operator, OperatorCatalog};
use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_kernel::rules::transition;
use crossing_kernel::rules::validity;

use crate::contract::{ExpansionView, NoopObserver, SearchObserverV1};
use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierError};
use crate::graph::{
    CandidateOutcomeV1, CandidateRecordV1, ExpandEventV1, SearchGraphMetadata,
    SearchGraphNodeSummaryV1, SearchGraphV1, TerminationReasonV1,
};
use crate::node::SearchNodeV1;
use crate::policy::{InsertionPolicyV1, SearchPolicyV1};
use crate::visited::VisitedSet;

/// Driver state. Every state except `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    /// The goal was popped; `node_id` is its node.
    GoalFound { node_id: u64 },
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// `max_expansions` was reached first.
    BudgetExhausted,
    /// The frontier rejected an in-range insertion.
    InvariantViolated,
}

impl From<TerminationReasonV1> for SearchState {
    fn from(reason: TerminationReasonV1) -> Self {
        match reason {
            TerminationReasonV1::GoalReached { node_id } => Self::GoalFound { node_id },
            TerminationReasonV1::FrontierExhausted => Self::Exhausted,
            TerminationReasonV1::ExpansionBudgetExceeded => Self::BudgetExhausted,
            TerminationReasonV1::FrontierInvariantViolation => Self::InvariantViolated,
        }
    }
}

/// One move of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub operator: Operator,
    /// Bank the boat left from.
    pub departed_from: Bank,
    /// Configuration after the move.
    pub configuration: Configuration,
}

/// The path the search took from the initial configuration to the goal.
///
/// Built from first-discovery parent links, so it is *a* solution, not
/// necessarily a shortest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath {
    pub start: Configuration,
    pub steps: Vec<PathStep>,
}

impl SolutionPath {
    /// Number of boat crossings.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn final_configuration(&self) -> Configuration {
        self.steps.last().map_or(self.start, |s| s.configuration)
    }

    /// Every configuration on the path, start first.
    #[must_use]
    pub fn configurations(&self) -> Vec<Configuration> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|s| s.configuration))
            .collect()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "moves": self.steps.len() as u64,
            "start": self.start.to_json(),
            "steps": self.steps.iter().map(|s| serde_json::json!({
                "configuration": s.configuration.to_json(),
                "departed_from": s.departed_from.as_str(),
                "operator": s.operator.to_json(),
            })).collect::<Vec<_>>(),
        })
    }
}

/// Externally visible search outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SolutionPath),
    NotFound,
}

/// Result of a search execution.
///
/// Always contains a complete `SearchGraphV1` audit trail regardless of how
/// the search terminated.
#[derive(Debug)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// The complete search graph audit trail.
    pub graph: SearchGraphV1,
    /// All nodes created during search, indexed by `node_id`.
    pub nodes: Vec<SearchNodeV1>,
}

impl SearchResult {
    /// Returns `true` if the search terminated because the goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    #[must_use]
    pub fn solution(&self) -> Option<&SolutionPath> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }

    #[must_use]
    pub fn termination_reason(&self) -> TerminationReasonV1 {
        self.graph.metadata.termination_reason
    }
}

#[derive(Debug, Default)]
struct Counters {
    candidates_generated: u64,
    illegal_skipped: u64,
    duplicates_suppressed: u64,
    insertions: u64,
    dead_ends: u64,
}

/// One search invocation.
pub struct Search {
    initial: Configuration,
    goal: Configuration,
    catalog: OperatorCatalog,
    policy: SearchPolicyV1,
    catalog_digest: String,
    policy_digest: String,
    rng: StdRng,
    frontier: Frontier,
    visited: VisitedSet,
    nodes: Vec<SearchNodeV1>,
    expansions: Vec<ExpandEventV1>,
    counters: Counters,
    termination: Option<TerminationReasonV1>,
}

impl Search {
    /// Prepare a search: seeded RNG, `Visited = {initial}`, `Frontier = [initial]`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the policy is invalid, either endpoint
    /// breaks the validity rules or the population bound, or the endpoints
    /// hold different populations.
    pub fn new(
        initial: Configuration,
        goal: Configuration,
        catalog: &OperatorCatalog,
        policy: &SearchPolicyV1,
    ) -> Result<Self, SearchError> {
        policy.validate()?;
        for (role, endpoint) in [("initial", &initial), ("goal", &goal)] {
            validity::check(endpoint)
                .map_err(|violation| SearchError::InvalidEndpoint { role, violation })?;
            if !endpoint.within_population_bound() {
                return Err(SearchError::PopulationTooLarge {
                    role,
                    detail: endpoint.to_string(),
                });
            }
        }
        if initial.total_missionaries() != goal.total_missionaries()
            || initial.total_cannibals() != goal.total_cannibals()
        {
            return Err(SearchError::PopulationMismatch {
                detail: format!("initial={initial}, goal={goal}"),
            });
        }

        let catalog_digest = catalog
            .digest()
            .map_err(|e| SearchError::Serialization {
                detail: e.to_string(),
            })?
            .as_str()
            .to_string();
        let policy_digest = policy
            .digest()
            .map_err(|e| SearchError::Serialization {
                detail: e.to_string(),
            })?
            .as_str()
            .to_string();

        let root = SearchNodeV1::root(initial);
        let mut visited = VisitedSet::new();
        visited.insert(initial, root.node_id);

        Ok(Self {
            initial,
            goal,
            catalog: catalog.clone(),
            policy: policy.clone(),
            catalog_digest,
            policy_digest,
            rng: StdRng::seed_from_u64(policy.seed),
            frontier: Frontier::seeded(root),
            visited,
            nodes: vec![root],
            expansions: Vec::new(),
            counters: Counters::default(),
            termination: None,
        })
    }

    /// Prepare a search over a puzzle instance's endpoints and catalog.
    ///
    /// # Errors
    ///
    /// See [`Search::new`].
    pub fn for_puzzle(puzzle: &PuzzleV1, policy: &SearchPolicyV1) -> Result<Self, SearchError> {
        Self::new(puzzle.initial(), puzzle.goal(), puzzle.catalog(), policy)
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        self.termination.map_or(SearchState::Running, SearchState::from)
    }

    #[must_use]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Expansions recorded so far.
    #[must_use]
    pub fn expansions(&self) -> &[ExpandEventV1] {
        &self.expansions
    }

    /// Advance by one iteration. Terminal states are returned unchanged.
    pub fn step(&mut self, observer: &mut dyn SearchObserverV1) -> SearchState {
        if self.termination.is_some() {
            return self.state();
        }
        if self.frontier.is_empty() {
            return self.terminate(TerminationReasonV1::FrontierExhausted, observer);
        }
        // A spent budget still lets an already discovered goal be popped.
        let goal_at_head = self
            .frontier
            .front()
            .is_some_and(|node| node.configuration == self.goal);
        if self.expansions.len() as u64 >= self.policy.max_expansions && !goal_at_head {
            return self.terminate(TerminationReasonV1::ExpansionBudgetExceeded, observer);
        }

        observer.on_iteration_start(&self.frontier);

        let Some(current) = self.frontier.pop_front() else {
            return self.terminate(TerminationReasonV1::FrontierExhausted, observer);
        };

        if current.configuration == self.goal {
            return self.terminate(
                TerminationReasonV1::GoalReached {
                    node_id: current.node_id,
                },
                observer,
            );
        }

        let expansion_order = self.expansions.len() as u64;
        debug!(
            expansion = expansion_order,
            node_id = current.node_id,
            state = %current.configuration,
            frontier_len = self.frontier.len(),
            "expanding"
        );

        let candidates = match self.expand(&current) {
            Ok(candidates) => candidates,
            Err(err) => {
                debug!(error = %err, "frontier rejected insertion");
                return self.terminate(TerminationReasonV1::FrontierInvariantViolation, observer);
            }
        };

        let dead_end = !candidates.iter().any(|c| c.outcome.is_inserted());
        if dead_end {
            self.counters.dead_ends += 1;
            debug!(node_id = current.node_id, "dead end");
        }

        self.expansions.push(ExpandEventV1 {
            expansion_order,
            node_id: current.node_id,
            configuration: current.configuration,
            candidates,
            dead_end,
            frontier_len_after: self.frontier.len() as u64,
        });

        if let Some(event) = self.expansions.last() {
            observer.on_expansion(&ExpansionView {
                expansion_order,
                node: &current,
                candidates: &event.candidates,
                dead_end,
                frontier: &self.frontier,
            });
        }
        observer.between_iterations();

        SearchState::Running
    }

    /// Run to a terminal state without observation.
    #[must_use]
    pub fn run(self) -> SearchResult {
        self.run_with(&mut NoopObserver)
    }

    /// Run to a terminal state, reporting to `observer`.
    pub fn run_with(mut self, observer: &mut dyn SearchObserverV1) -> SearchResult {
        while self.step(observer) == SearchState::Running {}
        self.finish()
    }

    /// Apply every operator to `current`, admitting new successors.
    fn expand(&mut self, current: &SearchNodeV1) -> Result<Vec<CandidateRecordV1>, FrontierError> {
        let operators: Vec<Operator> = self.catalog.iter().copied().collect();
        let mut records = Vec::with_capacity(operators.len());

        for (index, op) in operators.into_iter().enumerate() {
            self.counters.candidates_generated += 1;
            let candidate = transition::successor(&current.configuration, &op);

            let outcome = match validity::check(&candidate) {
                Ok(()) => self.admit(current, candidate, op)?,
                Err(violation) => {
                    self.counters.illegal_skipped += 1;
                    CandidateOutcomeV1::IllegalSkipped { violation }
                }
            };

            trace!(operator = %op, candidate = %candidate, outcome = ?outcome, "candidate");
            records.push(CandidateRecordV1 {
                index: index as u64,
                operator: op,
                candidate,
                outcome,
            });
        }

        Ok(records)
    }

    /// Dedup a legal successor and insert it if it is new.
    fn admit(
        &mut self,
        parent: &SearchNodeV1,
        candidate: Configuration,
        op: Operator,
    ) -> Result<CandidateOutcomeV1, FrontierError> {
        if let Some(existing_node) = self.visited.first_seen(&candidate) {
            self.counters.duplicates_suppressed += 1;
            return Ok(CandidateOutcomeV1::DuplicateSkipped { existing_node });
        }

        let child = parent.child(self.nodes.len() as u64, candidate, op);
        let position = self.draw_position();
        self.frontier.insert_at(position, child)?;
        self.visited.insert(candidate, child.node_id);
        self.nodes.push(child);
        self.counters.insertions += 1;

        Ok(CandidateOutcomeV1::Inserted {
            to_node: child.node_id,
            position: position as u64,
        })
    }

    /// Insertion index for the next new node, against the current length.
    fn draw_position(&mut self) -> usize {
        let len = self.frontier.len();
        match self.policy.insertion {
            InsertionPolicyV1::UniformRandom => self.rng.gen_range(0..=len),
            InsertionPolicyV1::Append => len,
            InsertionPolicyV1::Prepend => 0,
        }
    }

    fn terminate(
        &mut self,
        reason: TerminationReasonV1,
        observer: &mut dyn SearchObserverV1,
    ) -> SearchState {
        self.termination = Some(reason);
        info!(
            reason = reason.as_str(),
            expansions = self.expansions.len(),
            visited = self.visited.len(),
            "search finished"
        );
        let goal = matches!(reason, TerminationReasonV1::GoalReached { .. }).then_some(&self.goal);
        observer.on_termination(&reason, goal);
        SearchState::from(reason)
    }

    fn finish(self) -> SearchResult {
        let termination_reason = self
            .termination
            .unwrap_or(TerminationReasonV1::ExpansionBudgetExceeded);

        let outcome = match termination_reason {
            TerminationReasonV1::GoalReached { node_id } => {
                SearchOutcome::Found(solution_path(self.initial, &self.nodes, node_id))
            }
            _ => SearchOutcome::NotFound,
        };

        let graph = build_graph(
            self.expansions,
            &self.nodes,
            SearchGraphMetadata {
                initial: self.initial,
                goal: self.goal,
                catalog_digest: self.catalog_digest,
                search_policy_digest: self.policy_digest,
                seed: self.policy.seed,
                insertion: self.policy.insertion,
                max_expansions: self.policy.max_expansions,
                total_expansions: 0,
                total_candidates_generated: self.counters.candidates_generated,
                total_illegal_skipped: self.counters.illegal_skipped,
                total_duplicates_suppressed: self.counters.duplicates_suppressed,
                total_insertions: self.counters.insertions,
                total_dead_ends: self.counters.dead_ends,
                frontier_high_water: self.frontier.high_water(),
                termination_reason,
            },
        );

        SearchResult {
            outcome,
            graph,
            nodes: self.nodes,
        }
    }
}

/// Run a search from `initial` to `goal` without observation.
///
/// # Errors
///
/// Returns [`SearchError`] only for pre-flight validation failures.
pub fn run_search(
    initial: Configuration,
    goal: Configuration,
    catalog: &OperatorCatalog,
    policy: &SearchPolicyV1,
) -> Result<SearchResult, SearchError> {
    Ok(Search::new(initial, goal, catalog, policy)?.run())
}

/// Run a search from `initial` to `goal`, reporting to `observer`.
///
/// # Errors
///
/// Returns [`SearchError`] only for pre-flight validation failures.
pub fn run_search_observed(
    initial: Configuration,
    goal: Configuration,
    catalog: &OperatorCatalog,
    policy: &SearchPolicyV1,
    observer: &mut dyn SearchObserverV1,
) -> Result<SearchResult, SearchError> {
    Ok(Search::new(initial, goal, catalog, policy)?.run_with(observer))
}

/// Reconstruct the node-id path from root to a goal node.
///
/// `nodes` is indexed by `node_id`, as in [`SearchResult::nodes`]. An id
/// outside `nodes` yields an empty path.
#[must_use]
pub fn reconstruct_path(nodes: &[SearchNodeV1], goal_node_id: u64) -> Vec<u64> {
    ancestry(nodes, goal_node_id)
        .into_iter()
        .map(|n| n.node_id)
        .collect()
}

fn node_at(nodes: &[SearchNodeV1], node_id: u64) -> Option<&SearchNodeV1> {
    usize::try_from(node_id).ok().and_then(|i| nodes.get(i))
}

/// Nodes from the root down to `node_id`, following parent links.
fn ancestry(nodes: &[SearchNodeV1], node_id: u64) -> Vec<&SearchNodeV1> {
    let mut path = Vec::new();
    let mut current = node_at(nodes, node_id);

    while let Some(node) = current {
        path.push(node);
        current = node.parent_id.and_then(|id| node_at(nodes, id));
    }

    path.reverse();
    path
}

fn solution_path(start: Configuration, nodes: &[SearchNodeV1], goal_node_id: u64) -> SolutionPath {
    let steps = ancestry(nodes, goal_node_id)
        .into_iter()
        .filter_map(|node| {
            node.producing_operator.map(|operator| PathStep {
                operator,
                // The boat always crosses, so it left from the opposite bank.
                departed_from: node.configuration.boat.opposite(),
                configuration: node.configuration,
            })
        })
        .collect();

    SolutionPath { start, steps }
}

fn build_graph(
    expansions: Vec<ExpandEventV1>,
    all_nodes: &[SearchNodeV1],
    mut metadata: SearchGraphMetadata,
) -> SearchGraphV1 {
    metadata.total_expansions = expansions.len() as u64;

    // node_id → expansion index; each node is expanded at most once.
    let expansion_index: HashMap<u64, usize> = expansions
        .iter()
        .enumerate()
        .map(|(i, e)| (e.node_id, i))
        .collect();

    let mut node_summaries: Vec<SearchGraphNodeSummaryV1> = all_nodes
        .iter()
        .map(|n| {
            let exp = expansion_index.get(&n.node_id).map(|&idx| &expansions[idx]);
            let is_goal = matches!(
                metadata.termination_reason,
                TerminationReasonV1::GoalReached { node_id } if node_id == n.node_id
            );
            SearchGraphNodeSummaryV1 {
                node_id: n.node_id,
                parent_id: n.parent_id,
                configuration: n.configuration,
                depth: n.depth,
                is_goal,
                dead_end: exp.is_some_and(|e| e.dead_end),
                expansion_order: exp.map(|e| e.expansion_order),
            }
        })
        .collect();
    node_summaries.sort_by_key(|n| n.node_id);

    SearchGraphV1 {
        expansions,
        node_summaries,
        metadata,
    }
}
