//! Shared helpers for crossing benchmark suites.

use crossing_harness::config::RunConfig;
use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_search::policy::{InsertionPolicyV1, SearchPolicyV1};
use crossing_search::search::{Search, SearchResult};

/// A named puzzle size used across suites.
pub struct Workload {
    pub name: &'static str,
    pub config: RunConfig,
}

/// Solvable puzzles of increasing size, all under `insertion`.
#[must_use]
pub fn workloads(insertion: InsertionPolicyV1) -> Vec<Workload> {
    let policy = SearchPolicyV1 {
        insertion,
        ..SearchPolicyV1::seeded(42)
    };
    [("classic", 3, 3, 2), ("five_three", 5, 5, 3), ("twelve_four", 12, 12, 4)]
        .into_iter()
        .map(|(name, missionaries, cannibals, capacity)| Workload {
            name,
            config: RunConfig {
                missionaries,
                cannibals,
                capacity,
                policy: policy.clone(),
                ..RunConfig::default()
            },
        })
        .collect()
}

/// Build the puzzle for a workload.
///
/// # Panics
///
/// Panics if the workload configuration is rejected. Benchmark setup failures are fatal.
#[must_use]
pub fn puzzle_of(workload: &Workload) -> PuzzleV1 {
    workload.config.puzzle().expect("benchmark puzzle")
}

/// Run the search engine alone, without transcript capture or bundling.
///
/// # Panics
///
/// Panics if pre-flight validation rejects the puzzle or policy.
#[must_use]
pub fn search_only(puzzle: &PuzzleV1, policy: &SearchPolicyV1) -> SearchResult {
    Search::for_puzzle(puzzle, policy)
        .expect("benchmark search setup")
        .run()
}
