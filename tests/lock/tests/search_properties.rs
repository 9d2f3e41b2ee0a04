//! Properties that must hold for every seed and insertion policy.

use std::collections::BTreeSet;

use crossing_kernel::model::configuration::Configuration;
use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_kernel::rules::transition::transition;
use crossing_kernel::rules::validity::valid;
use crossing_search::graph::{CandidateOutcomeV1, SearchGraphV1, TerminationReasonV1};
use crossing_search::policy::{InsertionPolicyV1, SearchPolicyV1};
use crossing_search::search::{Search, SearchOutcome, SearchResult};

const SEEDS: std::ops::Range<u64> = 0..200;

fn run(puzzle: &PuzzleV1, policy: &SearchPolicyV1) -> SearchResult {
    Search::for_puzzle(puzzle, policy).unwrap().run()
}

fn every_run() -> impl Iterator<Item = (PuzzleV1, SearchPolicyV1)> {
    let puzzles = [
        PuzzleV1::classic(),
        PuzzleV1::new(2, 2, 2).unwrap(),
        PuzzleV1::new(4, 4, 3).unwrap(),
        PuzzleV1::new(4, 4, 2).unwrap(),
    ];
    puzzles.into_iter().flat_map(|puzzle| {
        let random = SEEDS.map(SearchPolicyV1::seeded);
        let fixed = [InsertionPolicyV1::Append, InsertionPolicyV1::Prepend]
            .into_iter()
            .map(|insertion| SearchPolicyV1 {
                insertion,
                ..SearchPolicyV1::default()
            });
        random
            .chain(fixed)
            .map(move |policy| (puzzle.clone(), policy))
    })
}

fn inserted(graph: &SearchGraphV1) -> impl Iterator<Item = (Configuration, u64)> + '_ {
    graph.expansions.iter().flat_map(|e| {
        e.candidates.iter().filter_map(|c| match c.outcome {
            CandidateOutcomeV1::Inserted { position, .. } => Some((c.candidate, position)),
            _ => None,
        })
    })
}

#[test]
fn population_is_conserved() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        for node in &result.nodes {
            assert!(
                puzzle.conserves(&node.configuration),
                "seed {}: {}",
                policy.seed,
                node.configuration
            );
        }
    }
}

#[test]
fn frontier_only_ever_holds_valid_configurations() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        for (config, _) in inserted(&result.graph) {
            assert!(valid(&config), "seed {}: {config}", policy.seed);
        }
        for event in &result.graph.expansions {
            for c in &event.candidates {
                let (_, ok) = transition(&event.configuration, &c.operator);
                let illegal = matches!(c.outcome, CandidateOutcomeV1::IllegalSkipped { .. });
                assert_eq!(ok, !illegal);
            }
        }
    }
}

#[test]
fn no_configuration_is_inserted_twice() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        let mut seen = BTreeSet::from([puzzle.initial()]);
        for (config, _) in inserted(&result.graph) {
            assert!(seen.insert(config), "seed {}: {config} inserted twice", policy.seed);
        }
    }
}

#[test]
fn insertion_positions_are_in_bounds_and_grow_by_one() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        let mut len_after = 1u64;
        for event in &result.graph.expansions {
            let mut len = len_after - 1;
            for c in &event.candidates {
                if let CandidateOutcomeV1::Inserted { position, .. } = c.outcome {
                    assert!(position <= len, "seed {}: {position} > {len}", policy.seed);
                    match policy.insertion {
                        InsertionPolicyV1::Append => assert_eq!(position, len),
                        InsertionPolicyV1::Prepend => assert_eq!(position, 0),
                        InsertionPolicyV1::UniformRandom => {}
                    }
                    len += 1;
                }
            }
            assert_eq!(len, event.frontier_len_after);
            len_after = len;
        }
    }
}

#[test]
fn dead_end_means_nothing_inserted() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        for event in &result.graph.expansions {
            let any = event.candidates.iter().any(|c| c.outcome.is_inserted());
            assert_eq!(event.dead_end, !any);
        }
    }
}

#[test]
fn classic_puzzle_always_terminates_found() {
    for seed in SEEDS {
        let result = run(&PuzzleV1::classic(), &SearchPolicyV1::seeded(seed));
        assert!(result.is_goal_reached(), "seed {seed}");
    }
}

#[test]
fn solvability_does_not_depend_on_the_seed() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        let solvable = puzzle.missionaries() <= 3 || puzzle.capacity() >= 3;
        assert_eq!(result.is_goal_reached(), solvable, "{puzzle:?} seed {}", policy.seed);
        if !solvable {
            assert_eq!(
                result.termination_reason(),
                TerminationReasonV1::FrontierExhausted
            );
        }
    }
}

#[test]
fn solution_path_is_consistent_with_parent_links() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        let SearchOutcome::Found(path) = &result.outcome else {
            continue;
        };
        let TerminationReasonV1::GoalReached { node_id } = result.termination_reason() else {
            panic!("found without goal termination");
        };
        let goal_depth = result.nodes.iter().find(|n| n.node_id == node_id).unwrap().depth;
        assert_eq!(path.moves(), goal_depth as usize);
        assert_eq!(path.start, puzzle.initial());
        assert_eq!(path.final_configuration(), puzzle.goal());

        let mut current = path.start;
        for step in &path.steps {
            assert_eq!(step.departed_from, current.boat);
            let (next, ok) = transition(&current, &step.operator);
            assert!(ok);
            assert_eq!(next, step.configuration);
            current = next;
        }
    }
}

#[test]
fn visited_count_matches_node_count() {
    for (puzzle, policy) in every_run() {
        let result = run(&puzzle, &policy);
        let meta = &result.graph.metadata;
        assert_eq!(meta.total_insertions + 1, result.nodes.len() as u64);
        assert_eq!(
            meta.total_candidates_generated,
            meta.total_expansions * puzzle.catalog().len() as u64
        );
        assert_eq!(
            meta.total_candidates_generated,
            meta.total_illegal_skipped + meta.total_duplicates_suppressed + meta.total_insertions
        );
    }
}
