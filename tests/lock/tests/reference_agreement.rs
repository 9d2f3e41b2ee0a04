//! Cross-checks against an independent breadth-first solver.

use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_search::policy::{InsertionPolicyV1, SearchPolicyV1};
use crossing_search::search::Search;
use lock_tests::reference::{min_moves, reachable};

fn puzzles() -> Vec<PuzzleV1> {
    vec![
        PuzzleV1::classic(),
        PuzzleV1::new(1, 1, 2).unwrap(),
        PuzzleV1::new(2, 2, 2).unwrap(),
        PuzzleV1::new(4, 4, 3).unwrap(),
        PuzzleV1::new(5, 5, 3).unwrap(),
        PuzzleV1::new(4, 4, 2).unwrap(),
        PuzzleV1::new(3, 2, 2).unwrap(),
    ]
}

#[test]
fn classic_minimum_is_eleven() {
    assert_eq!(min_moves(&PuzzleV1::classic()), Some(11));
    assert_eq!(min_moves(&PuzzleV1::new(4, 4, 2).unwrap()), None);
}

#[test]
fn append_policy_matches_breadth_first_minimum() {
    let policy = SearchPolicyV1 {
        insertion: InsertionPolicyV1::Append,
        ..SearchPolicyV1::default()
    };
    for puzzle in puzzles() {
        let result = Search::for_puzzle(&puzzle, &policy).unwrap().run();
        let moves = result.solution().map(|p| p.moves());
        assert_eq!(moves, min_moves(&puzzle), "{puzzle:?}");
    }
}

#[test]
fn random_paths_are_never_shorter_than_the_minimum() {
    for puzzle in puzzles() {
        let Some(minimum) = min_moves(&puzzle) else {
            continue;
        };
        for seed in 0..50 {
            let result = Search::for_puzzle(&puzzle, &SearchPolicyV1::seeded(seed))
                .unwrap()
                .run();
            let moves = result.solution().unwrap().moves();
            assert!(moves >= minimum, "seed {seed}: {moves} < {minimum}");
        }
    }
}

#[test]
fn exhausted_search_visits_the_whole_reachable_set() {
    let puzzle = PuzzleV1::new(4, 4, 2).unwrap();
    for seed in 0..20 {
        let result = Search::for_puzzle(&puzzle, &SearchPolicyV1::seeded(seed))
            .unwrap()
            .run();
        assert!(!result.is_goal_reached());
        assert_eq!(result.nodes.len(), reachable(&puzzle).len());
        assert_eq!(result.graph.expansions.len(), result.nodes.len());
    }
}
