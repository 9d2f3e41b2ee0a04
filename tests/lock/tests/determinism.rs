//! In-process determinism: same seed, same bytes.

use crossing_harness::config::RunConfig;
use crossing_harness::runner::run_puzzle;
use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_search::contract::NoopObserver;
use crossing_search::policy::SearchPolicyV1;
use crossing_search::search::Search;

fn graph_bytes(seed: u64) -> Vec<u8> {
    Search::for_puzzle(&PuzzleV1::classic(), &SearchPolicyV1::seeded(seed))
        .unwrap()
        .run()
        .graph
        .to_canonical_json_bytes()
        .unwrap()
}

#[test]
fn same_seed_same_graph_n10() {
    let first = graph_bytes(1234);
    for _ in 1..10 {
        assert_eq!(graph_bytes(1234), first);
    }
}

#[test]
fn interleaved_searches_do_not_share_state() {
    let alone = graph_bytes(5);

    let mut a = Search::for_puzzle(&PuzzleV1::classic(), &SearchPolicyV1::seeded(5)).unwrap();
    let mut b = Search::for_puzzle(&PuzzleV1::classic(), &SearchPolicyV1::seeded(6)).unwrap();
    for _ in 0..3 {
        a.step(&mut NoopObserver);
        b.step(&mut NoopObserver);
    }
    let a = a.run();
    let _ = b.run();
    assert_eq!(a.graph.to_canonical_json_bytes().unwrap(), alone);
}

#[test]
fn parallel_runs_agree() {
    let expected = graph_bytes(77);
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| graph_bytes(77)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn different_seeds_usually_differ() {
    let distinct: std::collections::BTreeSet<Vec<u8>> = (0..20).map(graph_bytes).collect();
    assert!(distinct.len() > 1);
}

#[test]
fn bundle_digest_is_stable() {
    let first = run_puzzle(&RunConfig::seeded(99), &mut NoopObserver).unwrap();
    for _ in 1..5 {
        let again = run_puzzle(&RunConfig::seeded(99), &mut NoopObserver).unwrap();
        assert_eq!(again.bundle.digest, first.bundle.digest);
        assert_eq!(again.bundle.artifacts, first.bundle.artifacts);
    }
}
