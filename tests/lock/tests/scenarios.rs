//! Worked scenarios for the classic 3/3/2 puzzle.

use crossing_harness::config::RunConfig;
use crossing_harness::runner::run_puzzle;
use crossing_kernel::model::configuration::{Bank, Configuration, Side};
use crossing_kernel::model::operator::{Operator, OperatorCatalog, CLASSIC_OPERATORS};
use crossing_kernel::rules::transition::transition;
use crossing_kernel::rules::validity::valid;
use crossing_search::contract::NoopObserver;
use crossing_search::policy::{InsertionPolicyV1, SearchPolicyV1};
use crossing_search::search::run_search;

fn config(lm: i32, lc: i32, rm: i32, rc: i32, boat: Bank) -> Configuration {
    Configuration::new(Side::new(lm, lc), Side::new(rm, rc), boat)
}

fn op(m: i32, c: i32) -> Operator {
    Operator::new(m, c, 2).unwrap()
}

#[test]
fn outnumbered_left_bank_is_invalid() {
    assert!(!valid(&config(1, 2, 2, 1, Bank::Left)));
}

#[test]
fn empty_of_missionaries_is_valid() {
    assert!(valid(&config(0, 2, 3, 1, Bank::Left)));
}

#[test]
fn two_missionaries_cross_first() {
    let start = Configuration::CLASSIC_INITIAL;
    let (next, ok) = transition(&start, &op(2, 0));
    assert_eq!(next, config(1, 3, 2, 0, Bank::Right));
    // Transition reports the rules' verdict: three cannibals eat one missionary.
    assert_eq!(ok, valid(&next));
    assert!(!ok);
}

#[test]
fn two_cannibals_cross_first() {
    let (next, ok) = transition(&Configuration::CLASSIC_INITIAL, &op(0, 2));
    assert_eq!(next, config(3, 1, 0, 2, Bank::Right));
    assert!(ok);
}

#[test]
fn operator_catalog_order_is_fixed() {
    let pairs: Vec<(i32, i32)> = CLASSIC_OPERATORS
        .iter()
        .map(|o| (o.missionaries(), o.cannibals()))
        .collect();
    assert_eq!(pairs, vec![(2, 0), (1, 0), (1, 1), (0, 1), (0, 2)]);
    assert_eq!(OperatorCatalog::classic().operators(), CLASSIC_OPERATORS);
}

#[test]
fn classic_solution_is_eleven_moves_under_append() {
    let policy = SearchPolicyV1 {
        insertion: InsertionPolicyV1::Append,
        ..SearchPolicyV1::default()
    };
    let result = run_search(
        Configuration::CLASSIC_INITIAL,
        Configuration::CLASSIC_GOAL,
        &OperatorCatalog::classic(),
        &policy,
    )
    .unwrap();
    let path = result.solution().unwrap();
    assert_eq!(path.moves(), 11);

    let mut current = Configuration::CLASSIC_INITIAL;
    for step in &path.steps {
        let (next, ok) = transition(&current, &step.operator);
        assert!(ok);
        assert_eq!(next, step.configuration);
        current = next;
    }
    assert_eq!(current, Configuration::CLASSIC_GOAL);
}

#[test]
fn harness_run_finds_the_goal() {
    let output = run_puzzle(&RunConfig::default(), &mut NoopObserver).unwrap();
    assert!(output.result.is_goal_reached());
    let transcript = &output.bundle.get("transcript.txt").unwrap().content;
    let text = String::from_utf8_lossy(transcript);
    assert!(text.starts_with("**********\nContents of Queue\nindex: 0 State: {(3M3C), (0M0C), left}\n"));
    assert!(text.ends_with("Goal Found! - State: {(0M0C), (3M3C), right}\n"));
}
