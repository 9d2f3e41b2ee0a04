//! Runs the classic puzzle through the harness and prints deterministic
//! `key=value` lines for cross-process comparison.
//!
//! Usage: `search_fixture [seed]` (default seed 42).

use crossing_harness::bundle::{RUN_REPORT, SEARCH_GRAPH};
use crossing_harness::config::RunConfig;
use crossing_harness::runner::run_puzzle;
use crossing_search::contract::NoopObserver;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .map_or(42, |s| s.parse().expect("seed must be a u64"));

    let output = run_puzzle(&RunConfig::seeded(seed), &mut NoopObserver).expect("run failed");
    let bundle = &output.bundle;

    let graph = bundle.get(SEARCH_GRAPH).expect("missing search_graph.json");
    let report: serde_json::Value = serde_json::from_slice(
        &bundle.get(RUN_REPORT).expect("missing run_report.json").content,
    )
    .expect("invalid report JSON");
    let graph_digest = output.result.graph.digest().expect("graph digest");

    println!("seed={seed}");
    println!("bundle_digest={}", bundle.digest);
    println!("search_graph_digest={}", graph.content_hash);
    println!("graph_digest={graph_digest}");
    println!("policy_digest={}", report["policy_digest"].as_str().unwrap_or(""));
    println!("outcome={}", report["outcome"].as_str().unwrap_or(""));
    println!("termination_reason={}", output.result.termination_reason().as_str());
    println!("moves={}", report["moves"]);
    println!("expansions={}", output.result.graph.metadata.total_expansions);
    println!("artifact_count={}", bundle.artifacts.len());
}
