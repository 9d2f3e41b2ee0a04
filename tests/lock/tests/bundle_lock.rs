//! Bundle verification and directory round-trip locks.

use crossing_harness::bundle::{
    verify_bundle, BundleVerifyError, POLICY_SNAPSHOT, RUN_REPORT, SEARCH_GRAPH, TRANSCRIPT,
};
use crossing_harness::bundle_dir::{read_bundle_dir, verify_bundle_dir, write_bundle_dir};
use crossing_harness::config::RunConfig;
use crossing_harness::runner::{run_puzzle, RunOutput};
use crossing_search::contract::NoopObserver;
use lock_tests::bundle_test_helpers::{rebuild_with_modified_json, rebuild_without_artifact};

fn output(seed: u64) -> RunOutput {
    run_puzzle(&RunConfig::seeded(seed), &mut NoopObserver).unwrap()
}

#[test]
fn directory_round_trip_verifies() {
    let out = output(3);
    let dir = tempfile::tempdir().unwrap();
    write_bundle_dir(&out.bundle, dir.path()).unwrap();

    let loaded = verify_bundle_dir(dir.path()).unwrap();
    assert_eq!(loaded.digest, out.bundle.digest);
    assert_eq!(loaded.artifacts, out.bundle.artifacts);

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        [
            "bundle_digest.txt",
            "bundle_digest_basis.json",
            "bundle_manifest.json",
            POLICY_SNAPSHOT,
            RUN_REPORT,
            SEARCH_GRAPH,
            TRANSCRIPT,
        ]
    );
}

#[test]
fn rewrite_is_idempotent() {
    let out = output(4);
    let dir = tempfile::tempdir().unwrap();
    write_bundle_dir(&out.bundle, dir.path()).unwrap();
    write_bundle_dir(&out.bundle, dir.path()).unwrap();
    let loaded = read_bundle_dir(dir.path()).unwrap();
    assert_eq!(loaded.manifest, out.bundle.manifest);
}

#[test]
fn graph_artifact_equals_in_memory_graph() {
    let out = output(10);
    let shipped = &out.bundle.get(SEARCH_GRAPH).unwrap().content;
    assert_eq!(shipped, &out.result.graph.to_canonical_json_bytes().unwrap());
}

#[test]
fn report_digest_must_match_graph() {
    let bundle = output(5).bundle;
    let edited = rebuild_with_modified_json(&bundle, RUN_REPORT, |report| {
        report["search_graph_digest"] = serde_json::json!("sha256:00");
    });
    assert!(matches!(
        verify_bundle(&edited),
        Err(BundleVerifyError::ReportBindingMismatch { ref field, .. }) if field == "search_graph_digest"
    ));
}

#[test]
fn report_must_declare_policy_digest() {
    let bundle = output(5).bundle;
    let edited = rebuild_with_modified_json(&bundle, RUN_REPORT, |report| {
        report
            .as_object_mut()
            .unwrap()
            .remove("policy_digest");
    });
    assert_eq!(
        verify_bundle(&edited),
        Err(BundleVerifyError::ReportFieldMissing {
            field: "policy_digest".into()
        })
    );
}

#[test]
fn graph_must_bind_the_shipped_policy() {
    let bundle = output(6).bundle;
    let edited = rebuild_with_modified_json(&bundle, POLICY_SNAPSHOT, |policy| {
        policy["seed"] = serde_json::json!(1);
    });
    // Patch the report so only the graph binding is wrong.
    let policy_hash = edited.get(POLICY_SNAPSHOT).unwrap().content_hash.clone();
    let edited = rebuild_with_modified_json(&edited, RUN_REPORT, |report| {
        report["policy_digest"] = serde_json::json!(policy_hash.as_str());
    });
    assert!(matches!(
        verify_bundle(&edited),
        Err(BundleVerifyError::GraphPolicyBindingMismatch { .. })
    ));
}

#[test]
fn missing_graph_is_rejected() {
    let bundle = output(7).bundle;
    let edited = rebuild_without_artifact(&bundle, SEARCH_GRAPH);
    assert_eq!(
        verify_bundle(&edited),
        Err(BundleVerifyError::ArtifactMissing {
            name: SEARCH_GRAPH.into()
        })
    );
}

#[test]
fn transcript_may_be_dropped() {
    let bundle = output(8).bundle;
    let edited = rebuild_without_artifact(&bundle, TRANSCRIPT);
    assert_eq!(edited.digest, bundle.digest);
    verify_bundle(&edited).unwrap();
}
