//! Cross-process determinism: the `search_fixture` binary prints the same
//! digests whatever the working directory or environment.

use std::path::Path;
use std::process::Command;

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_search_fixture")
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin} in {work_dir}: {e}"));
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[], &[]);

    for key in [
        "bundle_digest=sha256:",
        "search_graph_digest=sha256:",
        "graph_digest=sha256:",
        "policy_digest=sha256:",
        "outcome=found",
        "termination_reason=goal_reached",
        "artifact_count=4",
        "seed=42",
    ] {
        assert!(baseline.contains(key), "baseline missing {key}:\n{baseline}");
    }

    let alt_cwd = std::env::temp_dir();
    let alt_cwd = alt_cwd.to_string_lossy();
    assert_eq!(baseline, run_variant(&alt_cwd, &[], &[]), "cwd changed output");
    assert_eq!(
        baseline,
        run_variant(&root, &[], &[("LC_ALL", "C"), ("LANG", "C")]),
        "locale changed output"
    );
    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[],
            &[
                ("CROSSING_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("RUST_LOG", "trace"),
            ],
        ),
        "spurious env vars changed output"
    );
}

#[test]
fn crossproc_seed_argument_is_honoured() {
    let root = workspace_root();
    let a = run_variant(&root, &["7"], &[]);
    assert!(a.contains("seed=7"));
    assert_eq!(a, run_variant(&root, &["7"], &[]));
}
