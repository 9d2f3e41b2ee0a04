//! Harness runner: puzzle → search → artifact bundle.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::puzzle() → Search::for_puzzle()
//!   → run_with(caller observer + transcript capture)
//!   → canonical graph + policy snapshot → run_report.json → build_bundle()
//! ```
//!
//! The runner performs no file I/O; the CLI persists the bundle.

use crossing_kernel::model::puzzle::PuzzleV1;
use crossing_kernel::model::ModelError;
use crossing_kernel::proof::canon::canonical_json_bytes;
use crossing_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use crossing_search::contract::SearchObserverV1;
use crossing_search::error::SearchError;
use crossing_search::search::{Search, SearchOutcome, SearchResult};

use crate::bundle::{
    build_bundle, ArtifactBundleV1, BundleBuildError, POLICY_SNAPSHOT, RUN_REPORT, SEARCH_GRAPH,
    TRANSCRIPT,
};
use crate::config::RunConfig;
use crate::render::{ConsoleObserver, Tee};

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// Puzzle construction rejected the configuration.
    Model(ModelError),
    /// Search pre-flight validation failed.
    Search(SearchError),
    CanonFailed { detail: String },
    Bundle(BundleBuildError),
    TranscriptFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(e) => write!(f, "invalid puzzle: {e}"),
            Self::Search(e) => write!(f, "search rejected: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::Bundle(e) => write!(f, "bundle error: {e}"),
            Self::TranscriptFailed { detail } => write!(f, "transcript capture failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ModelError> for RunError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<BundleBuildError> for RunError {
    fn from(e: BundleBuildError) -> Self {
        Self::Bundle(e)
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub puzzle: PuzzleV1,
    pub result: SearchResult,
    pub bundle: ArtifactBundleV1,
}

/// Run one search as configured, reporting to `observer`.
///
/// The console transcript is always captured into the bundle, whatever
/// `observer` does.
///
/// # Errors
///
/// Returns [`RunError`] if the configuration is rejected or an artifact
/// cannot be serialized. A search that finds no solution is not an error.
pub fn run_puzzle(
    config: &RunConfig,
    observer: &mut dyn SearchObserverV1,
) -> Result<RunOutput, RunError> {
    let puzzle = config.puzzle()?;
    let search = Search::for_puzzle(&puzzle, &config.policy)?;

    tracing::info!(
        missionaries = puzzle.missionaries(),
        cannibals = puzzle.cannibals(),
        capacity = puzzle.capacity(),
        seed = config.policy.seed,
        insertion = config.policy.insertion.as_str(),
        "starting search"
    );

    let mut capture = ConsoleObserver::new(Vec::new());
    let result = search.run_with(&mut Tee {
        first: &mut *observer,
        second: &mut capture,
    });
    let transcript = capture
        .finish()
        .map_err(|e| RunError::TranscriptFailed {
            detail: e.to_string(),
        })?;

    let canon = |e: crossing_kernel::proof::canon::CanonError| RunError::CanonFailed {
        detail: e.to_string(),
    };
    let graph_bytes = result.graph.to_canonical_json_bytes().map_err(canon)?;
    let policy_bytes = canonical_json_bytes(&config.policy.to_json()).map_err(canon)?;

    let report = run_report(
        &puzzle,
        &result,
        &canonical_hash(HashDomain::BundleArtifact, &graph_bytes),
        &canonical_hash(HashDomain::BundleArtifact, &policy_bytes),
    );
    let report_bytes = canonical_json_bytes(&report).map_err(canon)?;

    let bundle = build_bundle(vec![
        (POLICY_SNAPSHOT.into(), policy_bytes, true),
        (SEARCH_GRAPH.into(), graph_bytes, true),
        (RUN_REPORT.into(), report_bytes, true),
        (TRANSCRIPT.into(), transcript, false),
    ])?;

    Ok(RunOutput {
        puzzle,
        result,
        bundle,
    })
}

/// Outcome summary with digest bindings to the graph and policy artifacts.
fn run_report(
    puzzle: &PuzzleV1,
    result: &SearchResult,
    graph_hash: &ContentHash,
    policy_hash: &ContentHash,
) -> serde_json::Value {
    let metadata = &result.graph.metadata;
    let mut report = serde_json::json!({
        "expansions": metadata.total_expansions,
        "outcome": "not_found",
        "policy_digest": policy_hash.as_str(),
        "puzzle": puzzle.to_json(),
        "schema_version": "run_report.v1",
        "search_graph_digest": graph_hash.as_str(),
        "seed": metadata.seed,
        "termination_reason": metadata.termination_reason.as_str(),
    });
    if let SearchOutcome::Found(path) = &result.outcome {
        report["outcome"] = serde_json::json!("found");
        report["moves"] = serde_json::json!(path.moves());
        report["path"] = path.to_json();
    }
    report
}
