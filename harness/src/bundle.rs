//! In-memory artifact bundle: the output of a `crossing` run.
//!
//! No file I/O in this module; see [`crate::bundle_dir`] for persistence.
//!
//! # Artifacts
//!
//! | name                   | normative | content |
//! |------------------------|-----------|---------|
//! | `policy_snapshot.json` | yes       | canonical `SearchPolicyV1` snapshot |
//! | `search_graph.json`    | yes       | canonical `SearchGraphV1` |
//! | `run_report.json`      | yes       | outcome, path and artifact digests |
//! | `transcript.txt`       | no        | console transcript |
//!
//! The bundle digest is computed over the **digest basis**: a canonical
//! JSON projection of normative artifact hashes only. Editing the
//! transcript never changes the digest.

use std::collections::BTreeMap;

use crossing_kernel::proof::canon::canonical_json_bytes;
use crossing_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

pub const POLICY_SNAPSHOT: &str = "policy_snapshot.json";
pub const SEARCH_GRAPH: &str = "search_graph.json";
pub const RUN_REPORT: &str = "run_report.json";
pub const TRANSCRIPT: &str = "transcript.txt";

pub const MANIFEST_SCHEMA: &str = "bundle.v1";
const DIGEST_BASIS_SCHEMA: &str = "bundle_digest_basis.v1";

/// A single artifact in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(BundleArtifact, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the bundle digest.
    pub normative: bool,
}

/// The complete artifact bundle from a run.
#[derive(Debug, Clone)]
pub struct ArtifactBundleV1 {
    /// Artifacts by name, sorted.
    pub artifacts: BTreeMap<String, BundleArtifact>,
    /// Canonical JSON listing every artifact with its normative flag.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(BundleDigest, digest_basis)`.
    pub digest: ContentHash,
}

impl ArtifactBundleV1 {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BundleArtifact> {
        self.artifacts.get(name)
    }
}

/// Error building a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleBuildError {
    CanonError { detail: String },
    DuplicateArtifact { name: String },
}

impl std::fmt::Display for BundleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::DuplicateArtifact { name } => write!(f, "artifact listed twice: {name}"),
        }
    }
}

impl std::error::Error for BundleBuildError {}

/// Assemble a bundle from `(name, bytes, normative)` triples.
///
/// # Errors
///
/// Returns [`BundleBuildError`] on a repeated name or if canonical JSON
/// serialization fails.
pub fn build_bundle(
    inputs: Vec<(String, Vec<u8>, bool)>,
) -> Result<ArtifactBundleV1, BundleBuildError> {
    let mut artifacts = BTreeMap::new();
    for (name, content, normative) in inputs {
        if artifacts.contains_key(&name) {
            return Err(BundleBuildError::DuplicateArtifact { name });
        }
        let content_hash = canonical_hash(HashDomain::BundleArtifact, &content);
        artifacts.insert(
            name.clone(),
            BundleArtifact {
                name,
                content,
                content_hash,
                normative,
            },
        );
    }

    let manifest =
        manifest_bytes(&artifacts).map_err(|detail| BundleBuildError::CanonError { detail })?;
    let digest_basis =
        digest_basis_bytes(&artifacts).map_err(|detail| BundleBuildError::CanonError { detail })?;
    let digest = canonical_hash(HashDomain::BundleDigest, &digest_basis);
    Ok(ArtifactBundleV1 {
        artifacts,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from bundle integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleVerifyError {
    /// Stored `content_hash` differs from the hash of the stored bytes.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    ManifestMismatch,
    DigestBasisMismatch,
    DigestMismatch { expected: String, actual: String },
    /// A required artifact is absent, or present but observational.
    ArtifactMissing { name: String },
    /// A normative JSON artifact is not in canonical form.
    ArtifactNotCanonical { artifact: String },
    ReportParseError { detail: String },
    ReportFieldMissing { field: String },
    /// `run_report.json` declares a digest the named artifact does not have.
    ReportBindingMismatch {
        field: String,
        declared: String,
        recomputed: String,
    },
    /// `search_graph.json` metadata does not bind the shipped policy snapshot.
    GraphPolicyBindingMismatch { in_graph: String, recomputed: String },
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(
                f,
                "content hash mismatch for {artifact}: expected {expected}, got {actual}"
            ),
            Self::ManifestMismatch => write!(f, "manifest does not match artifacts"),
            Self::DigestBasisMismatch => write!(f, "digest basis does not match artifacts"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "bundle digest mismatch: expected {expected}, got {actual}")
            }
            Self::ArtifactMissing { name } => write!(f, "missing normative artifact: {name}"),
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "artifact is not canonical JSON: {artifact}")
            }
            Self::ReportParseError { detail } => write!(f, "run report parse error: {detail}"),
            Self::ReportFieldMissing { field } => write!(f, "run report missing field: {field}"),
            Self::ReportBindingMismatch {
                field,
                declared,
                recomputed,
            } => write!(
                f,
                "run report {field} mismatch: declared {declared}, recomputed {recomputed}"
            ),
            Self::GraphPolicyBindingMismatch {
                in_graph,
                recomputed,
            } => write!(
                f,
                "search graph binds policy {in_graph}, snapshot hashes to {recomputed}"
            ),
        }
    }
}

impl std::error::Error for BundleVerifyError {}

/// Verify bundle integrity and the run report's bindings.
///
/// Checks, in order:
/// 1. every artifact's content hash
/// 2. manifest and digest basis against a recomputation
/// 3. the bundle digest
/// 4. normative `.json` artifacts are canonical
/// 5. `run_report.json` binds `search_graph.json` and `policy_snapshot.json`
/// 6. graph metadata binds the policy snapshot under the search-policy domain
///
/// # Errors
///
/// Returns the first [`BundleVerifyError`] found.
pub fn verify_bundle(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    for artifact in bundle.artifacts.values() {
        let actual = canonical_hash(HashDomain::BundleArtifact, &artifact.content);
        if actual != artifact.content_hash {
            return Err(BundleVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: actual.as_str().to_string(),
            });
        }
    }

    if manifest_bytes(&bundle.artifacts).ok().as_deref() != Some(bundle.manifest.as_slice()) {
        return Err(BundleVerifyError::ManifestMismatch);
    }
    if digest_basis_bytes(&bundle.artifacts).ok().as_deref()
        != Some(bundle.digest_basis.as_slice())
    {
        return Err(BundleVerifyError::DigestBasisMismatch);
    }

    let digest = canonical_hash(HashDomain::BundleDigest, &bundle.digest_basis);
    if digest != bundle.digest {
        return Err(BundleVerifyError::DigestMismatch {
            expected: bundle.digest.as_str().to_string(),
            actual: digest.as_str().to_string(),
        });
    }

    for artifact in bundle.artifacts.values() {
        if artifact.normative && artifact.name.ends_with(".json") && !is_canonical(&artifact.content)
        {
            return Err(BundleVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    verify_report_bindings(bundle)?;
    verify_graph_policy_binding(bundle)
}

fn normative<'a>(
    bundle: &'a ArtifactBundleV1,
    name: &str,
) -> Result<&'a BundleArtifact, BundleVerifyError> {
    bundle
        .get(name)
        .filter(|a| a.normative)
        .ok_or_else(|| BundleVerifyError::ArtifactMissing {
            name: name.to_string(),
        })
}

fn parse_json(artifact: &BundleArtifact) -> Result<serde_json::Value, BundleVerifyError> {
    serde_json::from_slice(&artifact.content).map_err(|e| BundleVerifyError::ReportParseError {
        detail: format!("{}: {e}", artifact.name),
    })
}

fn verify_report_bindings(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    let report = parse_json(normative(bundle, RUN_REPORT)?)?;

    for (field, target) in [
        ("search_graph_digest", SEARCH_GRAPH),
        ("policy_digest", POLICY_SNAPSHOT),
    ] {
        let declared = report[field]
            .as_str()
            .ok_or_else(|| BundleVerifyError::ReportFieldMissing {
                field: field.to_string(),
            })?;
        let recomputed = normative(bundle, target)?.content_hash.as_str();
        if declared != recomputed {
            return Err(BundleVerifyError::ReportBindingMismatch {
                field: field.to_string(),
                declared: declared.to_string(),
                recomputed: recomputed.to_string(),
            });
        }
    }
    Ok(())
}

fn verify_graph_policy_binding(bundle: &ArtifactBundleV1) -> Result<(), BundleVerifyError> {
    let graph = parse_json(normative(bundle, SEARCH_GRAPH)?)?;
    let policy = normative(bundle, POLICY_SNAPSHOT)?;

    let in_graph = graph["metadata"]["search_policy_digest"]
        .as_str()
        .ok_or_else(|| BundleVerifyError::ReportFieldMissing {
            field: "metadata.search_policy_digest".into(),
        })?;
    let recomputed = canonical_hash(HashDomain::SearchPolicy, &policy.content);
    if in_graph != recomputed.as_str() {
        return Err(BundleVerifyError::GraphPolicyBindingMismatch {
            in_graph: in_graph.to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }
    Ok(())
}

fn is_canonical(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()
        .and_then(|v| canonical_json_bytes(&v).ok())
        .is_some_and(|canon| canon == bytes)
}

fn manifest_bytes(artifacts: &BTreeMap<String, BundleArtifact>) -> Result<Vec<u8>, String> {
    let listed: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();
    canonical_json_bytes(&serde_json::json!({
        "artifacts": listed,
        "schema_version": MANIFEST_SCHEMA,
    }))
    .map_err(|e| e.to_string())
}

fn digest_basis_bytes(artifacts: &BTreeMap<String, BundleArtifact>) -> Result<Vec<u8>, String> {
    let listed: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();
    canonical_json_bytes(&serde_json::json!({
        "artifacts": listed,
        "schema_version": DIGEST_BASIS_SCHEMA,
    }))
    .map_err(|e| e.to_string())
}
