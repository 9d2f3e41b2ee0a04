//! Bundle directory persistence.
//!
//! ```text
//! <dir>/
//!   bundle_manifest.json       canonical JSON, every artifact
//!   bundle_digest_basis.json   canonical JSON, normative hashes only
//!   bundle_digest.txt          "sha256:<hex>"
//!   policy_snapshot.json
//!   search_graph.json
//!   run_report.json
//!   transcript.txt
//! ```
//!
//! The manifest is the source of truth for what the directory holds. Reads
//! fail closed: a missing declared file, an undeclared extra file or a
//! digest that does not match its basis is an error. The directory path
//! itself is never hashed.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crossing_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::bundle::{
    verify_bundle, ArtifactBundleV1, BundleArtifact, BundleVerifyError, MANIFEST_SCHEMA,
};

const MANIFEST_FILE: &str = "bundle_manifest.json";
const DIGEST_BASIS_FILE: &str = "bundle_digest_basis.json";
const DIGEST_FILE: &str = "bundle_digest.txt";

const METADATA_FILES: [&str; 3] = [MANIFEST_FILE, DIGEST_BASIS_FILE, DIGEST_FILE];

/// Error persisting or loading a bundle directory.
#[derive(Debug)]
pub enum BundleDirError {
    Io { detail: String },
    MissingMetadata { filename: String },
    MissingArtifact { name: String },
    ExtraFile { name: String },
    ManifestParseError { detail: String },
    ManifestVersionMismatch { found: String },
    ManifestEntryInvalid { detail: String },
    DigestMismatch { stored: String, recomputed: String },
    /// Loaded cleanly but failed integrity verification.
    Verify(BundleVerifyError),
}

impl std::fmt::Display for BundleDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingMetadata { filename } => write!(f, "missing metadata file: {filename}"),
            Self::MissingArtifact { name } => write!(f, "missing artifact: {name}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ManifestParseError { detail } => write!(f, "manifest parse error: {detail}"),
            Self::ManifestVersionMismatch { found } => {
                write!(f, "manifest version mismatch: {found}")
            }
            Self::ManifestEntryInvalid { detail } => write!(f, "manifest entry invalid: {detail}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::Verify(e) => write!(f, "verification failed: {e}"),
        }
    }
}

impl std::error::Error for BundleDirError {}

impl From<BundleVerifyError> for BundleDirError {
    fn from(e: BundleVerifyError) -> Self {
        Self::Verify(e)
    }
}

fn io_error(context: &str, path: &Path, e: &std::io::Error) -> BundleDirError {
    BundleDirError::Io {
        detail: format!("{context} {}: {e}", path.display()),
    }
}

/// Write `bundle` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`BundleDirError::Io`] on any filesystem failure.
pub fn write_bundle_dir(bundle: &ArtifactBundleV1, dir: &Path) -> Result<(), BundleDirError> {
    std::fs::create_dir_all(dir).map_err(|e| io_error("create", dir, &e))?;

    for artifact in bundle.artifacts.values() {
        write_atomic(dir, &artifact.name, &artifact.content)?;
    }
    write_atomic(dir, MANIFEST_FILE, &bundle.manifest)?;
    write_atomic(dir, DIGEST_BASIS_FILE, &bundle.digest_basis)?;
    write_atomic(dir, DIGEST_FILE, bundle.digest.as_str().as_bytes())?;

    tracing::info!(dir = %dir.display(), digest = bundle.digest.as_str(), "bundle written");
    Ok(())
}

/// Load a bundle directory. The stored digest must match its basis.
///
/// Content hashes are taken from the manifest as declared; call
/// [`verify_bundle_dir`] to check them against the files.
///
/// # Errors
///
/// Returns [`BundleDirError`] on any structural problem.
pub fn read_bundle_dir(dir: &Path) -> Result<ArtifactBundleV1, BundleDirError> {
    let manifest = read_metadata(dir, MANIFEST_FILE)?;
    let digest_basis = read_metadata(dir, DIGEST_BASIS_FILE)?;
    let stored_digest = read_metadata(dir, DIGEST_FILE)?;

    let parsed: serde_json::Value = serde_json::from_slice(&manifest).map_err(|e| {
        BundleDirError::ManifestParseError {
            detail: e.to_string(),
        }
    })?;
    let version = parsed["schema_version"].as_str().unwrap_or("");
    if version != MANIFEST_SCHEMA {
        return Err(BundleDirError::ManifestVersionMismatch {
            found: version.to_string(),
        });
    }
    let entries = parsed["artifacts"]
        .as_array()
        .ok_or_else(|| BundleDirError::ManifestParseError {
            detail: "\"artifacts\" is not an array".into(),
        })?;

    let mut artifacts = BTreeMap::new();
    for entry in entries {
        let artifact = read_declared(dir, entry)?;
        artifacts.insert(artifact.name.clone(), artifact);
    }

    for name in list_files(dir)? {
        if !artifacts.contains_key(&name) && !METADATA_FILES.contains(&name.as_str()) {
            return Err(BundleDirError::ExtraFile { name });
        }
    }

    let digest = canonical_hash(HashDomain::BundleDigest, &digest_basis);
    let stored = String::from_utf8_lossy(&stored_digest).trim().to_string();
    if digest.as_str() != stored {
        return Err(BundleDirError::DigestMismatch {
            stored,
            recomputed: digest.as_str().to_string(),
        });
    }

    Ok(ArtifactBundleV1 {
        artifacts,
        manifest,
        digest_basis,
        digest,
    })
}

/// Load a bundle directory and run [`verify_bundle`] on it.
///
/// # Errors
///
/// Returns [`BundleDirError`] on a read failure or any integrity mismatch.
pub fn verify_bundle_dir(dir: &Path) -> Result<ArtifactBundleV1, BundleDirError> {
    let bundle = read_bundle_dir(dir)?;
    verify_bundle(&bundle)?;
    Ok(bundle)
}

fn read_declared(dir: &Path, entry: &serde_json::Value) -> Result<BundleArtifact, BundleDirError> {
    let invalid = |detail: String| BundleDirError::ManifestEntryInvalid { detail };

    let name = entry["name"]
        .as_str()
        .ok_or_else(|| invalid("missing \"name\"".into()))?
        .to_string();
    if name.contains(|c: char| c == '/' || c == '\\') || METADATA_FILES.contains(&name.as_str()) {
        return Err(invalid(format!("reserved or nested name: {name}")));
    }
    let hash_str = entry["content_hash"]
        .as_str()
        .ok_or_else(|| invalid(format!("missing \"content_hash\" for {name}")))?;
    let content_hash = ContentHash::parse(hash_str)
        .ok_or_else(|| invalid(format!("bad content_hash for {name}: {hash_str}")))?;
    let normative = entry["normative"]
        .as_bool()
        .ok_or_else(|| invalid(format!("missing \"normative\" for {name}")))?;

    let content = std::fs::read(dir.join(&name))
        .map_err(|_| BundleDirError::MissingArtifact { name: name.clone() })?;

    Ok(BundleArtifact {
        name,
        content,
        content_hash,
        normative,
    })
}

fn read_metadata(dir: &Path, filename: &str) -> Result<Vec<u8>, BundleDirError> {
    std::fs::read(dir.join(filename)).map_err(|_| BundleDirError::MissingMetadata {
        filename: filename.to_string(),
    })
}

/// Write through a sibling temp file, then rename into place.
fn write_atomic(dir: &Path, name: &str, content: &[u8]) -> Result<(), BundleDirError> {
    let target = dir.join(name);
    let temp = dir.join(format!(".tmp_{name}"));
    std::fs::write(&temp, content).map_err(|e| io_error("write", &temp, &e))?;
    std::fs::rename(&temp, &target).map_err(|e| io_error("rename", &target, &e))
}

/// Regular files in `dir`, skipping leftover temp files.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, BundleDirError> {
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_error("read_dir", dir, &e))? {
        let entry = entry.map_err(|e| io_error("read_dir", dir, &e))?;
        let is_file = entry
            .file_type()
            .map_err(|e| io_error("file_type", &entry.path(), &e))?
            .is_file();
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(".tmp_") {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
