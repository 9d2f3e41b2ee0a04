//! Helpers for mutating and rebuilding run bundles.
//!
//! Rebuilding keeps every content hash and the bundle digest consistent,
//! so a negative test trips the binding check it targets rather than a
//! plain hash mismatch.

use crossing_harness::bundle::{build_bundle, ArtifactBundleV1};
use crossing_kernel::proof::canon::canonical_json_bytes;

/// Rebuild `bundle` with the JSON artifact `name` edited by `modify`.
///
/// # Panics
///
/// Panics if `name` is missing or is not JSON. Test-only invariant.
pub fn rebuild_with_modified_json(
    bundle: &ArtifactBundleV1,
    name: &str,
    modify: impl FnOnce(&mut serde_json::Value),
) -> ArtifactBundleV1 {
    let artifact = bundle.artifacts.get(name).unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&artifact.content).unwrap();
    modify(&mut value);
    let bytes = canonical_json_bytes(&value).unwrap();
    rebuild_with(bundle, name, Some(bytes))
}

/// Rebuild `bundle` without the artifact `name`.
#[must_use]
pub fn rebuild_without_artifact(bundle: &ArtifactBundleV1, name: &str) -> ArtifactBundleV1 {
    rebuild_with(bundle, name, None)
}

fn rebuild_with(
    bundle: &ArtifactBundleV1,
    name: &str,
    replacement: Option<Vec<u8>>,
) -> ArtifactBundleV1 {
    let inputs = bundle
        .artifacts
        .values()
        .filter_map(|a| {
            if a.name != name {
                return Some((a.name.clone(), a.content.clone(), a.normative));
            }
            replacement
                .clone()
                .map(|bytes| (a.name.clone(), bytes, a.normative))
        })
        .collect();
    build_bundle(inputs).unwrap()
}
