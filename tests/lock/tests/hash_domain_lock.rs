//! Hash domain governance locks.

use std::collections::BTreeSet;

use crossing_kernel::proof::hash::HashDomain;

#[test]
fn canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        6,
        "if you added a new domain, update this count"
    );
}

#[test]
fn all_unique_and_well_formed() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(seen.insert(bytes), "duplicate domain bytes: {domain}");
        assert!(bytes.starts_with(b"CROSSING::"), "{domain}");
        assert!(bytes.ends_with(b"::V1\0"), "{domain}");
    }
}

/// Only `hash_domain.rs` may spell out domain byte strings.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let dirs = [
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
    ];
    let mut violations = Vec::new();
    for dir in dirs {
        for path in walk(std::path::Path::new(dir)) {
            if path.extension().and_then(|e| e.to_str()) != Some("rs")
                || path.file_name().and_then(|n| n.to_str()) == Some("hash_domain.rs")
            {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                if line.contains("b\"CROSSING::") {
                    violations.push(format!("{}:{}", path.display(), i + 1));
                }
            }
        }
    }
    assert!(violations.is_empty(), "raw domain literals: {violations:?}");
}

fn walk(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                out.extend(walk(&path));
            } else {
                out.push(path);
            }
        }
    }
    out
}
