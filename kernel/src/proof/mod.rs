//! Canonical serialization and domain-separated hashing.
//!
//! Depends on nothing internal. `model` uses it for fingerprints and digests.

pub mod canon;
pub mod hash;
pub mod hash_domain;
