//! Shared helpers for the lock test suite.

#![forbid(unsafe_code)]

pub mod bundle_test_helpers;
pub mod reference;
