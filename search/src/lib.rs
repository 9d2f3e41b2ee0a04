//! Crossing Search: randomized-insertion state-space search with an
//! auditable graph artifact.
//!
//! Depends only on `crossing_kernel`. Display, pacing and bundling live in
//! `crossing_harness` and attach through [`contract::SearchObserverV1`].
//!
//! # Crate dependency graph
//!
//! ```text
//! crossing_kernel  ←  crossing_search  ←  crossing_harness
//! (model, rules)      (frontier, driver)   (transcript, bundles, CLI)
//! ```
//!
//! # Key types
//!
//! - [`search::Search`] -- one invocation: seeded RNG, frontier, visited set
//! - [`frontier::Frontier`] -- queue with arbitrary-position insertion
//! - [`graph::SearchGraphV1`] -- expansion-event audit log
//! - [`policy::SearchPolicyV1`] -- seed, insertion policy and budget
//! - [`search::SolutionPath`] -- the path the search took to the goal

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod visited;
