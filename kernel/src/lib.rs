//! Crossing Kernel: the river-crossing domain and its rules.
//!
//! # API Surface
//!
//! - [`model::configuration::Configuration`] -- immutable puzzle state
//! - [`model::operator::OperatorCatalog`] -- ordered boat loadings
//! - [`model::puzzle::PuzzleV1`] -- validated puzzle instance
//! - [`rules::validity::valid`] -- the safety predicate
//! - [`rules::transition::transition`] -- operator application + verdict
//!
//! # Module Dependency Direction
//!
//! `proof` ← `model` ← `rules`
//!
//! One-way only. `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod proof;
pub mod rules;
