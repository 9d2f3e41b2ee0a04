//! Crossing Harness: presentation and packaging around the search.
//!
//! The harness renders the console transcript, paces interactive runs and
//! packages each run as a self-contained artifact bundle. It implements no
//! search logic; everything it shows comes through
//! [`crossing_search::contract::SearchObserverV1`] or the finished
//! [`crossing_search::search::SearchResult`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod bundle_dir;
pub mod config;
pub mod pacing;
pub mod render;
pub mod runner;
