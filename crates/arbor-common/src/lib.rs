//! Common utilities for the Arbor crates.
//!
//! This crate provides shared infrastructure used by the DOM and parser crates:
//! - **Warning System** - deduplicated, colored terminal output for recoverable problems

pub mod warning;
