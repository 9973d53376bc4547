//! # mobile-triage
//!
//! Concurrent triage of mobile forensic acquisitions stored as zip archives.
//!
//! ## Overview
//!
//! Forensic labs accumulate thousands of device extractions scattered across
//! shared storage. mobile-triage walks a tree, opens every candidate zip,
//! looks for a fixed set of well-known artifacts (Android `build.prop` and
//! `packages.xml`, iOS `LastBuildInfo.plist`, `applicationState.db` and the
//! activation record) and classifies each archive as Android or Apple from its
//! top-level directory layout. Identified archives are accumulated in a single
//! JSON results file; archives that cannot be classified are logged for manual
//! triage.
//!
//! ## Features
//!
//! - **Parallel inspection**: a fixed worker pool with one worker per CPU by default
//! - **Failure isolation**: corrupt archives and malformed artifacts never stop a run
//! - **Binary XML support**: `packages.xml` in Android's ABX encoding as well as plain XML
//! - **Path cache**: discovered archive paths are memoized in SQLite between runs
//! - **Duplicate suppression**: re-running over the same tree adds nothing twice
//!
//! ## Usage
//!
//! ```no_run
//! use mobile_triage::discovery::{discover, DiscoveryRules};
//! use mobile_triage::scanner::Scanner;
//! use mobile_triage::store::ResultStore;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let rules = DiscoveryRules::new(&["takeout"], &["logical"]);
//! let found = discover(Path::new("/mnt/evidence"), &rules);
//!
//! let store = ResultStore::new("results.json");
//! let summary = Scanner::new(&store)
//!     .with_prior_extractions(found.prior_extractions)
//!     .run(found.candidates, num_cpus::get())?;
//!
//! println!("{} classified, {} for manual triage", summary.classified, summary.triage);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: YAML configuration
//! - [`discovery`]: Filesystem walk producing candidate archives
//! - [`cache`]: SQLite path cache
//! - [`decoders`]: Artifact format decoders
//! - [`inspector`]: Per-archive artifact dispatch and directory signatures
//! - [`classifier`]: Device-family classification
//! - [`store`]: Durable JSON results collection
//! - [`scanner`]: Worker pool
//! - [`models`]: Core data models
//! - [`utils`]: Hashing, timestamps and run summaries
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models and structures used throughout the application
pub mod models;

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Candidate archive discovery
pub mod discovery;

/// Memo of discovered archive paths
pub mod cache;

/// Decoders for Android and iOS artifacts
pub mod decoders;

/// Archive inspection
pub mod inspector;

/// Device-family classification
pub mod classifier;

/// Results collection
pub mod store;

/// Parallel archive processing
pub mod scanner;

/// Utility functions for hashing, timestamps and reporting
pub mod utils;

/// Test utilities and helpers
#[cfg(test)]
pub mod test_utils;
