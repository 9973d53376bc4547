//! Small helpers shared across the pipeline.
//!
//! - **Hashing**: SHA-256 path fingerprints used as record identifiers
//! - **Timestamps**: extraction dates taken from archive file metadata
//! - **Summary**: the end-of-run report
//!
//! ```no_run
//! use mobile_triage::utils::hash::fingerprint_path;
//! use mobile_triage::utils::timestamp::creation_date;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let path = "/evidence/case-12/phone.zip";
//! println!("{} -> {}", path, fingerprint_path(path));
//! println!("acquired {}", creation_date(Path::new(path))?);
//! # Ok(())
//! # }
//! ```

/// Run summary generation
pub mod summary;

/// Path fingerprinting
pub mod hash;

/// File creation dates
pub mod timestamp;
