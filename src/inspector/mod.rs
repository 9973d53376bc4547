//! Per-archive artifact discovery.
//!
//! An archive's entries are matched against an ordered table of artifact
//! patterns. The first matching pattern's handler decodes the entry into the
//! archive's [`ExtractedRecord`](crate::models::ExtractedRecord); every entry
//! also feeds the archive's [`DirectorySignature`].

pub mod archive;
pub mod handlers;
pub mod patterns;
pub mod signature;

pub use archive::{normalize_entry_name, ArchiveInspector, Inspection};
pub use patterns::{match_artifact, ArtifactHandler, ArtifactKind, ArtifactPattern, ARTIFACT_PATTERNS};
pub use signature::DirectorySignature;
