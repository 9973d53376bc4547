use std::fs::File;
use std::io::{BufReader, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use zip::ZipArchive;

use crate::inspector::patterns::{match_artifact, ArtifactKind, ArtifactPattern, ARTIFACT_PATTERNS};
use crate::inspector::signature::DirectorySignature;
use crate::models::ExtractedRecord;

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

/// What one archive yielded.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub signature: DirectorySignature,
    pub record: ExtractedRecord,
    /// Artifacts that decoded successfully, in entry order
    pub decoded: Vec<ArtifactKind>,
    /// Matched entries whose read or decode failed
    pub failed_entries: usize,
}

/// Walks a zip archive and dispatches known artifact entries to their handlers.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveInspector<'p> {
    patterns: &'p [ArtifactPattern],
}

impl Default for ArchiveInspector<'static> {
    fn default() -> Self {
        ArchiveInspector {
            patterns: &ARTIFACT_PATTERNS,
        }
    }
}

impl<'p> ArchiveInspector<'p> {
    /// Inspector over a custom pattern table, tried in slice order.
    pub fn with_patterns(patterns: &'p [ArtifactPattern]) -> Self {
        ArchiveInspector { patterns }
    }

    /// Inspect the archive at `path`.
    ///
    /// Fails only when the file cannot be opened as a zip container. Problems
    /// with individual entries are logged and leave the affected fields empty.
    pub fn inspect(&self, path: &Path) -> Result<Inspection> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open archive {}", path.display()))?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .with_context(|| format!("Not a valid zip archive: {}", path.display()))?;

        let mut inspection = Inspection {
            signature: archive.file_names().map(normalize_entry_name).collect(),
            record: ExtractedRecord::for_archive(&path.to_string_lossy()),
            decoded: Vec::new(),
            failed_entries: 0,
        };

        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping entry #{} of {}: {}", index, path.display(), e);
                    continue;
                }
            };
            if entry.is_dir() {
                continue;
            }

            let name = normalize_entry_name(entry.name());
            let Some(pattern) = match_artifact(self.patterns, &name) else {
                continue;
            };

            let mut bytes = Vec::with_capacity((entry.size() as usize).min(MAX_PREALLOCATION));
            if let Err(e) = entry.read_to_end(&mut bytes) {
                warn!("Failed to read {} '{}' in {}: {}", pattern.kind, name, path.display(), e);
                inspection.failed_entries += 1;
                continue;
            }

            if apply_pattern(pattern, &bytes, &mut inspection.record, &name, path) {
                inspection.decoded.push(pattern.kind);
            } else {
                inspection.failed_entries += 1;
            }
        }

        inspection.record.directory = inspection.signature.to_vec();
        debug!(
            "Inspected {}: signature {}, {} artifact(s) decoded, {} failed",
            path.display(),
            inspection.signature,
            inspection.decoded.len(),
            inspection.failed_entries
        );
        Ok(inspection)
    }
}

/// Run `pattern`'s handler against a staged copy of the record and keep the
/// result only when it succeeds. A panicking decoder counts as a failure.
fn apply_pattern(
    pattern: &ArtifactPattern,
    bytes: &[u8],
    record: &mut ExtractedRecord,
    entry_name: &str,
    archive: &Path,
) -> bool {
    let mut staged = record.clone();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (pattern.handler)(bytes, &mut staged)));

    match outcome {
        Ok(Ok(())) => {
            *record = staged;
            true
        }
        Ok(Err(e)) => {
            warn!("Failed to decode {} '{}' in {}: {}", pattern.kind, entry_name, archive.display(), e);
            false
        }
        Err(_) => {
            warn!("Decoder panicked on {} '{}' in {}", pattern.kind, entry_name, archive.display());
            false
        }
    }
}

/// Forward-slash form of a zip entry name.
pub fn normalize_entry_name(name: &str) -> String {
    name.replace('\\', "/")
}
