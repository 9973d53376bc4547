//! Durable JSON collection of extraction records.
//!
//! The collection is a single JSON array rewritten in full on every append.
//! Appends are serialized by one lock so concurrent workers never interleave
//! their read-modify-write sequences.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use log::debug;
use tempfile::NamedTempFile;

use crate::models::ExtractedRecord;

/// Result of [`ResultStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// A record with the same hash is already stored
    Duplicate,
}

#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ResultStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ResultStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record`, rewriting the collection on disk.
    ///
    /// Returns once the new collection has been synced and moved into place.
    pub fn append(&self, record: ExtractedRecord) -> Result<AppendOutcome> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("Result store lock poisoned"))?;

        let mut records = read_collection(&self.path)?;
        if records.iter().any(|existing| existing.hash == record.hash) {
            debug!("Record for {} already stored", record.logical_path);
            return Ok(AppendOutcome::Duplicate);
        }

        records.push(record);
        write_collection(&self.path, &records)?;
        Ok(AppendOutcome::Appended)
    }

    /// Current contents of the collection.
    pub fn load(&self) -> Result<Vec<ExtractedRecord>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("Result store lock poisoned"))?;
        read_collection(&self.path)
    }
}

/// A missing or blank file is an empty collection. Anything else must parse.
fn read_collection(path: &Path) -> Result<Vec<ExtractedRecord>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read results from {}", path.display()))
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse existing results in {}", path.display()))
}

fn write_collection(path: &Path, records: &[ExtractedRecord]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records).context("Failed to serialize results")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary results file in {}", dir.display()))?;
    staged.write_all(&json).context("Failed to write results")?;
    staged.as_file().sync_all().context("Failed to sync results")?;
    staged
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    debug!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}
