use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scanner::ScanSummary;

/// Record of one triage run, written next to the results for chain of custody.
///
/// ```json
/// {
///   "run_id": "550e8400-e29b-41d4-a716-446655440000",
///   "root": "S:\\",
///   "started_at": "2024-05-01T09:12:44+02:00",
///   "finished_at": "2024-05-01T09:40:02+02:00",
///   "workers": 8,
///   "from_cache": true,
///   "results_path": "results.json",
///   "scan": { "total": 412, "classified": 377, ... }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunReport {
    pub run_id: String,
    pub root: String,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub workers: usize,
    /// Candidates came from the path cache rather than a fresh walk
    pub from_cache: bool,
    pub results_path: String,
    pub tool_version: String,
    pub scan: ScanSummary,
}

impl RunReport {
    pub fn new(
        root: &Path,
        started_at: DateTime<Local>,
        workers: usize,
        from_cache: bool,
        results_path: &Path,
        scan: ScanSummary,
    ) -> Self {
        RunReport {
            run_id: Uuid::new_v4().to_string(),
            root: root.display().to_string(),
            started_at,
            finished_at: Local::now(),
            workers,
            from_cache,
            results_path: results_path.display().to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            scan,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize run summary to JSON")
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write run summary to {}", path.display()))?;
        info!("Run summary written to {}", path.display());
        Ok(())
    }
}
