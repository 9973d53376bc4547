use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crossbeam::channel::Receiver;
use log::{debug, error, info, warn};

use crate::classifier::{backfill_manufacturer, classify};
use crate::inspector::ArchiveInspector;
use crate::models::DeviceFamily;
use crate::scanner::stats::ScanStats;
use crate::store::{AppendOutcome, ResultStore};
use crate::utils::timestamp::creation_date;

/// How one candidate archive ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Classified and appended to the results
    Classified(DeviceFamily),
    /// Classified, but already present in the results
    Duplicate(DeviceFamily),
    /// Empty or unrecognized directory signature
    Triage,
    /// Gone from disk since discovery
    Missing,
    /// Not openable as a zip archive
    Unreadable,
    /// Timestamp, store or unexpected failure
    Failed,
}

/// Drain `jobs` until the channel is closed and empty.
pub(crate) fn worker_loop(
    jobs: Receiver<String>,
    inspector: ArchiveInspector<'_>,
    store: &ResultStore,
    stats: &ScanStats,
) {
    for path in jobs.iter() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| process_archive(&path, &inspector, store)))
            .unwrap_or_else(|_| {
                error!("Processing {} panicked", path);
                JobOutcome::Failed
            });
        stats.record(&outcome);
    }
}

/// Inspect, classify and store one archive.
pub fn process_archive(path: &str, inspector: &ArchiveInspector<'_>, store: &ResultStore) -> JobOutcome {
    let archive = Path::new(path);
    if !archive.exists() {
        info!("Archive no longer exists: {}", path);
        return JobOutcome::Missing;
    }

    debug!("Processing {}", path);
    let inspection = match inspector.inspect(archive) {
        Ok(inspection) => inspection,
        Err(e) => {
            warn!("Skipping {}: {:#}", path, e);
            return JobOutcome::Unreadable;
        }
    };

    let family = classify(&inspection.signature);
    if !family.is_known() {
        warn!("Manual triage needed for {} (directories: {})", path, inspection.signature);
        return JobOutcome::Triage;
    }

    let mut record = inspection.record;
    backfill_manufacturer(&mut record, family);
    record.date_extraction = match creation_date(archive) {
        Ok(date) => date,
        Err(e) => {
            error!("Abandoning {}: {:#}", path, e);
            return JobOutcome::Failed;
        }
    };

    match store.append(record) {
        Ok(AppendOutcome::Appended) => {
            info!("{} archive recorded: {}", family, path);
            JobOutcome::Classified(family)
        }
        Ok(AppendOutcome::Duplicate) => {
            info!("{} archive already recorded: {}", family, path);
            JobOutcome::Duplicate(family)
        }
        Err(e) => {
            error!("Failed to store result for {}: {:#}", path, e);
            JobOutcome::Failed
        }
    }
}
