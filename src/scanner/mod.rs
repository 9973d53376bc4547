//! Worker pool that inspects candidate archives in parallel.
//!
//! One dispatcher thread feeds an unbounded job channel and closes it once
//! every candidate has been submitted. A fixed number of workers drain the
//! channel; [`Scanner::run`] returns only after all of them have finished.
//! Per-archive failures are recorded as [`JobOutcome`]s and never stop the pool.

use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use crossbeam::channel::unbounded;
use log::{debug, info};

use crate::inspector::ArchiveInspector;
use crate::store::ResultStore;

pub mod stats;
pub mod worker;

pub use stats::{ScanStats, ScanSummary};
pub use worker::{process_archive, JobOutcome};

pub struct Scanner<'a> {
    inspector: ArchiveInspector<'a>,
    store: &'a ResultStore,
    prior_extractions: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(store: &'a ResultStore) -> Self {
        Scanner {
            inspector: ArchiveInspector::default(),
            store,
            prior_extractions: 0,
        }
    }

    /// Seed the summary with logical extractions counted during discovery.
    pub fn with_prior_extractions(mut self, count: usize) -> Self {
        self.prior_extractions = count;
        self
    }

    /// Process every candidate with `concurrency` workers (at least one).
    pub fn run(&self, candidates: Vec<String>, concurrency: usize) -> Result<ScanSummary> {
        let start = Instant::now();
        let worker_count = concurrency.max(1);
        let stats = ScanStats::new(candidates.len());
        info!(
            "Processing {} zip file(s) with {} worker(s)",
            candidates.len(),
            worker_count
        );

        let (sender, receiver) = unbounded::<String>();

        crossbeam::thread::scope(|scope| -> Result<()> {
            scope
                .builder()
                .name("scanner-dispatch".to_string())
                .spawn(move |_| {
                    for path in candidates {
                        if sender.send(path).is_err() {
                            break;
                        }
                    }
                    debug!("All candidates dispatched");
                })
                .context("Failed to spawn dispatcher thread")?;

            for i in 0..worker_count {
                let jobs = receiver.clone();
                let inspector = self.inspector;
                let store = self.store;
                let stats = &stats;
                scope
                    .builder()
                    .name(format!("scanner-{}", i))
                    .spawn(move |_| worker::worker_loop(jobs, inspector, store, stats))
                    .with_context(|| format!("Failed to spawn scanner worker {}", i))?;
            }
            drop(receiver);
            Ok(())
        })
        .map_err(|_| anyhow!("A scanner thread panicked"))??;

        let summary = stats.summary(self.prior_extractions);
        info!(
            "Scan finished in {:.2?}: {} total, {} classified ({} Android, {} Apple), {} triage, {} missing, {} unreadable, {} failed, {} duplicate(s), {} prior extraction(s)",
            start.elapsed(),
            summary.total,
            summary.classified,
            summary.android,
            summary.apple,
            summary.triage,
            summary.missing,
            summary.unreadable,
            summary.failed,
            summary.duplicates,
            summary.prior_extractions
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{android_fixture, write_zip, ZipFixture};
    use tempfile::TempDir;

    #[test]
    fn test_empty_run() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().join("results.json"));
        let summary = Scanner::new(&store).with_prior_extractions(2).run(Vec::new(), 4).unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.prior_extractions, 2);
        assert!(summary.is_complete());
    }

    #[test]
    fn test_mixed_candidates() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().join("results.json"));

        let android = write_zip(dir.path(), "a.zip", &android_fixture("Acme", "X1"));
        let triage = write_zip(dir.path(), "t.zip", &ZipFixture::new().file("unknown/foo.txt", "x"));
        let corrupt = dir.path().join("c.zip");
        std::fs::write(&corrupt, b"not a zip").unwrap();
        let missing = dir.path().join("m.zip");

        let candidates = [android, triage, corrupt, missing]
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let summary = Scanner::new(&store).run(candidates, 3).unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.classified, 1);
        assert_eq!(summary.android, 1);
        assert_eq!(summary.triage, 1);
        assert_eq!(summary.unreadable, 1);
        assert_eq!(summary.missing, 1);
        assert!(summary.is_complete());
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_zero_concurrency_still_runs() {
        let dir = TempDir::new().unwrap();
        let store = ResultStore::new(dir.path().join("results.json"));
        let android = write_zip(dir.path(), "a.zip", &android_fixture("Acme", "X1"));

        let summary = Scanner::new(&store)
            .run(vec![android.to_string_lossy().into_owned()], 0)
            .unwrap();
        assert_eq!(summary.classified, 1);
    }
}
