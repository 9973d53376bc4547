use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::models::DeviceFamily;
use crate::scanner::worker::JobOutcome;

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::Relaxed);
}

/// Counters shared by the workers of one run.
#[derive(Debug, Default)]
pub struct ScanStats {
    total: AtomicUsize,
    classified: AtomicUsize,
    android: AtomicUsize,
    apple: AtomicUsize,
    triage: AtomicUsize,
    missing: AtomicUsize,
    unreadable: AtomicUsize,
    failed: AtomicUsize,
    duplicates: AtomicUsize,
}

impl ScanStats {
    pub fn new(total: usize) -> Self {
        let stats = ScanStats::default();
        stats.total.store(total, Ordering::Relaxed);
        stats
    }

    pub fn record(&self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Classified(family) => self.count_family(*family),
            JobOutcome::Duplicate(family) => {
                self.count_family(*family);
                bump(&self.duplicates);
            }
            JobOutcome::Triage => bump(&self.triage),
            JobOutcome::Missing => bump(&self.missing),
            JobOutcome::Unreadable => bump(&self.unreadable),
            JobOutcome::Failed => bump(&self.failed),
        }
    }

    fn count_family(&self, family: DeviceFamily) {
        bump(&self.classified);
        match family {
            DeviceFamily::Android => bump(&self.android),
            DeviceFamily::Apple => bump(&self.apple),
            DeviceFamily::Unclassified => {}
        }
    }

    /// Snapshot of the counters. `prior_extractions` comes from discovery.
    pub fn summary(&self, prior_extractions: usize) -> ScanSummary {
        ScanSummary {
            total: self.total.load(Ordering::Relaxed),
            classified: self.classified.load(Ordering::Relaxed),
            android: self.android.load(Ordering::Relaxed),
            apple: self.apple.load(Ordering::Relaxed),
            triage: self.triage.load(Ordering::Relaxed),
            missing: self.missing.load(Ordering::Relaxed),
            unreadable: self.unreadable.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            prior_extractions,
        }
    }
}

/// Totals reported at the end of a run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Candidates submitted to the pool
    pub total: usize,
    /// Archives classified as Android or Apple, duplicates included
    pub classified: usize,
    pub android: usize,
    pub apple: usize,
    /// Archives left for manual review
    pub triage: usize,
    pub missing: usize,
    pub unreadable: usize,
    pub failed: usize,
    /// Classified archives already present in the results
    pub duplicates: usize,
    /// Logical extractions counted during discovery, never queued
    pub prior_extractions: usize,
}

impl ScanSummary {
    /// Every submitted candidate ended in exactly one outcome.
    pub fn is_complete(&self) -> bool {
        self.classified + self.triage + self.missing + self.unreadable + self.failed == self.total
    }
}
