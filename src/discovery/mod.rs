//! Filesystem walk producing candidate archive paths.

use std::path::Path;

use log::{debug, info};
use walkdir::WalkDir;

use crate::constants::ARCHIVE_EXTENSION;

/// Keyword filters applied to lower-cased archive paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryRules {
    excluded: Vec<String>,
    extraction: Vec<String>,
}

impl DiscoveryRules {
    pub fn new<S: AsRef<str>>(excluded: &[S], extraction: &[S]) -> Self {
        let lower = |keywords: &[S]| -> Vec<String> {
            keywords
                .iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        DiscoveryRules {
            excluded: lower(excluded),
            extraction: lower(extraction),
        }
    }

    pub fn classify(&self, path: &str) -> PathDisposition {
        let lower = path.to_lowercase();
        if self.excluded.iter().any(|k| lower.contains(k.as_str())) {
            PathDisposition::Excluded
        } else if self.extraction.iter().any(|k| lower.contains(k.as_str())) {
            PathDisposition::PriorExtraction
        } else {
            PathDisposition::Candidate
        }
    }
}

/// What discovery does with one archive path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDisposition {
    Candidate,
    /// Cloud export or third-party tool output
    Excluded,
    /// Already-processed logical extraction
    PriorExtraction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub candidates: Vec<String>,
    /// Every `.zip` seen, whatever its disposition
    pub zip_files_seen: usize,
    pub prior_extractions: usize,
}

/// Walk `root` and sort every `.zip` file into candidates, exclusions and
/// prior extractions. Unreadable entries are skipped.
pub fn discover(root: &Path, rules: &DiscoveryRules) -> Discovery {
    info!("Searching for zip files under {}", root.display());
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root).follow_links(false);
    for entry in walker.into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() || !has_archive_extension(entry.file_name()) {
            continue;
        }

        discovery.zip_files_seen += 1;
        let path = entry.path().to_string_lossy().into_owned();
        match rules.classify(&path) {
            PathDisposition::Candidate => discovery.candidates.push(path),
            PathDisposition::PriorExtraction => discovery.prior_extractions += 1,
            PathDisposition::Excluded => debug!("Excluded {}", path),
        }
    }

    info!(
        "Found {} zip file(s): {} candidate(s), {} prior extraction(s)",
        discovery.zip_files_seen,
        discovery.candidates.len(),
        discovery.prior_extractions
    );
    discovery
}

fn has_archive_extension(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().to_lowercase().ends_with(ARCHIVE_EXTENSION)
}
