use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::debug;

/// Format used for `date_extraction` in the results collection.
pub const EXTRACTION_DATE_FORMAT: &str = "%d.%m.%Y";

/// Creation date of the file at `path`, formatted as `dd.mm.yyyy` local time.
///
/// Filesystems that do not record a birth time fall back to the
/// modification time. Failing to stat the file at all is an error.
pub fn creation_date(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path)
        .context(format!("Failed to get metadata for {}", path.display()))?;

    let time = match metadata.created() {
        Ok(created) => created,
        Err(e) => {
            debug!("No creation time for {} ({}), using modification time", path.display(), e);
            metadata.modified()
                .context(format!("Failed to read timestamps for {}", path.display()))?
        }
    };

    Ok(format_extraction_date(time))
}

pub fn format_extraction_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(EXTRACTION_DATE_FORMAT).to_string()
}
