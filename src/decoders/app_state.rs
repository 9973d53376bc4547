use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use rusqlite::{Connection, OpenFlags};

use crate::constants::APPLICATION_STATE_QUERY;
use crate::decoders::DecodeError;

/// Read application identifiers from an `applicationState.db` image.
///
/// SQLite only opens stores addressable on disk, so the bytes are written to
/// a private scratch directory first. FrontBoard stores are usually in WAL
/// mode and SQLite creates `-wal`/`-shm` files beside the copy, so the whole
/// directory is removed when this function returns, on success and on every
/// error path.
pub fn read_application_identifiers(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    read_application_identifiers_in(bytes, &std::env::temp_dir())
}

/// Same as [`read_application_identifiers`], materializing under `scratch_dir`.
pub fn read_application_identifiers_in(bytes: &[u8], scratch_dir: &Path) -> Result<Vec<String>, DecodeError> {
    let workspace = tempfile::Builder::new().prefix("sqlite-").tempdir_in(scratch_dir)?;
    let store_path = workspace.path().join("applicationState.db");

    let mut store = File::create(&store_path)?;
    store.write_all(bytes)?;
    store.sync_all()?;
    drop(store);
    debug!("Materialized application state store at {}", store_path.display());

    // The connection is closed before `workspace` is dropped.
    let identifiers = query_identifiers(&store_path)?;
    Ok(identifiers)
}

fn query_identifiers(store_path: &Path) -> Result<Vec<String>, DecodeError> {
    let conn = Connection::open_with_flags(
        store_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let mut stmt = conn.prepare(APPLICATION_STATE_QUERY)?;
    let rows = stmt.query_map([], |row| row.get::<_, Option<String>>(0))?;

    let mut identifiers = Vec::new();
    for row in rows {
        if let Some(identifier) = row? {
            identifiers.push(identifier);
        }
    }
    Ok(identifiers)
}
