//! SQLite-backed memo of discovered archive paths.
//!
//! Saves repeating the filesystem walk on later runs. Paths are stored as-is
//! and are not re-validated on load.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::{params, Connection};

const CREATE_PATHS_TABLE: &str = "CREATE TABLE IF NOT EXISTS paths (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL
)";

#[derive(Debug)]
pub struct PathCache {
    conn: Connection,
    location: PathBuf,
}

impl PathCache {
    /// Open or create the cache database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let location = path.as_ref().to_path_buf();
        let conn = Connection::open(&location)
            .with_context(|| format!("Failed to open path cache {}", location.display()))?;
        conn.execute(CREATE_PATHS_TABLE, [])
            .with_context(|| format!("Failed to initialize path cache {}", location.display()))?;

        debug!("Opened path cache {}", location.display());
        Ok(PathCache { conn, location })
    }

    /// In-memory cache, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory path cache")?;
        conn.execute(CREATE_PATHS_TABLE, [])
            .context("Failed to initialize in-memory path cache")?;
        Ok(PathCache {
            conn,
            location: PathBuf::from(":memory:"),
        })
    }

    /// Every stored path, in no particular order. Empty when nothing was stored.
    pub fn load(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path FROM paths")
            .context("Failed to query path cache")?;
        let paths = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("Failed to query path cache")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read path cache row")?;

        debug!("Loaded {} cached path(s)", paths.len());
        Ok(paths)
    }

    /// Replace the stored set with `paths` in a single transaction.
    pub fn store<S: AsRef<str>>(&mut self, paths: &[S]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("Failed to start path cache transaction")?;
        tx.execute("DELETE FROM paths", [])
            .context("Failed to clear path cache")?;
        {
            let mut insert = tx
                .prepare("INSERT INTO paths (path) VALUES (?1)")
                .context("Failed to prepare path cache insert")?;
            for path in paths {
                insert
                    .execute(params![path.as_ref()])
                    .with_context(|| format!("Failed to cache path {}", path.as_ref()))?;
            }
        }
        tx.commit().context("Failed to commit path cache")?;

        info!("Cached {} path(s) in {}", paths.len(), self.location.display());
        Ok(())
    }
}
