use std::path::Path;
use std::sync::{Arc, Mutex};

use log::info;
use rusqlite::Connection;

use crate::db::JobRegistry;

static SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/db/schema.sql"));

impl JobRegistry {
    /// Open (or create) the registry database at `path`
    pub fn open(path: &Path) -> rusqlite::Result<JobRegistry> {
        if !path.exists() { info!("Creating new database {}", path.display()) }
        let conn = Connection::open(path)?;
        JobRegistry::with_schema(conn)
    }

    /// A registry that lives as long as the process, for dry runs and tests
    pub fn open_in_memory() -> rusqlite::Result<JobRegistry> {
        JobRegistry::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> rusqlite::Result<JobRegistry> {
        conn.execute_batch(SCHEMA)?;
        Ok(JobRegistry { conn: Arc::new(Mutex::new(conn)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_keeps_the_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shellbatch.db");
        JobRegistry::open(&path).unwrap();
        assert!(path.exists());
        JobRegistry::open(&path).unwrap();
    }
}
