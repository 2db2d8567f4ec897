//! Submitted jobs are remembered in a SQLite database
//!
//! The process table alone can't tell a job that never ran from one that ran and vanished. The
//! registry records every submission so that those two cases report different statuses.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

/// Connect to a SQLite database
pub mod open;
pub mod job;

/// Shared handle to the job registry
///
/// Cloning is cheap and every clone talks to the same connection, so jobs polled from different
/// threads can share one registry.
#[derive(Clone, Debug)]
pub struct JobRegistry {
    conn: Arc<Mutex<Connection>>,
}

impl JobRegistry {
    fn connection(&self) -> MutexGuard<'_, Connection> {
        // statements are atomic in sqlite, a poisoned lock still guards a consistent connection
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
