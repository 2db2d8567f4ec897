//! Recording submissions and observed statuses, and reading them back
//!
//! A row is created when a job is submitted and its status column is refreshed every time the
//! job is polled.

pub mod load;
pub mod update;

use std::path::PathBuf;

use crate::job::JobStatus;

/// One submitted job as stored in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub token: String,
    pub remote_root: PathBuf,
    pub script_name: String,
    pub status: JobStatus,
    /// RFC 3339, UTC
    pub submitted_at: String,
    pub updated_at: String,
}
