use std::path::PathBuf;

use log::info;
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row};

use crate::db::job::JobRecord;
use crate::db::JobRegistry;
use crate::job::JobStatus;

const COLUMNS: &str = "token, remote_root, script_name, status, submitted_at, updated_at";

impl JobRegistry {
    /// Look up a single job by token
    pub fn load(&self, token: &str) -> rusqlite::Result<Option<JobRecord>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM job WHERE token = ?1"))?;
        let record = stmt.query_row([token], to_record).optional()?;
        Ok(record)
    }

    /// Every recorded job, oldest submission first
    pub fn load_all(&self) -> rusqlite::Result<Vec<JobRecord>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM job ORDER BY submitted_at, token"))?;
        let rows = stmt.query_map([], to_record)?;

        let mut records: Vec<JobRecord> = Vec::new();
        for row in rows {
            records.push(row?);
        }
        info!("Loaded {} jobs from db", records.len());
        Ok(records)
    }

    /// Whether `token` was ever submitted
    pub fn is_submitted(&self, token: &str) -> rusqlite::Result<bool> {
        Ok(self.load(token)?.is_some())
    }
}

fn to_record(row: &Row) -> rusqlite::Result<JobRecord> {
    let status: String = row.get(3)?;
    let status = status
        .parse::<JobStatus>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, err.into()))?;
    let remote_root: String = row.get(1)?;

    Ok(JobRecord {
        token: row.get(0)?,
        remote_root: PathBuf::from(remote_root),
        script_name: row.get(2)?,
        status,
        submitted_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
