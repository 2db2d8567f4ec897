use std::path::Path;

use chrono::Utc;
use log::info;

use crate::db::JobRegistry;
use crate::job::JobStatus;

impl JobRegistry {
    /// Remember that `token` was launched; a resubmission replaces the earlier row
    pub fn record_submission(&self, token: &str, remote_root: &Path, script_name: &str) -> rusqlite::Result<()> {
        let now = Utc::now().to_rfc3339();
        let root = remote_root.display().to_string();
        let status = JobStatus::Running.to_string();
        info!("Recording submission of {token} in {root}");

        self.connection().execute(
            "INSERT OR REPLACE INTO job (token, remote_root, script_name, status, submitted_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            (token, &root, script_name, &status, &now),
        )?;
        Ok(())
    }

    /// Store the last observed status of `token`
    ///
    /// Returns false when the job was never recorded as submitted.
    pub fn update_status(&self, token: &str, status: JobStatus) -> rusqlite::Result<bool> {
        let now = Utc::now().to_rfc3339();
        let col = status.to_string();
        info!("Updating {token} with status {col}");

        let changed = self.connection().execute(
            "UPDATE job SET status = ?1, updated_at = ?2 WHERE token = ?3",
            (&col, &now, token),
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_then_status_update() {
        let registry = JobRegistry::open_in_memory().unwrap();
        registry.record_submission("tok", Path::new("/scratch/run"), "tok.sub").unwrap();
        assert!(registry.update_status("tok", JobStatus::Finished).unwrap());

        let record = registry.load("tok").unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Finished);
        assert_eq!(record.script_name, "tok.sub");
        assert_eq!(record.remote_root, Path::new("/scratch/run"));
    }

    #[test]
    fn updating_an_unknown_job_changes_nothing() {
        let registry = JobRegistry::open_in_memory().unwrap();
        assert!(!registry.update_status("ghost", JobStatus::Terminated).unwrap());
        assert!(registry.load("ghost").unwrap().is_none());
    }

    #[test]
    fn resubmission_resets_status() {
        let registry = JobRegistry::open_in_memory().unwrap();
        registry.record_submission("tok", Path::new("/a"), "tok.sub").unwrap();
        registry.update_status("tok", JobStatus::Terminated).unwrap();
        registry.record_submission("tok", Path::new("/b"), "tok.sub").unwrap();

        let record = registry.load("tok").unwrap().unwrap();
        assert_eq!(record.status, JobStatus::Running);
        assert_eq!(record.remote_root, Path::new("/b"));
        assert_eq!(registry.load_all().unwrap().len(), 1);
    }
}
