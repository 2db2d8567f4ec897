use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a job is doing, as far as the backend can tell
///
/// Jobs move `Unsubmitted -> Running -> Finished | Terminated`. Transitions happen on the
/// execution side; a backend only classifies what it observes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Unsubmitted,
    Running,
    Finished,
    Terminated,
}

impl JobStatus {
    /// Finished and terminated jobs won't change again
    pub fn is_final(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Terminated)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Unsubmitted => write!(f, "unsubmitted"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Finished => write!(f, "finished"),
            JobStatus::Terminated => write!(f, "terminated"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unsubmitted" => Ok(JobStatus::Unsubmitted),
            "running" => Ok(JobStatus::Running),
            "finished" => Ok(JobStatus::Finished),
            "terminated" => Ok(JobStatus::Terminated),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        for status in [
            JobStatus::Unsubmitted,
            JobStatus::Running,
            JobStatus::Finished,
            JobStatus::Terminated,
        ] {
            assert_eq!(status.to_string().parse::<JobStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("pending".parse::<JobStatus>().is_err());
    }

    #[test]
    fn only_finished_and_terminated_are_final() {
        assert!(!JobStatus::Unsubmitted.is_final());
        assert!(!JobStatus::Running.is_final());
        assert!(JobStatus::Finished.is_final());
        assert!(JobStatus::Terminated.is_final());
    }
}
