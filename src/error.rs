use std::io;

use thiserror::Error;

/// Everything that can go wrong while composing, submitting or polling a job
#[derive(Error, Debug)]
pub enum JobError {
    /// A resource option has the wrong shape, found while composing the script
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Writing the submission script or launching it on the remote side failed
    #[error("Submission of job {token} failed: {source}")]
    Submission {
        token: String,
        #[source]
        source: io::Error,
    },

    /// Listing remote processes or looking up the finish marker failed
    #[error("Status query for job {token} failed: {source}")]
    StatusQuery {
        token: String,
        #[source]
        source: io::Error,
    },

    #[error("Job registry error: {0}")]
    Registry(#[from] rusqlite::Error),

    #[error("Template error: {0}")]
    Template(#[from] tinytemplate::error::Error),
}

pub type Result<T> = std::result::Result<T, JobError>;
