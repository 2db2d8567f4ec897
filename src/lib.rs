//! Submit commands as background shell jobs and keep track of them
//!
//! A job's resources are turned into a submission script ([script]), written to the job's working
//! directory and launched through an [context::ExecutionContext] without waiting for it. Its
//! status is later inferred from the process table and a finish marker ([job::ShellJob]), with
//! submissions remembered in a local SQLite registry ([db]).

pub mod context;
pub mod db;
pub mod error;
pub mod job;
pub mod resources;
pub mod script;
pub mod token;

pub use error::{JobError, Result};
pub use job::{Backend, JobStatus, ShellJob};
pub use resources::{default_resources, ResourceSpec, Resources};
