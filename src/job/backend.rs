use crate::error::Result;
use crate::job::status::JobStatus;
use crate::resources::{default_resources, ResourceSpec, Resources};

/// Submit and track one job on some kind of execution backend
///
/// Each backend kind implements this on its own; shared behaviour lives in free functions such
/// as [default_resources] rather than in a common base.
pub trait Backend {
    /// Fill in this backend's defaults for the options the caller left out
    fn default_resources(&self, partial: Option<&ResourceSpec>) -> ResourceSpec {
        default_resources(partial)
    }

    /// Everything in the submission script before the command line
    fn compose_header(&self, res: &Resources) -> String;

    /// The line that runs the command
    fn compose_command_line(&self, command: &str, args: &str, res: &Resources) -> String;

    /// Write the submission script and launch it without waiting for it
    fn submit(&self, command: &str, args: &str, resources: Option<&ResourceSpec>) -> Result<()>;

    /// Observe the job's current status
    fn check_status(&self) -> Result<JobStatus>;
}
