use std::sync::Arc;

use log::{debug, info, warn};

use crate::context::ExecutionContext;
use crate::db::JobRegistry;
use crate::error::{JobError, Result};
use crate::job::backend::Backend;
use crate::job::status::JobStatus;
use crate::resources::{ResourceSpec, Resources};
use crate::script::{self, compose_script, shell_quote};
use crate::token::TokenSource;

/// Suffix of the submission script; `<token>.sub` is also what liveness checks look for
pub const SCRIPT_SUFFIX: &str = ".sub";
/// Suffix of the file a successful job leaves behind
pub const FINISH_TAG_SUFFIX: &str = "_tag_finished";

/// A job run by a plain shell, with no job manager in between
///
/// Status is inferred: a process whose command line mentions `<token>.sub` means the job is
/// running, a `<token>_tag_finished` file means it exited 0, anything else means it is gone.
/// Without a registry a job that was never submitted also looks gone.
pub struct ShellJob {
    context: Arc<dyn ExecutionContext>,
    token: String,
    registry: Option<JobRegistry>,
    finish_marker: bool,
}

impl ShellJob {
    /// A new job named by the next token from `tokens`
    pub fn new(context: Arc<dyn ExecutionContext>, tokens: &dyn TokenSource) -> ShellJob {
        ShellJob::with_token(context, tokens.next_token())
    }

    /// Rebuild a job whose token is already known, e.g. to poll an earlier submission
    pub fn with_token(context: Arc<dyn ExecutionContext>, token: impl Into<String>) -> ShellJob {
        ShellJob { context, token: token.into(), registry: None, finish_marker: true }
    }

    /// Record submissions and observed statuses in `registry`
    pub fn registry(mut self, registry: JobRegistry) -> ShellJob {
        self.registry = Some(registry);
        self
    }

    /// Turn the finish marker epilogue (and the check for it) on or off
    pub fn finish_marker(mut self, enabled: bool) -> ShellJob {
        self.finish_marker = enabled;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn script_name(&self) -> String {
        format!("{}{}", self.token, SCRIPT_SUFFIX)
    }

    pub fn finish_tag(&self) -> String {
        format!("{}{}", self.token, FINISH_TAG_SUFFIX)
    }

    /// Compose the script `submit` would write, without touching the execution side
    pub fn render(&self, command: &str, args: &str, resources: Option<&ResourceSpec>) -> Result<script::SubmissionScript> {
        let res = Resources::resolve(resources)?;
        let finish_tag = self.finish_tag();
        let tag = if self.finish_marker { Some(finish_tag.as_str()) } else { None };
        compose_script(command, args, &res, tag)
    }

    fn submission_error(&self, source: std::io::Error) -> JobError {
        JobError::Submission { token: self.token.clone(), source }
    }

    fn status_error(&self, source: std::io::Error) -> JobError {
        JobError::StatusQuery { token: self.token.clone(), source }
    }

    /// Look for `<token>.sub` in the remote process table
    fn check_running(&self) -> Result<bool> {
        let output = self
            .context
            .block_call(&format!("ps aux | grep {}", shell_quote(&self.token)))
            .map_err(|err| self.status_error(err))?;

        let needle = self.script_name();
        let lines = output.stdout_lines();
        debug!("Process listing for {}: {} lines", self.token, lines.len());
        Ok(lines.iter().any(|line| line.contains(&needle)))
    }

    fn check_finish_tag(&self) -> Result<bool> {
        self.context
            .file_exists(&self.finish_tag())
            .map_err(|err| self.status_error(err))
    }

    /// Status to report once the job is neither running nor finished
    fn gone_status(&self) -> Result<JobStatus> {
        match &self.registry {
            Some(registry) if !registry.is_submitted(&self.token)? => {
                warn!("Job {} was never submitted", self.token);
                Ok(JobStatus::Unsubmitted)
            }
            _ => Ok(JobStatus::Terminated),
        }
    }
}

impl Backend for ShellJob {
    fn compose_header(&self, res: &Resources) -> String {
        script::compose_header(res)
    }

    fn compose_command_line(&self, command: &str, args: &str, res: &Resources) -> String {
        script::compose_command_line(command, args, res)
    }

    /// A stale finish marker from an earlier run of the same token is removed first, and the
    /// submission is recorded before launching. A registry error therefore means nothing was
    /// launched; a launch error leaves a row that the next status check reports as terminated.
    fn submit(&self, command: &str, args: &str, resources: Option<&ResourceSpec>) -> Result<()> {
        let script = self.render(command, args, resources)?;
        let script_name = self.script_name();
        let root = self.context.remote_root();

        if self.finish_marker {
            self.context
                .remove_file(&self.finish_tag())
                .map_err(|err| self.submission_error(err))?;
        }

        info!("Writing submission script {} to {}", script_name, root.display());
        self.context
            .write_file(&script_name, script.as_str())
            .map_err(|err| self.submission_error(err))?;

        if let Some(registry) = &self.registry {
            registry.record_submission(&self.token, root, &script_name)?;
        }

        let launch = format!(
            "cd {} && exec bash {}",
            shell_quote(&root.display().to_string()),
            shell_quote(&script_name)
        );
        let handle = self
            .context
            .call(&launch)
            .map_err(|err| self.submission_error(err))?;
        info!("Launched job {} (pid {:?})", self.token, handle.pid);
        Ok(())
    }

    /// Running is checked before the finish marker: a job can still be writing its marker while
    /// its process is on the way out, and checking liveness first keeps that window small.
    fn check_status(&self) -> Result<JobStatus> {
        let status = if self.check_running()? {
            JobStatus::Running
        } else if self.finish_marker && self.check_finish_tag()? {
            JobStatus::Finished
        } else {
            self.gone_status()?
        };
        info!("Job {} is {}", self.token, status);

        if let Some(registry) = &self.registry {
            if status != JobStatus::Unsubmitted {
                registry.update_status(&self.token, status)?;
            }
        }
        Ok(status)
    }
}
