//! The channel a job runs through: somewhere to write files and run commands
//!
//! The shell backend only needs a handful of primitives from the machine that runs the job, so
//! they are collected in the [ExecutionContext] trait. Transports (ssh, local, ...) implement it;
//! [LocalContext] runs everything on this machine.

/// Run jobs on the local machine inside a working directory
pub mod local;

use std::borrow::Cow;
use std::io;
use std::path::Path;

pub use local::LocalContext;

/// Output of a command that was waited on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CallOutput {
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Standard output split into lines, invalid UTF-8 replaced
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout_text().lines().map(str::to_string).collect()
    }
}

/// A command that was launched and not waited on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: Option<u32>,
}

/// Remote execution primitives consumed by job backends
///
/// Implementations bring their own timeouts; nothing here waits longer than the underlying call.
pub trait ExecutionContext: Send + Sync {
    /// Directory on the execution side where a job's files live
    fn remote_root(&self) -> &Path;

    /// Create or overwrite `name` inside [ExecutionContext::remote_root]
    fn write_file(&self, name: &str, contents: &str) -> io::Result<()>;

    /// Whether `name` exists inside [ExecutionContext::remote_root]
    fn file_exists(&self, name: &str) -> io::Result<bool>;

    /// Delete `name` inside [ExecutionContext::remote_root]; a missing file is not an error
    fn remove_file(&self, name: &str) -> io::Result<()>;

    /// Run a shell command and wait for it
    fn block_call(&self, cmd: &str) -> io::Result<CallOutput>;

    /// Run a shell command and return as soon as it was accepted
    fn call(&self, cmd: &str) -> io::Result<ProcessHandle>;
}
