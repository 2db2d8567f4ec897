use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::context::{CallOutput, ExecutionContext, ProcessHandle};

/// Execution context backed by a directory on this machine
///
/// Commands run through `sh -c`. Launched jobs are not waited on; their handles are kept and
/// reaped on later calls so finished launchers don't linger as zombies.
#[derive(Debug, Clone)]
pub struct LocalContext {
    root: PathBuf,
    launched: Arc<Mutex<Vec<Child>>>,
}

impl LocalContext {
    /// Use `root` as the working directory, creating it if needed
    pub fn new(root: impl Into<PathBuf>) -> io::Result<LocalContext> {
        let root = root.into();
        if !root.exists() {
            info!("Creating working directory {}", root.display());
            fs::create_dir_all(&root)?;
        }
        Ok(LocalContext { root, launched: Arc::new(Mutex::new(Vec::new())) })
    }

    /// Collect launched processes that have exited, returning how many are still running
    pub fn reap(&self) -> usize {
        let mut launched = self.launched.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        launched.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Launcher {} exited with {status}", child.id());
                false
            }
            Ok(None) => true,
            Err(err) => {
                warn!("Can't poll launcher {}: {err}", child.id());
                true
            }
        });
        launched.len()
    }

    fn shell(&self, cmd: &str) -> Command {
        let mut sh = Command::new("sh");
        sh.arg("-c").arg(cmd).current_dir(&self.root);
        sh
    }
}

impl ExecutionContext for LocalContext {
    fn remote_root(&self) -> &Path {
        &self.root
    }

    fn write_file(&self, name: &str, contents: &str) -> io::Result<()> {
        let path = self.root.join(name);
        info!("Writing {}", path.display());
        fs::write(path, contents)
    }

    fn file_exists(&self, name: &str) -> io::Result<bool> {
        self.root.join(name).try_exists()
    }

    fn remove_file(&self, name: &str) -> io::Result<()> {
        match fs::remove_file(self.root.join(name)) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn block_call(&self, cmd: &str) -> io::Result<CallOutput> {
        self.reap();
        debug!("Running blocking call: {cmd}");
        let output = self.shell(cmd).stdin(Stdio::null()).output()?;
        Ok(CallOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn call(&self, cmd: &str) -> io::Result<ProcessHandle> {
        self.reap();
        debug!("Launching: {cmd}");
        let child = self.shell(cmd).stdin(Stdio::null()).spawn()?;
        let pid = child.id();
        self.launched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(child);
        Ok(ProcessHandle { pid: Some(pid) })
    }
}
