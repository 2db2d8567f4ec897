#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use shellbatch::context::{CallOutput, ExecutionContext, ProcessHandle};

/// An execution context that runs nothing:
/// - records written files and issued commands
/// - answers blocking calls with a scripted process listing
/// - can be told to fail writes, launches or process listings
pub struct FakeContext {
    root: PathBuf,
    files: Mutex<HashMap<String, String>>,
    existing: Mutex<HashSet<String>>,
    blocking: Mutex<Vec<String>>,
    launched: Mutex<Vec<String>>,
    listing: Mutex<Vec<String>>,
    pub fail_write: bool,
    pub fail_call: bool,
    pub fail_listing: bool,
}

impl FakeContext {
    pub fn new(root: &str) -> Self {
        FakeContext {
            root: PathBuf::from(root),
            files: Mutex::new(HashMap::new()),
            existing: Mutex::new(HashSet::new()),
            blocking: Mutex::new(Vec::new()),
            launched: Mutex::new(Vec::new()),
            listing: Mutex::new(Vec::new()),
            fail_write: false,
            fail_call: false,
            fail_listing: false,
        }
    }

    /// Lines returned by the next process listings
    pub fn set_listing(&self, lines: &[&str]) {
        *self.listing.lock().unwrap() = lines.iter().map(|l| l.to_string()).collect();
    }

    /// Pretend `name` exists in the root, without recording it as written
    pub fn touch(&self, name: &str) {
        self.existing.lock().unwrap().insert(name.to_string());
    }

    pub fn file(&self, name: &str) -> Option<String> {
        self.files.lock().unwrap().get(name).cloned()
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }

    pub fn blocking_calls(&self) -> Vec<String> {
        self.blocking.lock().unwrap().clone()
    }
}

impl ExecutionContext for FakeContext {
    fn remote_root(&self) -> &Path {
        &self.root
    }

    fn write_file(&self, name: &str, contents: &str) -> io::Result<()> {
        if self.fail_write {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"));
        }
        self.files.lock().unwrap().insert(name.to_string(), contents.to_string());
        self.existing.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    fn file_exists(&self, name: &str) -> io::Result<bool> {
        Ok(self.existing.lock().unwrap().contains(name))
    }

    fn remove_file(&self, name: &str) -> io::Result<()> {
        self.files.lock().unwrap().remove(name);
        self.existing.lock().unwrap().remove(name);
        Ok(())
    }

    fn block_call(&self, cmd: &str) -> io::Result<CallOutput> {
        self.blocking.lock().unwrap().push(cmd.to_string());
        if self.fail_listing {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        let mut stdout = self.listing.lock().unwrap().join("\n");
        stdout.push('\n');
        Ok(CallOutput { code: Some(0), stdout: stdout.into_bytes(), stderr: Vec::new() })
    }

    fn call(&self, cmd: &str) -> io::Result<ProcessHandle> {
        if self.fail_call {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "channel closed"));
        }
        self.launched.lock().unwrap().push(cmd.to_string());
        Ok(ProcessHandle { pid: Some(4242) })
    }
}
