//! Job backends: submit a command through an execution context and work out what became of it
//!
//! [Backend] is the capability every backend kind offers; [ShellJob] is the plain-shell variant,
//! which has no job manager to ask and infers status from the process table.

pub mod backend;
pub mod shell;
pub mod status;

pub use backend::Backend;
pub use shell::ShellJob;
pub use status::JobStatus;
