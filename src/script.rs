//! Compose the shell script a job is submitted as
//!
//! A submission script is written in a fixed order: environment exports, module unloads, module
//! loads, sourced scripts, then the command line wrapped so that it runs in the background.

/// Environment and module preamble
pub mod header;
/// Command line, background wrapper and finish marker epilogue
pub mod command;
/// Quoting for words spliced into shell text
pub mod quote;

use std::fmt;

use log::debug;

use crate::error::Result;
use crate::resources::Resources;

pub use command::{compose_command_line, render_epilogue, wrap_non_blocking};
pub use header::compose_header;
pub use quote::shell_quote;

/// Rendered submission script, ready to be written to the remote working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionScript {
    content: String,
}

impl SubmissionScript {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

impl fmt::Display for SubmissionScript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Build the complete script for one command
///
/// When `finish_tag` is set, the backgrounded body touches that file after the command exits 0,
/// which is how a finished job is told apart from one that died.
pub fn compose_script(command: &str, args: &str, res: &Resources, finish_tag: Option<&str>) -> Result<SubmissionScript> {
    let header = compose_header(res);
    let mut body = compose_command_line(command, args, res);
    if let Some(tag) = finish_tag {
        body.push('\n');
        body.push_str(&render_epilogue(tag)?);
    }

    let content = header + &wrap_non_blocking(&body);
    debug!("Composed submission script:\n{content}");
    Ok(SubmissionScript { content })
}
