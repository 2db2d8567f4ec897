use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::error::Result;
use crate::resources::Resources;
use crate::script::quote::shell_quote;

/// Anything after this in a raw command was meant as a local redirection and is dropped
const REDIRECT_MARKER: &str = "1>";

/// Rendering context for the finish marker epilogue
#[derive(Serialize)]
struct EpilogueContext {
    finish_tag: String,
}

/// Build the line that actually runs the job
///
/// `run.sh 1> out.log` with args `-x 3` becomes `run.sh -x 3`. With `with_mpi` set the command is
/// launched through `mpirun -n <task_per_node>`.
pub fn compose_command_line(command: &str, args: &str, res: &Resources) -> String {
    let command = command.split(REDIRECT_MARKER).next().unwrap_or_default().trim();
    if res.with_mpi {
        format!("mpirun -n {} {} {}", res.task_per_node, command, args)
    } else {
        format!("{command} {args}")
    }
}

/// Run `body` in a backgrounded subshell so the launching shell returns straight away
pub fn wrap_non_blocking(body: &str) -> String {
    format!("({body})&\n")
}

/// Render the line that leaves `finish_tag` behind when the command before it succeeded
pub fn render_epilogue(finish_tag: &str) -> Result<String> {
    /// included epilogue template
    static EPILOGUE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/epilogue.txt"));
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("epilogue", EPILOGUE)?;

    let context = EpilogueContext { finish_tag: shell_quote(finish_tag) };
    let rendered = tt.render("epilogue", &context)?;
    Ok(rendered.trim_end().to_string())
}
