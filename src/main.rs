use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;

use shellbatch::context::LocalContext;
use shellbatch::db::JobRegistry;
use shellbatch::resources::validate_resource_file;
use shellbatch::token::UuidTokens;
use shellbatch::{Backend, ResourceSpec, ShellJob};

/// Run commands as background shell jobs and track their status
#[derive(Parser, Debug)]
#[command(name = "shellbatch", version)]
struct Args {
    /// Path to the job registry database
    #[arg(long, default_value = "shellbatch.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a submission script into the working directory and launch it in the background
    Submit {
        /// Working directory of the job
        #[arg(long)]
        root: PathBuf,
        /// JSON file with resource options
        #[arg(long)]
        resources: Option<PathBuf>,
        /// Don't leave a marker file behind when the command succeeds
        #[arg(long)]
        no_finish_marker: bool,
        /// Print the submission script instead of launching it
        #[arg(long)]
        dry_run: bool,
        /// Command to run
        command: String,
        /// Arguments appended to the command
        #[arg(default_value = "")]
        args: String,
    },
    /// Report the status of a submitted job
    Status {
        /// Working directory of the job
        #[arg(long)]
        root: PathBuf,
        /// Job was submitted with --no-finish-marker
        #[arg(long)]
        no_finish_marker: bool,
        /// Token printed by submit
        token: String,
    },
    /// List every job in the registry
    List,
}

fn main() -> Result<()> {
    env_logger::init();
    info!("terve! starting up :)");

    let args = Args::parse();
    let stdout = io::stdout();
    run(args, &mut stdout.lock())
}

/// Carry out one command, writing its report to `out`
fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let registry = JobRegistry::open(&args.db)
        .with_context(|| format!("opening job registry {}", args.db.display()))?;

    match args.command {
        Commands::Submit { root, resources, no_finish_marker, dry_run, command, args } => {
            let spec = match resources {
                Some(path) => Some(read_resources(&path)?),
                None => None,
            };
            let context = Arc::new(LocalContext::new(&root)?);
            let job = ShellJob::new(context, &UuidTokens)
                .registry(registry)
                .finish_marker(!no_finish_marker);

            if dry_run {
                info!("--dry-run set, printing submission script only");
                write!(out, "{}", job.render(&command, &args, spec.as_ref())?)?;
            } else {
                job.submit(&command, &args, spec.as_ref())?;
                writeln!(out, "{}", job.token())?;
            }
        }
        Commands::Status { root, no_finish_marker, token } => {
            let context = Arc::new(LocalContext::new(&root)?);
            let job = ShellJob::with_token(context, token)
                .registry(registry)
                .finish_marker(!no_finish_marker);
            writeln!(out, "{}", job.check_status()?)?;
        }
        Commands::List => {
            for record in registry.load_all()? {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    record.token,
                    record.status,
                    record.submitted_at,
                    record.remote_root.display()
                )?;
            }
        }
    }

    Ok(())
}

/// Read a resource document and check it against the schema
fn read_resources(path: &Path) -> Result<ResourceSpec> {
    info!("Reading resources: {}", path.display());
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading resources {}", path.display()))?;
    let value: Value = serde_json::from_str(&json)
        .with_context(|| format!("parsing resources {}", path.display()))?;

    validate_resource_file(&value)?;
    Ok(ResourceSpec::from_value(value)?)
}
