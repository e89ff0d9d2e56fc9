use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

use featsync::{logging, version};
use featsync_core::confirm::TerminalInput;
use featsync_core::snapshot::GitCli;
use featsync_core::sync::{run_feature_sync, SyncError, SyncOutcome, SyncRequest};

#[derive(Parser)]
#[command(
    name = "feature-sync",
    version = version::FULL,
    about = "Append a progress block to a feature notes file"
)]
struct Cli {
    /// Directory to start the repository search from (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,
    /// Print the block instead of writing it
    #[arg(long)]
    dry_run: bool,
    /// Pin the block timestamp (RFC 3339)
    #[arg(long, hide = true, value_name = "TIME")]
    at: Option<DateTime<Utc>>,
    /// Notes file name (with or without .md) or a path relative to the current directory; omit to infer
    #[arg(value_name = "FILE")]
    file: Vec<String>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let invocation_dir = std::env::current_dir().context("read current directory")?;
    let cwd = match cli.root {
        Some(root) => root
            .canonicalize()
            .with_context(|| format!("resolve --root {}", root.display()))?,
        None => invocation_dir.clone(),
    };
    tracing::debug!(cwd = %cwd.display(), dry_run = cli.dry_run, "starting feature sync");
    let file = cli.file.join(" ");
    let request = SyncRequest {
        cwd: cwd.clone(),
        invocation_dir,
        file: Some(file).filter(|value| !value.trim().is_empty()),
        dry_run: cli.dry_run,
        now: cli.at.unwrap_or_else(Utc::now),
    };

    let queries = GitCli::new(&cwd);
    let mut input = TerminalInput;
    let mut prompt_out = io::stdout();
    match run_feature_sync(&request, &mut input, &queries, &mut prompt_out) {
        Ok(SyncOutcome::Updated(path)) => {
            println!("Updated feature file: {}", path.display());
        }
        Ok(SyncOutcome::DuplicateSkipped(_)) => {
            println!("Similar block detected; not adding duplicate.");
        }
        Ok(SyncOutcome::Preview { block, .. }) => {
            print!("{block}");
        }
        Err(SyncError::Declined { candidates }) => {
            println!("Aborted. Provide a file name. Candidates:");
            for name in &candidates {
                println!(" - {name}");
            }
            return Err(SyncError::Declined { candidates }.into());
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
