use anyhow::{Context, Result};
use clap::Parser;

use featsync::{logging, version};
use featsync_core::diagnostics::{render_env_check, EnvReport};

#[derive(Parser)]
#[command(
    name = "env-check",
    version = version::FULL,
    about = "Confirm the command toolchain runs and show its environment"
)]
struct Cli {}

fn main() -> Result<()> {
    logging::init();
    let _cli = Cli::parse();
    let cwd = std::env::current_dir().context("read current directory")?;
    println!("{}", render_env_check(&cwd, &EnvReport::from_env()));
    Ok(())
}
