use std::path::PathBuf;

use clap::Parser;

use featsync::{logging, version};
use featsync_core::project_info::{collect_project_info, render_project_info, DEFAULT_WORKSPACE};

#[derive(Parser)]
#[command(
    name = "project-info",
    version = version::FULL,
    about = "Print basic metadata about a workspace as JSON"
)]
struct Cli {
    /// Workspace directory to describe
    #[arg(long, env = "WORKSPACE", default_value = DEFAULT_WORKSPACE)]
    workspace: PathBuf,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let info = collect_project_info(&cli.workspace);
    println!("{}", render_project_info(&info));
}
