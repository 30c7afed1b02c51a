use clap::{Parser, Subcommand};
use std::path::PathBuf;

use provcheck_core::report::BATCH_FOLDER_PATTERN;

#[derive(Parser)]
#[command(
    name = "provcheck",
    version,
    about = "Pass/fail checks for device provisioning result folders"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a pass/fail table for every station folder under a directory
    Check(CheckArgs),
    /// Watch a directory, rename new result folders to <device>_<PASS|FAIL>
    Watch(WatchArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Directory containing the station folders (prompted for when omitted)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Folder name pattern
    #[arg(long, default_value = BATCH_FOLDER_PATTERN)]
    pub pattern: String,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct WatchArgs {
    /// Settings file; defaults to config.ini beside the executable, then in the working directory
    #[arg(long, env = "PROVCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log verdicts instead of showing a popup
    #[arg(long)]
    pub headless: bool,
}
