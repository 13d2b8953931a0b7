use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dtemp-restore")]
#[command(about = "Restore staged temp files to their archived folders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Restore staged files and their folder structure under a root
    Restore(RestoreArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Folder containing the staged files and .rfmeta sidecars
    pub root: Option<String>,
    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_wait: bool,
}
