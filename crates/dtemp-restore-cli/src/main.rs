mod commands;
mod logging;
mod progress;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::*;
use commands::{Cli, Commands};
use console::Term;
use dotenv::dotenv;
use dtemp_restore_core::config::{self, RestoreConfig};
use dtemp_restore_core::{Error, RestoreEngine, RunReport};
use progress::CliReporter;
use tracing::error;

fn main() -> Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Restore(args)) => {
            let wait = config.wait_for_exit && !args.no_wait;
            run_restore(&config, args.root, wait)?;
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            run_restore(&config, None, config.wait_for_exit)?;
        }
    }

    Ok(())
}

fn run_restore(config: &RestoreConfig, root: Option<String>, wait: bool) -> Result<()> {
    let term = Term::stdout();

    let root = match root.or_else(|| config.root_path.clone()) {
        Some(root) => root,
        None => {
            term.write_str("Enter the folder path containing the files: ")?;
            term.read_line()?
        }
    };
    let root = PathBuf::from(root.trim());

    let engine = RestoreEngine::new(config.clone());
    let reporter = CliReporter::new();

    match engine.run(&root, &reporter) {
        Ok(report) => print_summary(&report, &config.skip_log_name),
        Err(err @ (Error::RootNotFound(_) | Error::RootNotADirectory(_))) => {
            println!("{}", err.to_string().red())
        }
        Err(err) => error!("Error: {}", err),
    }

    if wait {
        term.write_line("\nPress Enter to exit...")?;
        term.read_line()?;
    }

    Ok(())
}

fn print_summary(report: &RunReport, skip_log_name: &str) {
    println!();
    println!("{}", "Restoration completed.".bold());
    println!(
        "Files restored: {}",
        format!("{}", report.restored).green()
    );
    println!(
        "Files skipped: {} (see {})",
        format!("{}", report.skipped_count()).red(),
        skip_log_name
    );
    if report.warnings > 0 {
        println!(
            "Warnings: {} (timestamp, attribute or sidecar cleanup, see log)",
            format!("{}", report.warnings).yellow()
        );
    }
    if report.skip_log.is_none() {
        println!("{}", "The skip log could not be written.".yellow());
    }
}
