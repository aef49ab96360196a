//! sitenav CLI - site navigation model resolver.
//!
//! Provides commands for:
//! - `check`: Validate a site description and report warnings
//! - `routes`: List the resolved route table
//! - `show`: Show breadcrumb, neighbours and edit link of one route
//! - `export`: Write the resolved navigation model as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, RoutesArgs, ShowArgs};
use output::Output;

/// sitenav - Site navigation model resolver.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a site description.
    Check(CheckArgs),
    /// List resolved routes with their breadcrumbs.
    Routes(RoutesArgs),
    /// Show details of a single route.
    Show(ShowArgs),
    /// Export the resolved navigation model as JSON.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG.
    // Resolution warnings are printed by the commands themselves.
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Routes(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Export(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
