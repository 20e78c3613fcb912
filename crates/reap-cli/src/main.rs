mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reap", about = "Per-pixel crop harvest date mapping")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full harvest-mapping pipeline
    Run(commands::run::RunArgs),
    /// Print or save a default configuration
    Config(commands::config::ConfigArgs),
    /// Show stack file metadata and scene table
    Info(commands::info::InfoArgs),
    /// Trace the analysis of a single pixel
    Probe(commands::probe::ProbeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Probe(args) => commands::probe::run(args),
    }
}
