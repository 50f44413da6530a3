//! recall CLI - Entry point
//!
//! Usage: recall <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recall::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (stderr: stdout carries the plugin protocol)
    let default_filter = if cli.verbose { "recall=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let settings = cli.settings();

    // Run command
    match cli.command {
        Commands::Serve(args) => recall::cli::serve::run(args, settings),
        Commands::Init(args) => recall::cli::init::run(args, &settings),
        Commands::Ls(args) => recall::cli::ls::run(args, &settings),
        Commands::Add(args) => recall::cli::add::run(args, &settings),
        Commands::Rm(args) => recall::cli::rm::run(args, &settings),
        Commands::Get(args) => recall::cli::get::run(args, &settings),
        Commands::Suggest(args) => recall::cli::suggest::run(args, &settings),
        Commands::Config(args) => recall::cli::config::run(args, &settings),
    }
}
