//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::SettingsSource;

pub mod add;
pub mod config;
pub mod get;
pub mod init;
pub mod ls;
pub mod rm;
pub mod serve;
pub mod suggest;
pub mod utils;

/// recall - key/value facts for your launcher
///
/// Run `recall serve` from the launcher; the other commands manage the
/// fact database directly.
#[derive(Parser, Debug)]
#[command(name = "recall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "RECALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file (overrides main.database_file)
    #[arg(long, global = true, env = "RECALL_DATABASE")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings as selected by the global flags
    pub fn settings(&self) -> SettingsSource {
        SettingsSource::new(self.config.clone(), self.db.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the launcher plugin over stdin/stdout
    Serve(serve::ServeArgs),

    /// Create the database (with example facts)
    Init(init::InitArgs),

    /// List all facts
    Ls(ls::LsArgs),

    /// Add a fact
    Add(add::AddArgs),

    /// Delete every fact with a key
    Rm(rm::RmArgs),

    /// Print the value(s) stored under a key
    Get(get::GetArgs),

    /// Preview the suggestions shown for a selection chain
    Suggest(suggest::SuggestArgs),

    /// Show the resolved configuration
    Config(config::ConfigArgs),
}
