//! `recall serve` command
//!
//! Runs the plugin protocol on stdin/stdout. Meant to be spawned by the
//! launcher, not run by hand.

use anyhow::Result;
use clap::Args;

use crate::config::SettingsSource;

#[derive(Args, Debug)]
pub struct ServeArgs {}

pub fn run(_args: ServeArgs, settings: SettingsSource) -> Result<()> {
    crate::plugin::run_plugin_server(settings)
}
