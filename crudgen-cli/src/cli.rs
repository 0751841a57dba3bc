//! Command-line arguments

use crate::commands::{MakeCommand, StubsCommand};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use crudgen::CrudConfig;
use std::path::PathBuf;

/// Top-level arguments
#[derive(Debug, Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Generate a CRUD controller, model and views from a database table", long_about = None)]
pub struct Cli {
    /// Configuration file used instead of ./crudgen.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database to introspect, overrides database.url
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate controller, model and views for a table
    Make(MakeCommand),
    /// Manage stub overrides
    Stubs {
        /// Stub operation
        #[command(subcommand)]
        command: StubsCommand,
    },
}

impl Cli {
    /// Load configuration, applying `--config` and `--database-url`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn load_config(&self) -> Result<CrudConfig> {
        let mut config = match &self.config {
            Some(path) => CrudConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => CrudConfig::load().context("Failed to load configuration")?,
        };

        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }

        Ok(config)
    }
}
