//! crudgen CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use crudgen_cli_lib::{Cli, Commands};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    crudgen::observability::init(cli.verbose)?;

    let config = cli.load_config()?;

    match &cli.command {
        Commands::Make(command) => {
            if !command.execute(&config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Stubs { command } => {
            command.execute(&config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
