//! `crudgen stubs` - manage stub overrides

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use crudgen::{CrudConfig, Stub, StubDirectory};
use std::path::PathBuf;

/// Stub maintenance
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum StubsCommand {
    /// Copy the built-in stubs into the stub directory for editing
    Publish {
        /// Replace stubs that were already published
        #[arg(long)]
        force: bool,
    },
    /// List every stub and whether it is overridden
    List,
}

/// Where one stub is loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubListing {
    /// Stub name (`Controller`, `views/index`, ...)
    pub name: String,
    /// Whether a file in the stub directory replaces the built-in text
    pub overridden: bool,
}

impl StubsCommand {
    /// Execute the subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if the stub directory cannot be read or written
    pub fn execute(&self, config: &CrudConfig) -> Result<()> {
        let directory = config.stub_directory();
        match self {
            Self::Publish { force } => {
                let written = Self::publish(&directory, *force)?;
                print_published(&directory, &written);
            }
            Self::List => {
                let (listing, unknown) = Self::list(&directory)?;
                print_listing(&directory, &listing, &unknown);
            }
        }
        Ok(())
    }

    /// Publish the built-in stubs, returning the files written
    ///
    /// # Errors
    ///
    /// Returns an error if a stub cannot be written
    pub fn publish(directory: &StubDirectory, force: bool) -> Result<Vec<PathBuf>> {
        directory
            .publish(force)
            .with_context(|| format!("Failed to publish stubs to {}", directory.root().display()))
    }

    /// Every known stub with its override state, plus unrecognized `.stub` files
    ///
    /// # Errors
    ///
    /// Returns an error if the stub directory cannot be walked
    pub fn list(directory: &StubDirectory) -> Result<(Vec<StubListing>, Vec<String>)> {
        let present = directory
            .overridden()
            .with_context(|| format!("Failed to read {}", directory.root().display()))?;

        let known = Stub::all();
        let listing = known
            .iter()
            .map(|stub| {
                let name = stub.name();
                StubListing {
                    overridden: present.contains(&name),
                    name,
                }
            })
            .collect();
        let unknown = present
            .into_iter()
            .filter(|name| !known.iter().any(|stub| stub.name() == *name))
            .collect();

        Ok((listing, unknown))
    }
}

fn print_published(directory: &StubDirectory, written: &[PathBuf]) {
    if written.is_empty() {
        println!(
            "{} stubs already published in {} (use {} to replace them)",
            style("✓").green(),
            style(directory.root().display()).cyan(),
            style("--force").yellow()
        );
        return;
    }

    println!(
        "\n{} {} stubs to {}:",
        style("Published").green().bold(),
        written.len(),
        style(directory.root().display()).cyan()
    );
    for path in written {
        println!("  {} {}", style("✓").green(), style(path.display()).dim());
    }
}

fn print_listing(directory: &StubDirectory, listing: &[StubListing], unknown: &[String]) {
    println!(
        "\n{} {}",
        style("Stubs in").cyan().bold(),
        style(directory.root().display()).cyan()
    );
    for entry in listing {
        if entry.overridden {
            println!("  {} {}", style("●").green(), entry.name);
        } else {
            println!("  {} {} {}", style("○").dim(), entry.name, style("(built-in)").dim());
        }
    }
    for name in unknown {
        println!("  {} {} {}", style("?").yellow(), name, style("(not used)").yellow());
    }
}
