//! `crudgen make <table>`
//!
//! Connects to the configured database, reads the table and writes the
//! controller, model and views below the project root.
//!
//! # Example
//!
//! ```bash
//! crudgen make blog_posts --route posts --title Article
//! ```

use crate::terminal::ConsolePrompter;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use crudgen::{
    ArtifactStatus, CrudConfig, DiskWriter, GenerateRequest, Orchestrator, RunOutcome, SqlxMetadata,
};

/// Generate CRUD files for one table
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct MakeCommand {
    /// Table name (e.g., `products`, `blog_posts`)
    table: String,

    /// Route name used instead of the kebab-case plural
    #[arg(long)]
    route: Option<String>,

    /// Display title used instead of the class name
    #[arg(long)]
    title: Option<String>,
}

impl MakeCommand {
    /// Command for `table` with optional name overrides
    #[must_use]
    pub const fn new(table: String, route: Option<String>, title: Option<String>) -> Self {
        Self {
            table,
            route,
            title,
        }
    }

    /// Table to generate for
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// `--route` override
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// `--title` override
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The pipeline request for this command
    #[must_use]
    pub fn request(&self) -> GenerateRequest {
        let mut request = GenerateRequest::new(&self.table);
        if let Some(route) = &self.route {
            request = request.with_route(route);
        }
        if let Some(title) = &self.title {
            request = request.with_title(title);
        }
        request
    }

    /// Run the pipeline, returning whether it reached the end
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or a file cannot be
    /// written
    pub fn execute(&self, config: &CrudConfig) -> Result<bool> {
        let url = config.database_url()?;
        let metadata =
            SqlxMetadata::connect(url).with_context(|| format!("Failed to connect to {url}"))?;
        let stubs = config.template_store();
        let files = DiskWriter::new(&config.paths.root);
        let prompter = ConsolePrompter::new();

        let outcome = Orchestrator::new(config, &metadata, stubs.as_ref(), &files, &prompter)
            .run(&self.request())
            .with_context(|| format!("Failed to generate CRUD for `{}`", self.table))?;

        print_summary(&outcome);
        Ok(outcome.succeeded())
    }
}

fn print_summary(outcome: &RunOutcome) {
    if outcome.artifacts.is_empty() {
        return;
    }

    println!();
    for artifact in &outcome.artifacts {
        match artifact.status {
            ArtifactStatus::Written => println!(
                "  {} {}",
                style("✓").green(),
                style(artifact.path.display()).dim()
            ),
            ArtifactStatus::Skipped => println!(
                "  {} {} {}",
                style("-").yellow(),
                style(artifact.path.display()).dim(),
                style("(kept)").yellow()
            ),
        }
    }
    for failure in &outcome.failures {
        println!(
            "  {} {} {}",
            style("✗").red(),
            style(failure.stage).dim(),
            style(&failure.error).red()
        );
    }
}
