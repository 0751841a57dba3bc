//! crudgen: CRUD scaffolding generated from a database table
//!
//! Given a table name, crudgen reads the table's columns and writes a
//! controller, a model and five Blade views for a Laravel-style application.
//!
//! # Pipeline
//!
//! 1. **Classification**: excluded columns (keys, timestamps, secrets) are
//!    dropped and every remaining column gets a [`WidgetKind`]
//! 2. **Tokens**: builders fill typed token records from the table and the
//!    derived [`ClassName`]
//! 3. **Rendering**: stubs are rendered by literal, single-pass substitution
//! 4. **Writing**: existing files are only replaced after confirmation
//!
//! Every external effect goes through a collaborator trait handed to the
//! [`Orchestrator`]: [`MetadataSource`], [`TemplateStore`], [`FileWriter`]
//! and [`Prompter`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crudgen::{CrudConfig, DiskWriter, GenerateRequest, Orchestrator, SqlxMetadata};
//! # use crudgen::testing::ScriptedPrompter;
//!
//! # fn main() -> Result<(), crudgen::CrudError> {
//! let config = CrudConfig::load()?;
//! let metadata = SqlxMetadata::connect(config.database_url()?)?;
//! let stubs = config.template_store();
//! let files = DiskWriter::new(&config.paths.root);
//! # let prompter = ScriptedPrompter::new(["y"]);
//!
//! let outcome = Orchestrator::new(&config, &metadata, stubs.as_ref(), &files, &prompter)
//!     .run(&GenerateRequest::new("products").with_route("catalog"))?;
//! assert!(outcome.succeeded());
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod classifier;
pub mod config;
pub mod database;
pub mod error;
pub mod files;
pub mod naming;
pub mod observability;
pub mod orchestrator;
pub mod paths;
pub mod prompt;
pub mod render;
pub mod schema;
pub mod stubs;
pub mod testing;

pub use builders::{Artifact, ArtifactStatus, GenerationContext, NameOverrides};
pub use classifier::{classify, column_title, field_widget, ColumnClassifier, WidgetKind};
pub use config::CrudConfig;
pub use database::SqlxMetadata;
pub use error::{CrudError, CrudResult};
pub use files::{DiskWriter, FileWriter};
pub use naming::ClassName;
pub use orchestrator::{GenerateRequest, Orchestrator, RunOutcome, Stage};
pub use prompt::Prompter;
pub use render::{render, TokenMap};
pub use schema::{ColumnDescriptor, MetadataSource, SqlType, TableDescriptor};
pub use stubs::{EmbeddedStubs, Stub, StubDirectory, TemplateStore};
