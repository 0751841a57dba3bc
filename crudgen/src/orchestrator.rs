//! Generation pipeline
//!
//! ```text
//! Start → ValidateTable → DeriveClassName → BuildController → BuildModel → BuildViews → Done
//!              │
//!              └──→ Failed (table does not exist)
//! ```
//!
//! A builder whose stub or layout is missing is reported and skipped; the
//! run moves on to the next builder. Prompt, write and database failures end
//! the run with an error.

use crate::builders::{
    Artifact, ArtifactStatus, ControllerBuilder, GenerationContext, ModelBuilder, NameOverrides,
    ViewBuilder, Workspace,
};
use crate::config::CrudConfig;
use crate::error::{CrudError, CrudResult};
use crate::files::FileWriter;
use crate::prompt::Prompter;
use crate::schema::MetadataSource;
use crate::stubs::TemplateStore;
use std::fmt;
use std::path::PathBuf;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Nothing done yet
    Start,
    /// Checking that the table exists
    ValidateTable,
    /// Reading columns and deriving names
    DeriveClassName,
    /// Writing the controller
    BuildController,
    /// Writing the model
    BuildModel,
    /// Writing the layout and views
    BuildViews,
    /// Every stage ran
    Done,
    /// The table does not exist
    Failed,
}

impl Stage {
    /// Whether the pipeline stops here
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::ValidateTable => "validate-table",
            Self::DeriveClassName => "derive-class-name",
            Self::BuildController => "build-controller",
            Self::BuildModel => "build-model",
            Self::BuildViews => "build-views",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A request to generate CRUD files for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Table to generate for
    pub table: String,
    /// Name overrides
    pub overrides: NameOverrides,
}

impl GenerateRequest {
    /// Request for `table` with derived names
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            overrides: NameOverrides::default(),
        }
    }

    /// Use `route` as the route name
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.overrides.route = Some(route.into());
        self
    }

    /// Use `title` as the display title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.overrides.title = Some(title.into());
        self
    }
}

/// A builder that gave up without ending the run
#[derive(Debug)]
pub struct BuildFailure {
    /// Stage the builder ran in
    pub stage: Stage,
    /// Why it gave up
    pub error: CrudError,
}

/// Result of a pipeline run
#[derive(Debug)]
pub struct RunOutcome {
    /// `Done` or `Failed`
    pub stage: Stage,
    /// Every stage entered, in order
    pub trace: Vec<Stage>,
    /// Files written or skipped
    pub artifacts: Vec<Artifact>,
    /// Builders that gave up
    pub failures: Vec<BuildFailure>,
}

impl RunOutcome {
    fn new() -> Self {
        Self {
            stage: Stage::Start,
            trace: vec![Stage::Start],
            artifacts: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(%stage, "entering stage");
        self.stage = stage;
        self.trace.push(stage);
    }

    /// Whether the run reached `Done`
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Paths that were written
    #[must_use]
    pub fn written(&self) -> Vec<PathBuf> {
        self.paths_with(ArtifactStatus::Written)
    }

    /// Paths that were kept after a declined overwrite
    #[must_use]
    pub fn skipped(&self) -> Vec<PathBuf> {
        self.paths_with(ArtifactStatus::Skipped)
    }

    fn paths_with(&self, status: ArtifactStatus) -> Vec<PathBuf> {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.status == status)
            .map(|artifact| artifact.path.clone())
            .collect()
    }
}

/// Runs the generation pipeline against explicit collaborators
pub struct Orchestrator<'a> {
    config: &'a CrudConfig,
    metadata: &'a dyn MetadataSource,
    workspace: Workspace<'a>,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator
    #[must_use]
    pub fn new(
        config: &'a CrudConfig,
        metadata: &'a dyn MetadataSource,
        stubs: &'a dyn TemplateStore,
        files: &'a dyn FileWriter,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            config,
            metadata,
            workspace: Workspace {
                stubs,
                files,
                prompter,
            },
        }
    }

    /// Run every stage for `request`
    ///
    /// A missing table is not an error: the outcome ends in
    /// [`Stage::Failed`] and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata source fails, a prompt cannot be
    /// answered or a file cannot be written
    pub fn run(&self, request: &GenerateRequest) -> CrudResult<RunOutcome> {
        let prompter = self.workspace.prompter;
        let mut outcome = RunOutcome::new();
        prompter.info("Running Crud Generator ...");

        outcome.enter(Stage::ValidateTable);
        if !self.metadata.table_exists(&request.table)? {
            let error = CrudError::TableNotFound(request.table.clone());
            tracing::warn!(table = %request.table, "table not found");
            prompter.error(&error.to_string());
            outcome.enter(Stage::Failed);
            return Ok(outcome);
        }

        outcome.enter(Stage::DeriveClassName);
        let table = self.metadata.describe(&request.table)?;
        let context = GenerationContext::new(table, self.config, &request.overrides);
        tracing::info!(
            table = %request.table,
            class = %context.class_name,
            columns = context.columns.len(),
            "generating CRUD"
        );

        let workspace = &self.workspace;

        outcome.enter(Stage::BuildController);
        let result = ControllerBuilder::new(&context).build(workspace, &mut outcome.artifacts);
        self.settle(result, &mut outcome)?;

        outcome.enter(Stage::BuildModel);
        let result = ModelBuilder::new(&context).build(workspace, &mut outcome.artifacts);
        self.settle(result, &mut outcome)?;

        outcome.enter(Stage::BuildViews);
        let result = ViewBuilder::new(&context).build(workspace, &mut outcome.artifacts);
        self.settle(result, &mut outcome)?;

        outcome.enter(Stage::Done);
        prompter.info("Created Successfully.");
        Ok(outcome)
    }

    /// Record a builder-local failure, propagate anything else
    fn settle(&self, result: CrudResult<()>, outcome: &mut RunOutcome) -> CrudResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(error) if error.is_builder_local() => {
                tracing::warn!(stage = %outcome.stage, %error, "builder skipped");
                self.workspace.prompter.error(&error.to_string());
                outcome.failures.push(BuildFailure {
                    stage: outcome.stage,
                    error,
                });
                Ok(())
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDescriptor, SqlType, TableDescriptor};
    use crate::stubs::Stub;
    use crate::testing::{MemoryFiles, MemoryMetadata, MemoryStubs, ScriptedPrompter};

    fn metadata() -> MemoryMetadata {
        MemoryMetadata::new().with_table(TableDescriptor::new(
            "products",
            vec![
                ColumnDescriptor::new("id", SqlType::BigInt, false),
                ColumnDescriptor::new("name", SqlType::String, false),
            ],
        ))
    }

    #[test]
    fn test_full_run_trace() {
        let config = CrudConfig::default();
        let metadata = metadata();
        let stubs = MemoryStubs::new();
        let files = MemoryFiles::new();
        let prompter = ScriptedPrompter::new(Vec::<String>::new());

        let outcome = Orchestrator::new(&config, &metadata, &stubs, &files, &prompter)
            .run(&GenerateRequest::new("products"))
            .unwrap();

        assert!(outcome.succeeded());
        assert_eq!(
            outcome.trace,
            vec![
                Stage::Start,
                Stage::ValidateTable,
                Stage::DeriveClassName,
                Stage::BuildController,
                Stage::BuildModel,
                Stage::BuildViews,
                Stage::Done,
            ]
        );
        assert_eq!(outcome.written().len(), 8);
        assert!(outcome.skipped().is_empty());
        assert_eq!(
            prompter.infos(),
            vec![
                "Running Crud Generator ...",
                "Creating Controller...",
                "Creating Model...",
                "Creating Views ...",
                "Created Successfully.",
            ]
        );
    }

    #[test]
    fn test_missing_table_fails_without_writes() {
        let config = CrudConfig::default();
        let metadata = metadata();
        let stubs = MemoryStubs::new();
        let files = MemoryFiles::new();
        let prompter = ScriptedPrompter::new(Vec::<String>::new());

        let outcome = Orchestrator::new(&config, &metadata, &stubs, &files, &prompter)
            .run(&GenerateRequest::new("orders"))
            .unwrap();

        assert_eq!(outcome.stage, Stage::Failed);
        assert!(!outcome.succeeded());
        assert_eq!(
            outcome.trace,
            vec![Stage::Start, Stage::ValidateTable, Stage::Failed]
        );
        assert_eq!(files.write_count(), 0);
        assert_eq!(metadata.describe_calls(), 0);
        assert_eq!(prompter.errors(), vec!["`orders` table not exist"]);
    }

    #[test]
    fn test_missing_model_stub_continues_with_views() {
        let config = CrudConfig::default();
        let metadata = metadata();
        let stubs = MemoryStubs::new().without_stub(Stub::Model);
        let files = MemoryFiles::new();
        let prompter = ScriptedPrompter::new(Vec::<String>::new());

        let outcome = Orchestrator::new(&config, &metadata, &stubs, &files, &prompter)
            .run(&GenerateRequest::new("products"))
            .unwrap();

        assert!(outcome.succeeded());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].stage, Stage::BuildModel);
        assert_eq!(files.write_count(), 7);
        assert!(files.contents("app/Models/Product.php").is_none());
        assert_eq!(prompter.errors().len(), 1);
    }

    #[test]
    fn test_write_failure_ends_run() {
        let config = CrudConfig::default();
        let metadata = metadata();
        let stubs = MemoryStubs::new();
        let files = MemoryFiles::new().failing_on("app/Models/Product.php");
        let prompter = ScriptedPrompter::new(Vec::<String>::new());

        let err = Orchestrator::new(&config, &metadata, &stubs, &files, &prompter)
            .run(&GenerateRequest::new("products"))
            .unwrap_err();

        assert!(matches!(err, CrudError::FileWrite { .. }));
        assert_eq!(files.write_count(), 1);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::BuildViews.to_string(), "build-views");
        assert!(Stage::Failed.is_terminal());
        assert!(!Stage::BuildModel.is_terminal());
    }
}
