//! Artifact builders
//!
//! Each builder turns a [`GenerationContext`] into one or more files:
//! - [`ControllerBuilder`] - the resource controller
//! - [`ModelBuilder`] - the model with fillable columns, rules and relations
//! - [`ViewBuilder`] - the layout (when missing) and the five views
//!
//! Every file goes through [`Workspace::emit`], which asks before replacing
//! an existing file, renders the stub and writes the result.

pub mod controller;
pub mod fragments;
pub mod model;
pub mod views;

pub use controller::ControllerBuilder;
pub use model::ModelBuilder;
pub use views::ViewBuilder;

use crate::config::CrudConfig;
use crate::error::CrudResult;
use crate::files::FileWriter;
use crate::naming::{ClassName, NamingHelpers};
use crate::paths::ArtifactPaths;
use crate::prompt::{confirm_overwrite, Prompter};
use crate::render::{unresolved_placeholders, CommonTokens};
use crate::schema::{ColumnDescriptor, TableDescriptor};
use crate::stubs::TemplateStore;
use std::path::{Path, PathBuf};

/// What happened to a target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// Rendered and written
    Written,
    /// Left untouched after the overwrite prompt was declined
    Skipped,
}

/// A file the pipeline produced or skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Prompt label (`Controller`, `Model`, `Index View`, ...)
    pub label: String,
    /// Destination, relative to the project root
    pub path: PathBuf,
    /// Outcome
    pub status: ArtifactStatus,
}

/// Collaborators a builder reads stubs from and writes files through
#[derive(Clone, Copy)]
pub struct Workspace<'a> {
    /// Stub source
    pub stubs: &'a dyn TemplateStore,
    /// Destination filesystem
    pub files: &'a dyn FileWriter,
    /// Console
    pub prompter: &'a dyn Prompter,
}

impl Workspace<'_> {
    /// Write `path` with the output of `render`, asking first if it exists
    ///
    /// `render` only runs when the file is going to be written, so a declined
    /// overwrite never touches the stub store.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt, the render step or the write fails
    pub fn emit(
        &self,
        label: &str,
        path: &Path,
        render: impl FnOnce() -> CrudResult<String>,
        log: &mut Vec<Artifact>,
    ) -> CrudResult<ArtifactStatus> {
        if self.files.exists(path) && !confirm_overwrite(self.prompter, label)? {
            tracing::warn!(path = %path.display(), "kept existing file");
            self.prompter.info(&format!("Skipped {}", path.display()));
            log.push(Artifact {
                label: label.to_string(),
                path: path.to_path_buf(),
                status: ArtifactStatus::Skipped,
            });
            return Ok(ArtifactStatus::Skipped);
        }

        let contents = render()?;
        for placeholder in unresolved_placeholders(&contents) {
            tracing::warn!(path = %path.display(), %placeholder, "unresolved placeholder");
        }

        self.files.write(path, &contents)?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "artifact written");
        log.push(Artifact {
            label: label.to_string(),
            path: path.to_path_buf(),
            status: ArtifactStatus::Written,
        });
        Ok(ArtifactStatus::Written)
    }
}

/// Overrides supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameOverrides {
    /// Route name used instead of the kebab plural
    pub route: Option<String>,
    /// Display title used instead of the class title
    pub title: Option<String>,
}

/// Everything derived from the table before any file is built
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// The described table
    pub table: TableDescriptor,
    /// Derived class name
    pub class_name: ClassName,
    /// Columns that take part in views and forms, in table order
    pub columns: Vec<ColumnDescriptor>,
    /// Tokens every artifact shares
    pub common: CommonTokens,
    /// Destinations
    pub paths: ArtifactPaths,
    /// Layout the views extend
    pub layout: String,
}

impl GenerationContext {
    /// Derive the context for `table`
    #[must_use]
    pub fn new(table: TableDescriptor, config: &CrudConfig, overrides: &NameOverrides) -> Self {
        let class_name = ClassName::from_table(&table.name);
        let columns = config.classifier().classify(&table.columns);

        let (model_title, model_title_plural) = overrides.title.as_ref().map_or_else(
            || {
                (
                    NamingHelpers::to_title(class_name.as_str()),
                    NamingHelpers::to_plural_title(class_name.as_str()),
                )
            },
            |title| (title.clone(), NamingHelpers::pluralize(title)),
        );

        let common = CommonTokens {
            layout: config.generator.layout.clone(),
            model_name: class_name.to_string(),
            model_title,
            model_title_plural,
            model_namespace: config.generator.model_namespace.clone(),
            controller_namespace: config.generator.controller_namespace.clone(),
            plural_lower: class_name.camel_plural(),
            plural_upper: class_name.plural(),
            lower: class_name.camel(),
            route: overrides
                .route
                .clone()
                .unwrap_or_else(|| class_name.kebab_plural()),
            view: class_name.kebab(),
            table_name: table.name.clone(),
        };

        Self {
            paths: config.artifact_paths(),
            layout: config.generator.layout.clone(),
            table,
            class_name,
            columns,
            common,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SqlType;
    use crate::testing::{MemoryFiles, MemoryStubs, ScriptedPrompter};

    fn blog_posts() -> TableDescriptor {
        TableDescriptor::new(
            "blog_posts",
            vec![
                ColumnDescriptor::new("id", SqlType::BigInt, false),
                ColumnDescriptor::new("title", SqlType::String, false),
                ColumnDescriptor::new("created_at", SqlType::Timestamp, true),
            ],
        )
    }

    #[test]
    fn test_context_derives_names() {
        let context =
            GenerationContext::new(blog_posts(), &CrudConfig::default(), &NameOverrides::default());

        assert_eq!(context.class_name.as_str(), "BlogPost");
        assert_eq!(context.common.model_title, "Blog Post");
        assert_eq!(context.common.model_title_plural, "Blog Posts");
        assert_eq!(context.common.plural_lower, "blogPosts");
        assert_eq!(context.common.lower, "blogPost");
        assert_eq!(context.common.route, "blog-posts");
        assert_eq!(context.common.view, "blog-post");
        assert_eq!(context.common.table_name, "blog_posts");
        assert_eq!(context.columns.len(), 1);
        assert_eq!(context.columns[0].name, "title");
    }

    #[test]
    fn test_context_applies_overrides() {
        let overrides = NameOverrides {
            route: Some("admin.posts".to_string()),
            title: Some("Article".to_string()),
        };
        let context = GenerationContext::new(blog_posts(), &CrudConfig::default(), &overrides);

        assert_eq!(context.common.route, "admin.posts");
        assert_eq!(context.common.model_title, "Article");
        assert_eq!(context.common.model_title_plural, "Articles");
        assert_eq!(context.common.model_name, "BlogPost");
    }

    #[test]
    fn test_emit_writes_new_file() {
        let files = MemoryFiles::new();
        let stubs = MemoryStubs::new();
        let prompter = ScriptedPrompter::new(["n"]);
        let workspace = Workspace {
            stubs: &stubs,
            files: &files,
            prompter: &prompter,
        };
        let mut log = Vec::new();

        let status = workspace
            .emit("Model", Path::new("app/Models/Post.php"), || Ok("<?php".to_string()), &mut log)
            .unwrap();

        assert_eq!(status, ArtifactStatus::Written);
        assert!(prompter.questions().is_empty());
        assert_eq!(files.contents("app/Models/Post.php").as_deref(), Some("<?php"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_declined_emit_skips_render() {
        let files = MemoryFiles::new().with_file("app/Models/Post.php", "original");
        let stubs = MemoryStubs::new();
        let prompter = ScriptedPrompter::new(["n"]);
        let workspace = Workspace {
            stubs: &stubs,
            files: &files,
            prompter: &prompter,
        };
        let mut log = Vec::new();

        let status = workspace
            .emit(
                "Model",
                Path::new("app/Models/Post.php"),
                || panic!("render must not run for a skipped file"),
                &mut log,
            )
            .unwrap();

        assert_eq!(status, ArtifactStatus::Skipped);
        assert_eq!(files.contents("app/Models/Post.php").as_deref(), Some("original"));
        assert_eq!(files.write_count(), 0);
        assert_eq!(log[0].status, ArtifactStatus::Skipped);
    }
}
