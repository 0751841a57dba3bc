//! Resource controller builder

use super::{Artifact, GenerationContext, Workspace};
use crate::error::CrudResult;
use crate::render::{render_with, ControllerTokens};
use crate::schema::SqlType;
use crate::stubs::Stub;

/// How the index action compares a filter value with a column
///
/// Substring matching is only valid on character columns; Postgres has no
/// `LIKE` for booleans, numbers or dates.
#[must_use]
pub const fn filter_comparison(sql_type: &SqlType) -> &'static str {
    match sql_type {
        SqlType::String | SqlType::Text => "like",
        SqlType::Date | SqlType::DateTime | SqlType::Timestamp => "date",
        SqlType::Time => "time",
        _ => "=",
    }
}

/// Builds `{Class}Controller.php`
#[derive(Debug, Clone, Copy)]
pub struct ControllerBuilder<'a> {
    context: &'a GenerationContext,
}

impl<'a> ControllerBuilder<'a> {
    /// Builder for `context`
    #[must_use]
    pub const fn new(context: &'a GenerationContext) -> Self {
        Self { context }
    }

    /// Tokens for the controller stub
    #[must_use]
    pub fn tokens(&self) -> ControllerTokens {
        let filters = self
            .context
            .columns
            .iter()
            .map(|column| {
                format!(
                    "\n        '{}' => '{}',",
                    column.name,
                    filter_comparison(&column.sql_type)
                )
            })
            .collect();

        ControllerTokens {
            common: self.context.common.clone(),
            filters,
        }
    }

    /// Render and write the controller
    ///
    /// # Errors
    ///
    /// Returns an error if the stub is missing, the prompt fails or the file
    /// cannot be written
    pub fn build(&self, workspace: &Workspace<'_>, log: &mut Vec<Artifact>) -> CrudResult<()> {
        workspace.prompter.info("Creating Controller...");
        let path = self.context.paths.controller(&self.context.class_name);

        workspace.emit(
            "Controller",
            &path,
            || {
                let stub = workspace.stubs.load(Stub::Controller)?;
                Ok(render_with(&stub, &self.tokens()))
            },
            log,
        )?;
        Ok(())
    }
}
