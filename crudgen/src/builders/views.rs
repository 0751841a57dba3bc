//! View builder
//!
//! Produces the layout when it is missing, then `index`, `create`, `edit`,
//! `form` and `show` in that order. All five views share one
//! [`ViewTokens`] record built from the per-column fragments.

use super::fragments::{
    body_fragment, filter_fragment, form_field_fragment, head_fragment, view_field_fragment,
};
use super::{Artifact, ArtifactStatus, GenerationContext, Workspace};
use crate::classifier::{column_title, field_widget};
use crate::config::DEFAULT_LAYOUT;
use crate::error::{CrudError, CrudResult};
use crate::render::{render_with, ViewTokens};
use crate::stubs::{Stub, TemplateStore, ViewStub};

/// Builds the Blade views
#[derive(Debug, Clone, Copy)]
pub struct ViewBuilder<'a> {
    context: &'a GenerationContext,
}

impl<'a> ViewBuilder<'a> {
    /// Builder for `context`
    #[must_use]
    pub const fn new(context: &'a GenerationContext) -> Self {
        Self { context }
    }

    /// Tokens shared by the five views
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::TemplateNotFound`] if the show row stub or a form
    /// field stub is missing
    pub fn tokens(&self, stubs: &dyn TemplateStore) -> CrudResult<ViewTokens> {
        let common = &self.context.common;
        let view_field = stubs.load(Stub::ViewField)?;

        let mut table_header = Vec::new();
        let mut table_body = Vec::new();
        let mut table_column_filters = Vec::new();
        let mut view_rows = Vec::new();
        let mut form = Vec::new();

        for column in &self.context.columns {
            let form_field = stubs.load(Stub::FormField(field_widget(column)))?;

            table_header.push(head_fragment(column));
            table_body.push(body_fragment(common, column));
            table_column_filters.push(filter_fragment(common, column));
            view_rows.push(view_field_fragment(&view_field, common, column));
            form.push(form_field_fragment(&form_field, common, column));
        }

        Ok(ViewTokens {
            common: common.clone(),
            table_header: table_header.join("\n"),
            table_body: table_body.join("\n"),
            table_column_filters: table_column_filters.join("\n"),
            view_rows: view_rows.join("\n"),
            form: form.join("\n"),
        })
    }

    /// Write the layout if needed, then every view
    ///
    /// # Errors
    ///
    /// Returns an error if a custom layout does not exist, a stub is missing,
    /// the prompt fails or a file cannot be written. Views written before the
    /// failure stay in `log`.
    pub fn build(&self, workspace: &Workspace<'_>, log: &mut Vec<Artifact>) -> CrudResult<()> {
        workspace.prompter.info("Creating Views ...");
        self.ensure_layout(workspace, log)?;

        let tokens = self.tokens(workspace.stubs)?;
        for view in ViewStub::ALL {
            let path = self.context.paths.view(&self.context.class_name, view);
            let label = format!("{} View", column_title(view.as_str()));

            workspace.emit(
                &label,
                &path,
                || {
                    let stub = workspace.stubs.load(Stub::View(view))?;
                    Ok(render_with(&stub, &tokens))
                },
                log,
            )?;
        }
        Ok(())
    }

    /// Create the default layout when it does not exist yet
    ///
    /// A custom layout is never created; it has to exist already.
    fn ensure_layout(&self, workspace: &Workspace<'_>, log: &mut Vec<Artifact>) -> CrudResult<()> {
        let path = self.context.paths.layout(&self.context.layout);
        if workspace.files.exists(&path) {
            return Ok(());
        }
        if self.context.layout != DEFAULT_LAYOUT {
            return Err(CrudError::LayoutNotFound(self.context.layout.clone()));
        }

        let layout = workspace.stubs.load(Stub::Layout)?;
        workspace.files.write(&path, &layout)?;
        tracing::debug!(path = %path.display(), "layout created");
        log.push(Artifact {
            label: "Layout".to_string(),
            path,
            status: ArtifactStatus::Written,
        });
        Ok(())
    }
}
