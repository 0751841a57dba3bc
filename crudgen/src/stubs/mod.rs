//! Stub templates and where they are loaded from
//!
//! The default stubs are compiled into the binary. A stub directory on disk
//! (configured as `stubs.path`) overrides them file by file; `crudgen stubs
//! publish` copies the defaults there for customization.

use crate::classifier::WidgetKind;
use crate::error::{CrudError, CrudResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of stub files on disk
pub const STUB_EXTENSION: &str = "stub";

/// The five generated views, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewStub {
    /// Listing with filters
    Index,
    /// Create page
    Create,
    /// Edit page
    Edit,
    /// Form partial shared by create and edit
    Form,
    /// Read-only page
    Show,
}

impl ViewStub {
    /// Generation order
    pub const ALL: [Self; 5] = [Self::Index, Self::Create, Self::Edit, Self::Form, Self::Show];

    /// View name, also the generated file's stem
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Form => "form",
            Self::Show => "show",
        }
    }
}

/// A named template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stub {
    /// Resource controller
    Controller,
    /// Eloquent model
    Model,
    /// Default application layout
    Layout,
    /// One of the five views
    View(ViewStub),
    /// Read-only row for the show view
    ViewField,
    /// Form input for a widget kind
    FormField(WidgetKind),
}

impl Stub {
    /// Every stub the generator can load
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut stubs = vec![Self::Controller, Self::Model, Self::Layout];
        stubs.extend(ViewStub::ALL.map(Self::View));
        stubs.push(Self::ViewField);
        stubs.extend(WidgetKind::ALL.map(Self::FormField));
        stubs
    }

    /// Store name, e.g. `Controller`, `views/index`, `views/fields/select`
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Controller => "Controller".to_string(),
            Self::Model => "Model".to_string(),
            Self::Layout => "layouts/app".to_string(),
            Self::View(view) => format!("views/{}", view.as_str()),
            Self::ViewField => "views/view-field".to_string(),
            Self::FormField(widget) => format!("views/fields/{}", widget.as_str()),
        }
    }

    /// Text of the built-in default
    #[must_use]
    pub const fn embedded(self) -> &'static str {
        match self {
            Self::Controller => include_str!("../../stubs/Controller.stub"),
            Self::Model => include_str!("../../stubs/Model.stub"),
            Self::Layout => include_str!("../../stubs/layouts/app.stub"),
            Self::View(ViewStub::Index) => include_str!("../../stubs/views/index.stub"),
            Self::View(ViewStub::Create) => include_str!("../../stubs/views/create.stub"),
            Self::View(ViewStub::Edit) => include_str!("../../stubs/views/edit.stub"),
            Self::View(ViewStub::Form) => include_str!("../../stubs/views/form.stub"),
            Self::View(ViewStub::Show) => include_str!("../../stubs/views/show.stub"),
            Self::ViewField => include_str!("../../stubs/views/view-field.stub"),
            Self::FormField(WidgetKind::Text) => include_str!("../../stubs/views/fields/text.stub"),
            Self::FormField(WidgetKind::TextArea) => {
                include_str!("../../stubs/views/fields/textarea.stub")
            }
            Self::FormField(WidgetKind::Checkbox) => {
                include_str!("../../stubs/views/fields/checkbox.stub")
            }
            Self::FormField(WidgetKind::Date) => include_str!("../../stubs/views/fields/date.stub"),
            Self::FormField(WidgetKind::Select) => {
                include_str!("../../stubs/views/fields/select.stub")
            }
        }
    }

    /// Relative file path below a stub directory
    #[must_use]
    pub fn file_name(self) -> PathBuf {
        PathBuf::from(format!("{}.{STUB_EXTENSION}", self.name()))
    }
}

impl fmt::Display for Stub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Source of stub text
pub trait TemplateStore {
    /// Load the text of `stub`
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::TemplateNotFound`] if the stub is not available
    fn load(&self, stub: Stub) -> CrudResult<String>;
}

/// The stubs compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStubs;

impl TemplateStore for EmbeddedStubs {
    fn load(&self, stub: Stub) -> CrudResult<String> {
        Ok(stub.embedded().to_string())
    }
}

/// Stubs read from a directory, optionally falling back to the embedded ones
#[derive(Debug, Clone)]
pub struct StubDirectory {
    root: PathBuf,
    fallback: bool,
}

impl StubDirectory {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>, fallback: bool) -> Self {
        Self {
            root: root.into(),
            fallback,
        }
    }

    /// Directory the stubs are read from
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a stub would be read from
    #[must_use]
    pub fn path_of(&self, stub: Stub) -> PathBuf {
        self.root.join(stub.file_name())
    }

    /// Copy the embedded stubs into the directory
    ///
    /// Existing files are kept unless `force` is set. Returns the files written.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be written
    pub fn publish(&self, force: bool) -> CrudResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for stub in Stub::all() {
            let path = self.path_of(stub);
            if path.exists() && !force {
                tracing::debug!(stub = %stub, "stub already published, keeping it");
                continue;
            }

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| CrudError::FileWrite {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, stub.embedded()).map_err(|source| CrudError::FileWrite {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        Ok(written)
    }

    /// Names of every `.stub` file present in the directory, sorted
    ///
    /// Includes files that do not correspond to any known stub.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked
    pub fn overridden(&self) -> CrudResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|err| CrudError::Io(err.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(STUB_EXTENSION)
            {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(&self.root) {
                let name = relative
                    .with_extension("")
                    .components()
                    .map(|part| part.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

impl TemplateStore for StubDirectory {
    fn load(&self, stub: Stub) -> CrudResult<String> {
        let path = self.path_of(stub);
        if path.is_file() {
            tracing::debug!(stub = %stub, path = %path.display(), "loading stub override");
            return fs::read_to_string(&path).map_err(|source| CrudError::TemplateUnreadable {
                stub: stub.name(),
                source,
            });
        }

        if self.fallback {
            Ok(stub.embedded().to_string())
        } else {
            Err(CrudError::TemplateNotFound(stub.name()))
        }
    }
}
