//! Testing utilities for the generation pipeline
//!
//! In-memory stand-ins for every collaborator of the
//! [`Orchestrator`](crate::Orchestrator), so a whole run can be exercised
//! without a database, a terminal or a filesystem:
//! - [`MemoryMetadata`] - tables served from a map
//! - [`MemoryStubs`] - embedded stubs with per-stub overrides and removals
//! - [`MemoryFiles`] - files kept in a map, with a log of writes
//! - [`ScriptedPrompter`] - answers from a queue, records every message
//!
//! # Example
//!
//! ```rust
//! use crudgen::schema::{ColumnDescriptor, SqlType, TableDescriptor};
//! use crudgen::testing::{MemoryFiles, MemoryMetadata, MemoryStubs, ScriptedPrompter};
//! use crudgen::{CrudConfig, GenerateRequest, Orchestrator};
//!
//! let metadata = MemoryMetadata::new().with_table(TableDescriptor::new(
//!     "products",
//!     vec![ColumnDescriptor::new("name", SqlType::String, false)],
//! ));
//! let stubs = MemoryStubs::new();
//! let files = MemoryFiles::new();
//! let prompter = ScriptedPrompter::new(Vec::<String>::new());
//! let config = CrudConfig::default();
//!
//! let orchestrator = Orchestrator::new(&config, &metadata, &stubs, &files, &prompter);
//! let outcome = orchestrator.run(&GenerateRequest::new("products")).unwrap();
//! assert!(outcome.succeeded());
//! assert_eq!(files.write_count(), 8);
//! ```

pub mod assertions;

pub use assertions::*;

use crate::error::{CrudError, CrudResult};
use crate::files::FileWriter;
use crate::prompt::Prompter;
use crate::schema::{MetadataSource, TableDescriptor};
use crate::stubs::{Stub, TemplateStore};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Tables held in memory
#[derive(Debug, Default)]
pub struct MemoryMetadata {
    tables: HashMap<String, TableDescriptor>,
    describe_calls: RefCell<usize>,
}

impl MemoryMetadata {
    /// No tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table
    #[must_use]
    pub fn with_table(mut self, table: TableDescriptor) -> Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// How many times columns were read
    #[must_use]
    pub fn describe_calls(&self) -> usize {
        *self.describe_calls.borrow()
    }
}

impl MetadataSource for MemoryMetadata {
    fn table_exists(&self, table: &str) -> CrudResult<bool> {
        Ok(self.tables.contains_key(table))
    }

    fn describe(&self, table: &str) -> CrudResult<TableDescriptor> {
        *self.describe_calls.borrow_mut() += 1;
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| CrudError::TableNotFound(table.to_string()))
    }
}

/// Embedded stubs with test overrides
#[derive(Debug, Default)]
pub struct MemoryStubs {
    overrides: HashMap<Stub, String>,
    missing: HashSet<Stub>,
}

impl MemoryStubs {
    /// Serve the embedded stubs
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text of one stub
    #[must_use]
    pub fn with_stub(mut self, stub: Stub, text: impl Into<String>) -> Self {
        self.overrides.insert(stub, text.into());
        self
    }

    /// Make one stub fail to load
    #[must_use]
    pub fn without_stub(mut self, stub: Stub) -> Self {
        self.missing.insert(stub);
        self
    }
}

impl TemplateStore for MemoryStubs {
    fn load(&self, stub: Stub) -> CrudResult<String> {
        if self.missing.contains(&stub) {
            return Err(CrudError::TemplateNotFound(stub.name()));
        }
        Ok(self
            .overrides
            .get(&stub)
            .cloned()
            .unwrap_or_else(|| stub.embedded().to_string()))
    }
}

/// Files kept in memory
#[derive(Debug, Default)]
pub struct MemoryFiles {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: RefCell<Vec<PathBuf>>,
    fail_on: Option<PathBuf>,
}

impl MemoryFiles {
    /// No files
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-existing file
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Make writes to `path` fail
    #[must_use]
    pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_on = Some(path.into());
        self
    }

    /// Contents of a file
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Every write, in order
    #[must_use]
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.borrow().clone()
    }

    /// Number of writes performed
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl FileWriter for MemoryFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn write(&self, path: &Path, contents: &str) -> CrudResult<()> {
        if self.fail_on.as_deref() == Some(path) {
            return Err(CrudError::FileWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Prompter answering from a script
///
/// Once the script runs out every question gets its default answer.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    questions: RefCell<Vec<String>>,
    infos: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    /// Answer with `answers`, in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Questions asked so far
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions.borrow().clone()
    }

    /// Progress messages so far
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    /// Error messages so far
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str, default: &str) -> CrudResult<String> {
        self.questions.borrow_mut().push(question.to_string());
        Ok(self
            .answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| default.to_string()))
    }

    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
