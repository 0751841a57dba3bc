//! Writing generated artifacts

use crate::error::{CrudError, CrudResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for generated files
///
/// Paths handed to a writer are relative to the project root.
pub trait FileWriter {
    /// Whether a file already exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Write `contents` to `path`, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::FileWrite`] if the file or a directory cannot be written
    fn write(&self, path: &Path, contents: &str) -> CrudResult<()>;
}

/// Writes below a project root on the local filesystem
#[derive(Debug, Clone)]
pub struct DiskWriter {
    root: PathBuf,
}

impl DiskWriter {
    /// Create a writer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a relative path
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileWriter for DiskWriter {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn write(&self, path: &Path, contents: &str) -> CrudResult<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|source| CrudError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&full_path, contents).map_err(|source| CrudError::FileWrite {
            path: full_path.clone(),
            source,
        })?;

        tracing::debug!(path = %full_path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_directories() {
        let dir = tempdir().unwrap();
        let writer = DiskWriter::new(dir.path());
        let path = Path::new("resources/views/product/index.blade.php");

        assert!(!writer.exists(path));
        writer.write(path, "<table>").unwrap();
        assert!(writer.exists(path));
        assert_eq!(fs::read_to_string(dir.path().join(path)).unwrap(), "<table>");
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempdir().unwrap();
        let writer = DiskWriter::new(dir.path());
        let path = Path::new("app/Models/Product.php");

        writer.write(path, "old").unwrap();
        writer.write(path, "new").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(path)).unwrap(), "new");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app"), "not a directory").unwrap();
        let writer = DiskWriter::new(dir.path());

        let err = writer
            .write(Path::new("app/Models/Product.php"), "x")
            .unwrap_err();
        assert!(matches!(err, CrudError::FileWrite { .. }));
    }
}
