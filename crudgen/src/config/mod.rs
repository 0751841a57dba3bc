//! Configuration management for crudgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDGEN_` prefix, `__` for nesting)
//! 2. `DATABASE_URL`, mapped to `database.url`
//! 3. `./crudgen.toml`, or the file given with `--config`
//! 4. `~/.config/crudgen/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # crudgen.toml
//! [generator]
//! layout = "layouts.app"
//! model_namespace = "App\\Models"
//! controller_namespace = "App\\Http\\Controllers"
//!
//! [stubs]
//! path = "stubs/crud"
//! fallback = true
//!
//! [paths]
//! root = "."
//! app = "app"
//! views = "resources/views"
//!
//! [database]
//! url = "sqlite://database/database.sqlite"
//! ```

use crate::classifier::{ColumnClassifier, DEFAULT_UNWANTED_COLUMNS};
use crate::error::{CrudError, CrudResult};
use crate::paths::ArtifactPaths;
use crate::stubs::{EmbeddedStubs, StubDirectory, TemplateStore};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "crudgen.toml";

/// The layout that is created on demand when missing
pub const DEFAULT_LAYOUT: &str = "layouts.app";

/// Stub directory used by `stubs publish` when none is configured
pub const DEFAULT_STUB_PATH: &str = "stubs/crud";

/// Generated code conventions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Blade layout the views extend
    pub layout: String,

    /// Namespace of generated models
    pub model_namespace: String,

    /// Namespace of generated controllers
    pub controller_namespace: String,

    /// Columns left out of views, forms and `$fillable`
    pub unwanted_columns: Vec<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            model_namespace: "App\\Models".to_string(),
            controller_namespace: "App\\Http\\Controllers".to_string(),
            unwanted_columns: DEFAULT_UNWANTED_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Where stubs come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubSettings {
    /// Override directory; [`DEFAULT_STUB_PATH`] is used when unset and present
    pub path: Option<PathBuf>,

    /// Use the embedded stub when the override directory lacks one
    pub fallback: bool,
}

impl Default for StubSettings {
    fn default() -> Self {
        Self {
            path: None,
            fallback: true,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Project root all other paths are relative to
    pub root: PathBuf,

    /// Application code directory (`app`)
    pub app: PathBuf,

    /// Blade views directory
    pub views: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            app: PathBuf::from("app"),
            views: PathBuf::from("resources/views"),
        }
    }
}

/// Database connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `sqlite://...` or `postgres://...`
    pub url: Option<String>,
}

/// Complete crudgen configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudConfig {
    /// Code conventions
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Stub source
    #[serde(default)]
    pub stubs: StubSettings,

    /// Output locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Database connection
    #[serde(default)]
    pub database: DatabaseSettings,
}

impl CrudConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value
    /// has the wrong type
    pub fn load() -> CrudResult<Self> {
        Self::load_layers(&[Self::recommended_path(), PathBuf::from(LOCAL_CONFIG_FILE)])
    }

    /// Load configuration with a specific project file in place of `./crudgen.toml`
    ///
    /// The user config still applies underneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be parsed
    pub fn load_from(path: &Path) -> CrudResult<Self> {
        if !path.exists() {
            return Err(CrudError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        Self::load_layers(&[Self::recommended_path(), path.to_path_buf()])
    }

    /// Merge the files that exist over the defaults, later files winning,
    /// then apply the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a value has the wrong type
    pub fn load_layers(files: &[PathBuf]) -> CrudResult<Self> {
        let mut figment = Self::defaults()?;
        for file in files.iter().filter(|file| file.exists()) {
            tracing::debug!(path = %file.display(), "merging config file");
            figment = figment.merge(Toml::file(file));
        }
        Self::extract(Self::with_environment(figment))
    }

    /// Extract from an already assembled figment
    ///
    /// # Errors
    ///
    /// Returns an error if the figment does not describe a valid configuration
    pub fn extract(figment: Figment) -> CrudResult<Self> {
        let config: Self = figment.extract()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Figment seeded with the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the defaults cannot be serialized
    pub fn defaults() -> CrudResult<Figment> {
        let defaults =
            toml::to_string(&Self::default()).map_err(|err| CrudError::Config(err.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn with_environment(figment: Figment) -> Figment {
        figment
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL"])
                    .map(|_| "database.url".into()),
            )
            .merge(Env::prefixed("CRUDGEN_").split("__"))
    }

    /// The recommended XDG config path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("crudgen").join("config.toml"),
        )
    }

    /// Classifier using the configured exclusion list
    #[must_use]
    pub fn classifier(&self) -> ColumnClassifier {
        ColumnClassifier::new(self.generator.unwanted_columns.iter().cloned())
    }

    /// Destination paths for generated artifacts
    #[must_use]
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(
            &self.paths.app,
            &self.paths.views,
            &self.generator.model_namespace,
            &self.generator.controller_namespace,
        )
    }

    /// The configured stub source
    ///
    /// The stub directory is used when `stubs.path` is set or when the default
    /// directory exists, so stubs written by `stubs publish` take effect.
    #[must_use]
    pub fn template_store(&self) -> Box<dyn TemplateStore> {
        let directory = self.stub_directory();
        if self.stubs.path.is_some() || directory.root().is_dir() {
            Box::new(directory)
        } else {
            Box::new(EmbeddedStubs)
        }
    }

    /// The override directory, [`DEFAULT_STUB_PATH`] when none is configured
    #[must_use]
    pub fn stub_directory(&self) -> StubDirectory {
        let path = self
            .stubs
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STUB_PATH));
        StubDirectory::new(self.paths.root.join(path), self.stubs.fallback)
    }

    /// The configured database URL
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured
    pub fn database_url(&self) -> CrudResult<&str> {
        self.database.url.as_deref().ok_or_else(|| {
            CrudError::Config(
                "no database url; set database.url, DATABASE_URL or --database-url".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stubs::Stub;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CrudConfig::default();
        assert_eq!(config.generator.layout, "layouts.app");
        assert_eq!(config.generator.model_namespace, "App\\Models");
        assert_eq!(config.generator.unwanted_columns.len(), 9);
        assert!(config.stubs.fallback);
        assert_eq!(config.paths.views, PathBuf::from("resources/views"));
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_defaults_round_trip_through_figment() {
        let config = CrudConfig::extract(CrudConfig::defaults().unwrap()).unwrap();
        assert_eq!(config, CrudConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let figment = CrudConfig::defaults().unwrap().merge(Toml::string(
            r#"
            [generator]
            layout = "layouts.admin"
            unwanted_columns = ["id", "secret"]

            [stubs]
            path = "stubs/crud"
            "#,
        ));
        let config = CrudConfig::extract(figment).unwrap();

        assert_eq!(config.generator.layout, "layouts.admin");
        assert_eq!(config.generator.controller_namespace, "App\\Http\\Controllers");
        assert!(config.classifier().is_unwanted("secret"));
        assert!(!config.classifier().is_unwanted("created_at"));
        assert_eq!(config.stubs.path, Some(PathBuf::from("stubs/crud")));
        assert!(config.stubs.fallback);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crudgen.toml");
        fs::write(&path, "[paths]\napp = \"src/app\"\n").unwrap();

        let config = CrudConfig::load_from(&path).unwrap();
        assert_eq!(config.paths.app, PathBuf::from("src/app"));
        assert_eq!(config.paths.views, PathBuf::from("resources/views"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        let err = CrudConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CrudError::Config(_)));
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let figment = CrudConfig::defaults()
            .unwrap()
            .merge(Toml::string("[stubs]\nfallback = \"sometimes\"\n"));
        assert!(matches!(
            CrudConfig::extract(figment).unwrap_err(),
            CrudError::Config(_)
        ));
    }

    #[test]
    fn test_stub_directory_below_root() {
        let mut config = CrudConfig::default();
        config.paths.root = PathBuf::from("/srv/app");
        assert_eq!(
            config.stub_directory().root(),
            Path::new("/srv/app/stubs/crud")
        );

        config.stubs.path = Some(PathBuf::from("resources/stubs"));
        assert_eq!(
            config.stub_directory().root(),
            Path::new("/srv/app/resources/stubs")
        );
    }

    #[test]
    fn test_published_stubs_used_without_path() {
        let dir = tempdir().unwrap();
        let mut config = CrudConfig::default();
        config.paths.root = dir.path().to_path_buf();

        assert_eq!(
            config.template_store().load(Stub::Controller).unwrap(),
            Stub::Controller.embedded()
        );

        let directory = config.stub_directory();
        directory.publish(false).unwrap();
        fs::write(directory.path_of(Stub::Controller), "EDITED {{modelName}}").unwrap();

        let store = config.template_store();
        assert_eq!(store.load(Stub::Controller).unwrap(), "EDITED {{modelName}}");
        assert_eq!(store.load(Stub::Model).unwrap(), Stub::Model.embedded());
    }

    #[test]
    fn test_user_config_below_project_file() {
        let dir = tempdir().unwrap();
        let user = dir.path().join("user.toml");
        let project = dir.path().join("crudgen.toml");
        fs::write(
            &user,
            "[generator]\nlayout = \"layouts.admin\"\n\n[paths]\napp = \"user/app\"\n",
        )
        .unwrap();
        fs::write(&project, "[paths]\napp = \"src/app\"\n").unwrap();

        let config =
            CrudConfig::load_layers(&[user, project, dir.path().join("absent.toml")]).unwrap();
        assert_eq!(config.generator.layout, "layouts.admin");
        assert_eq!(config.paths.app, PathBuf::from("src/app"));
    }

    #[test]
    fn test_missing_database_url() {
        let config = CrudConfig::default();
        assert!(config.database_url().is_err());

        let config = CrudConfig {
            database: DatabaseSettings {
                url: Some("sqlite::memory:".to_string()),
            },
            ..CrudConfig::default()
        };
        assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
    }
}
