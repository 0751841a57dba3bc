//! Destination paths for generated artifacts

use crate::naming::{ClassName, NamingHelpers};
use crate::stubs::ViewStub;
use std::path::{Path, PathBuf};

/// Extension of generated Blade views
pub const VIEW_EXTENSION: &str = "blade.php";

/// Maps class names to the files generated for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    controllers: PathBuf,
    models: PathBuf,
    views: PathBuf,
}

impl ArtifactPaths {
    /// Build from the app and views directories and the configured namespaces
    ///
    /// Namespaces below `App` become subdirectories of `app_dir`.
    #[must_use]
    pub fn new(
        app_dir: &Path,
        views_dir: &Path,
        model_namespace: &str,
        controller_namespace: &str,
    ) -> Self {
        Self {
            controllers: app_dir.join(NamingHelpers::namespace_dir(controller_namespace)),
            models: app_dir.join(NamingHelpers::namespace_dir(model_namespace)),
            views: views_dir.to_path_buf(),
        }
    }

    /// `app/Http/Controllers/ProductController.php`
    #[must_use]
    pub fn controller(&self, name: &ClassName) -> PathBuf {
        self.controllers.join(format!("{name}Controller.php"))
    }

    /// `app/Models/Product.php`
    #[must_use]
    pub fn model(&self, name: &ClassName) -> PathBuf {
        self.models.join(format!("{name}.php"))
    }

    /// `resources/views/product/index.blade.php`
    #[must_use]
    pub fn view(&self, name: &ClassName, view: ViewStub) -> PathBuf {
        self.views
            .join(name.kebab())
            .join(format!("{}.{VIEW_EXTENSION}", view.as_str()))
    }

    /// `resources/views/layouts/app.blade.php` for layout `layouts.app`
    #[must_use]
    pub fn layout(&self, layout: &str) -> PathBuf {
        let mut path = self.views.clone();
        path.extend(layout.split('.'));
        path.set_extension(VIEW_EXTENSION);
        path
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(
            Path::new("app"),
            Path::new("resources/views"),
            "App\\Models",
            "App\\Http\\Controllers",
        )
    }
}
