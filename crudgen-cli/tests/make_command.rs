//! Integration tests for `crudgen make` against a SQLite project

use clap::Parser;
use crudgen_cli_lib::{Cli, Commands};
use sqlx::sqlite::SqlitePoolOptions;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a project directory with a database and a `crudgen.toml`
fn project() -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("app.sqlite").display());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime.block_on(async {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE products (
                id INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                price DECIMAL(8, 2) NOT NULL,
                in_stock BOOLEAN NOT NULL,
                created_at TIMESTAMP
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;
    });

    fs::write(
        dir.path().join("crudgen.toml"),
        format!("[paths]\nroot = {:?}\n", dir.path().display().to_string()),
    )
    .unwrap();

    (dir, url)
}

fn parse(project: &Path, url: &str, args: &[&str]) -> Cli {
    let config = project.join("crudgen.toml");
    let mut argv = vec![
        "crudgen",
        "--config",
        config.to_str().unwrap(),
        "--database-url",
        url,
    ];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_make_writes_project_files() {
    let (dir, url) = project();
    let cli = parse(dir.path(), &url, &["make", "products", "--route", "shop"]);
    let config = cli.load_config().unwrap();

    let Commands::Make(command) = &cli.command else {
        panic!("expected the make command");
    };
    assert!(command.execute(&config).unwrap());

    let root = dir.path();
    let controller =
        fs::read_to_string(root.join("app/Http/Controllers/ProductController.php")).unwrap();
    assert!(controller.contains("->route('shop.index')"));

    let model = fs::read_to_string(root.join("app/Models/Product.php")).unwrap();
    assert!(model.contains("protected $fillable = ['name', 'price', 'in_stock'];"));

    for view in ["index", "create", "edit", "form", "show"] {
        assert!(
            root.join(format!("resources/views/product/{view}.blade.php"))
                .exists(),
            "{view} view missing"
        );
    }
    assert!(root.join("resources/views/layouts/app.blade.php").exists());
}

#[test]
fn test_make_unknown_table_reports_failure() {
    let (dir, url) = project();
    let cli = parse(dir.path(), &url, &["make", "orders"]);
    let config = cli.load_config().unwrap();

    let Commands::Make(command) = &cli.command else {
        panic!("expected the make command");
    };
    assert!(!command.execute(&config).unwrap());
    assert!(!dir.path().join("app").exists());
}
