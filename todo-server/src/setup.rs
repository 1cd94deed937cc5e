use anyhow::{Context, Result};
use database::SqliteItemRepository;
use std::path::Path;
use std::sync::Arc;
use todo_http_api::{ItemRepository, TodoServer};
use tracing::info;

use crate::config::Config;

/// The wired-up application: the HTTP server plus the pool it shares
pub struct App {
    pub server: TodoServer<SqliteItemRepository>,
    pub repository: Arc<SqliteItemRepository>,
}

/// Open the database pool, apply migrations and verify connectivity
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteItemRepository>> {
    config.validate().context("Invalid configuration")?;

    let database_url = &config.database.url;
    ensure_database_directory(database_url).context("Failed to create database directory")?;

    info!(database_url = %database_url, "Initializing SQLite repository");
    let repo = SqliteItemRepository::with_settings(database_url, config.pool_settings())
        .await
        .context("Failed to create SQLite repository")?;

    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    repo.health_check()
        .await
        .context("Database health check failed")?;

    info!("Item repository created successfully");
    Ok(Arc::new(repo))
}

/// Create the HTTP server over a shared repository
pub fn create_server(
    repository: Arc<SqliteItemRepository>,
    config: &Config,
) -> TodoServer<SqliteItemRepository> {
    TodoServer::new(repository).with_request_timeout(config.request_timeout())
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<App> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;
    let server = create_server(repository.clone(), config);

    info!("Application initialized successfully");
    Ok(App { server, repository })
}

/// Ensure the parent directory of a file database exists
///
/// In-memory URLs are left alone. New directories are owner-only on Unix.
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(db_path) = database_file_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }

    Ok(())
}

/// File path named by a SQLite URL, or `None` for in-memory databases
fn database_file_path(database_url: &str) -> Option<&Path> {
    if database_url.contains(":memory:") {
        return None;
    }

    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    // Drop connection parameters such as ?mode=rwc
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() {
        None
    } else {
        Some(Path::new(path))
    }
}
