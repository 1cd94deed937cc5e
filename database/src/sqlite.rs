use crate::common::{row_to_item, sqlx_error_to_todo_error};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};
use std::{str::FromStr, time::Duration};
use todo_core::{
    error::{Result, TodoError},
    models::Item,
    repository::{ItemRepository, ItemTransaction},
};

/// Connection pool sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long a request may wait for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// SQLite implementation of the ItemRepository trait
///
/// Wraps a shared connection pool. The pool is created once at startup and
/// handed to every handler through this value; cloning shares the pool.
#[derive(Debug, Clone)]
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    /// Create a new SQLite repository with default pool settings
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (`sqlite://path`, `sqlite::memory:`, or a bare path)
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteItemRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteItemRepository::new("sqlite::memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteItemRepository::new("sqlite:///tmp/todo.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_settings(database_url, PoolSettings::default()).await
    }

    /// Create a new SQLite repository with explicit pool settings
    pub async fn with_settings(database_url: &str, settings: PoolSettings) -> Result<Self> {
        let db_url = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{database_url}")
        };
        let in_memory = db_url.contains(":memory:");

        let connect_options = SqliteConnectOptions::from_str(&db_url)
            .map_err(|e| TodoError::Configuration(format!("Invalid database URL '{db_url}': {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = if in_memory {
            // Every connection to :memory: is a separate database, so keep
            // exactly one connection alive for the life of the pool
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(connect_options.journal_mode(SqliteJournalMode::Memory))
                .await
        } else {
            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(connect_options.journal_mode(SqliteJournalMode::Wal))
                .await
        }
        .map_err(sqlx_error_to_todo_error)?;

        tracing::info!(
            database_url = %db_url,
            max_connections = if in_memory { 1 } else { settings.max_connections },
            "Database pool opened"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    ///
    /// Applies all pending migrations. Already-applied migrations are skipped,
    /// so this is safe to call on every startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection; used during shutdown
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    type Transaction = SqliteItemTransaction;

    async fn list_items(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query("SELECT id, title, updated_at FROM items ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(count = rows.len(), "Listed items");
        rows.iter().map(row_to_item).collect()
    }

    async fn begin(&self) -> Result<SqliteItemTransaction> {
        let tx = self.pool.begin().await.map_err(sqlx_error_to_todo_error)?;
        Ok(SqliteItemTransaction { tx })
    }

    async fn health_check(&self) -> Result<()> {
        // Simple query to verify database connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(())
    }
}

/// An open SQLite write transaction
///
/// The inner `sqlx::Transaction` issues a rollback when dropped without a
/// commit, which covers early returns, errors, and cancelled futures.
#[derive(Debug)]
pub struct SqliteItemTransaction {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl ItemTransaction for SqliteItemTransaction {
    async fn create_item(&mut self, title: &str) -> Result<Item> {
        let row = sqlx::query("INSERT INTO items (title) VALUES (?) RETURNING id, title, updated_at")
            .bind(title)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        row_to_item(&row)
    }

    async fn update_item(&mut self, id: i64, title: &str) -> Result<Item> {
        // MAX keeps updated_at from moving backwards if the clock steps back
        let row = sqlx::query(
            r#"
            UPDATE items
            SET title = ?, updated_at = MAX(updated_at, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            WHERE id = ?
            RETURNING id, title, updated_at
            "#,
        )
        .bind(title)
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        match row {
            Some(row) => row_to_item(&row),
            None => Err(TodoError::not_found_id(id)),
        }
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(sqlx_error_to_todo_error)
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(sqlx_error_to_todo_error)
    }
}
