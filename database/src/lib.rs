//! Database crate for the todo item service
//!
//! This crate provides the SQLite implementation of the `ItemRepository`
//! and `ItemTransaction` traits on top of an `sqlx` connection pool.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file databases
//! - Embedded migrations for the `items` table
//! - Connection pooling with configurable size and acquire timeout
//! - Write transactions that roll back when dropped uncommitted
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteItemRepository;
//! use todo_core::{ItemRepository, ItemTransaction};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = SqliteItemRepository::new("sqlite::memory:").await?;
//!     repo.migrate().await?;
//!
//!     let mut tx = repo.begin().await?;
//!     let item = tx.create_item("first todo").await?;
//!     tx.commit().await?;
//!
//!     assert_eq!(repo.list_items().await?, vec![item]);
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::{PoolSettings, SqliteItemRepository, SqliteItemTransaction};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::Item,
    repository::{ItemRepository, ItemTransaction},
};
