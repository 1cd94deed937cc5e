use async_trait::async_trait;
use crate::{error::Result, models::Item};

/// Repository trait for item persistence and retrieval
///
/// Reads go straight to the shared pool. Writes go through a transaction
/// obtained from [`ItemRepository::begin`]. Implementations must be
/// thread-safe and support concurrent access.
///
/// All methods are cancellable: dropping the returned future aborts the
/// in-flight statement.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Transaction handle produced by this repository
    type Transaction: ItemTransaction;

    /// List every item ordered by ascending ID
    ///
    /// # Returns
    /// * `Ok(Vec<Item>)` - All items (empty when the table is empty)
    /// * `Err(TodoError::Database)` - If the query fails
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Begin a write transaction
    ///
    /// # Returns
    /// * `Ok(Self::Transaction)` - An open transaction holding a connection
    /// * `Err(TodoError::Database)` - If no connection could be acquired
    async fn begin(&self) -> Result<Self::Transaction>;

    /// Check that storage is reachable
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TodoError::Database)` - Repository is unhealthy
    async fn health_check(&self) -> Result<()>;
}

/// An open write transaction.
///
/// Dropping the handle without calling [`ItemTransaction::commit`] rolls
/// the transaction back, so every exit path releases it exactly once.
#[async_trait]
pub trait ItemTransaction: Send {
    /// Insert a new item
    ///
    /// # Arguments
    /// * `title` - The item title (already validated)
    ///
    /// # Returns
    /// * `Ok(Item)` - The inserted row with storage-assigned ID and timestamp
    /// * `Err(TodoError::Database)` - If the statement fails
    async fn create_item(&mut self, title: &str) -> Result<Item>;

    /// Replace an item's title and refresh its timestamp
    ///
    /// # Arguments
    /// * `id` - The item to update
    /// * `title` - The new title (already validated)
    ///
    /// # Returns
    /// * `Ok(Item)` - The updated row
    /// * `Err(TodoError::NotFound)` - If no row has that ID
    /// * `Err(TodoError::Database)` - If the statement fails
    async fn update_item(&mut self, id: i64, title: &str) -> Result<Item>;

    /// Make the writes visible; consumes the handle
    async fn commit(self) -> Result<()>;

    /// Discard the writes explicitly; consumes the handle
    async fn rollback(self) -> Result<()>;
}
