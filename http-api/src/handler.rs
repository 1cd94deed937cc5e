//! Todo item handler
//!
//! Implements the TodoHandler trait on top of an ItemRepository. Writes run
//! validate → begin → execute → commit; any early return drops the open
//! transaction, which rolls it back.

use async_trait::async_trait;
use std::sync::Arc;
use todo_core::{
    error::Result, CreateItemParams, HealthStatus, Item, ItemRepository, ItemTransaction,
    TodoHandler, UpdateItemParams, Validatable,
};
use tracing::{debug, info};

/// Handler that bridges the HTTP routes with an ItemRepository
pub struct TodoItemHandler<R> {
    repository: Arc<R>,
}

impl<R> Clone for TodoItemHandler<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R> TodoItemHandler<R> {
    /// Create new todo item handler
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ItemRepository> TodoHandler for TodoItemHandler<R> {
    async fn list_items(&self) -> Result<Vec<Item>> {
        self.repository.list_items().await
    }

    async fn create_item(&self, params: CreateItemParams) -> Result<Item> {
        params.validate()?;

        let mut tx = self.repository.begin().await?;
        let item = tx.create_item(&params.title).await?;
        tx.commit().await?;

        info!(id = item.id, "Created item");
        Ok(item)
    }

    async fn update_item(&self, params: UpdateItemParams) -> Result<Item> {
        params.validate()?;

        let mut tx = self.repository.begin().await?;
        let item = tx.update_item(params.id, &params.title).await?;
        tx.commit().await?;

        info!(id = item.id, "Updated item");
        Ok(item)
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        self.repository.health_check().await?;
        debug!("Health check passed");
        Ok(HealthStatus::healthy())
    }
}
