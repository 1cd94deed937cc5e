//! HTTP API for the todo item service
//!
//! This crate exposes the item operations over HTTP with `axum`:
//!
//! - `GET /api/todo` lists every item
//! - `POST /api/todo` creates an item from `{"title": ...}`
//! - `PUT /api/todo/:id` replaces an item's title
//! - `GET /health` reports storage connectivity
//!
//! Every response carries an `x-request-id` header and handler panics are
//! answered like any other server error.
//!
//! Every write runs in its own transaction. Client mistakes are answered
//! with 400, everything else with a generic 500 whose cause is only logged.
//!
//! # Usage
//!
//! ```no_run
//! use database::SqliteItemRepository;
//! use std::sync::Arc;
//! use todo_http_api::TodoServer;
//!
//! async fn start_server() -> anyhow::Result<()> {
//!     let repository = SqliteItemRepository::new("sqlite://todo.db").await?;
//!     repository.migrate().await?;
//!
//!     let server = TodoServer::new(Arc::new(repository));
//!     server.serve("127.0.0.1:8000", std::future::pending()).await
//! }
//! ```

pub mod error;
pub mod handler;
pub mod request_logger;
pub mod serialization;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use handler::TodoItemHandler;
pub use serialization::*;
pub use request_logger::REQUEST_ID_HEADER;
pub use server::{with_middleware, TodoServer, DEFAULT_REQUEST_TIMEOUT};

// Re-export core types for external consumers
pub use todo_core::{
    CreateItemParams, HealthStatus, Item, ItemRepository, ItemTransaction, TodoHandler,
    UpdateItemParams,
};
