//! HTTP server for the todo item API
//!
//! Builds the `axum` router and runs it until the shutdown signal fires.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::HeaderName,
    middleware,
    routing::{get, put},
    Json, Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
};
use tracing::info;

use crate::{
    error::ApiError,
    handler::TodoItemHandler,
    request_logger,
    serialization::{into_item_response, into_item_responses, GetResponse, ItemEnvelope},
};
use todo_core::{CreateItemParams, HealthStatus, ItemRepository, TodoHandler, UpdateItemParams};

/// Deadline applied to every request unless configured otherwise
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared server state for route handlers
pub struct ServerState<R> {
    pub handler: TodoItemHandler<R>,
}

/// HTTP server for the todo item API
pub struct TodoServer<R> {
    handler: TodoItemHandler<R>,
    request_timeout: Duration,
}

impl<R: ItemRepository + 'static> TodoServer<R> {
    /// Create new server over a shared repository
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            handler: TodoItemHandler::new(repository),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request deadline
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Bind `addr` and serve until `shutdown` resolves
    ///
    /// In-flight requests are allowed to finish after the signal.
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid address '{addr}': {e}"))?;

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(socket_addr).await?;
        info!(address = %listener.local_addr()?, "Todo server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Todo server stopped");
        Ok(())
    }

    /// Create the router with all endpoints
    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            handler: self.handler.clone(),
        });

        let routes = Router::new()
            .route("/api/todo", get(list_items_handler::<R>).post(create_item_handler::<R>))
            .route("/api/todo/:id", put(update_item_handler::<R>))
            .route("/health", get(health_handler::<R>))
            .with_state(state);

        with_middleware(routes, self.request_timeout)
    }
}

/// Wrap routes in the request middleware stack
///
/// Outermost first: request id assignment, request id propagation to the
/// response, request logging, panic recovery, then the deadline.
pub fn with_middleware(routes: Router, request_timeout: Duration) -> Router {
    routes
        .layer(middleware::from_fn_with_state(
            request_timeout,
            request_logger::request_deadline_middleware,
        ))
        .layer(CatchPanicLayer::custom(request_logger::handle_panic))
        .layer(middleware::from_fn(request_logger::request_logging_middleware))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
}

fn request_id_header() -> HeaderName {
    HeaderName::from_static(request_logger::REQUEST_ID_HEADER)
}

async fn list_items_handler<R: ItemRepository + 'static>(
    State(state): State<Arc<ServerState<R>>>,
) -> Result<Json<GetResponse>, ApiError> {
    let items = state.handler.list_items().await?;
    Ok(Json(GetResponse {
        items: into_item_responses(&items),
    }))
}

async fn create_item_handler<R: ItemRepository + 'static>(
    State(state): State<Arc<ServerState<R>>>,
    body: Result<Json<CreateItemParams>, JsonRejection>,
) -> Result<Json<ItemEnvelope>, ApiError> {
    let Json(params) = body?;
    let item = state.handler.create_item(params).await?;
    Ok(Json(ItemEnvelope {
        item: into_item_response(&item),
    }))
}

async fn update_item_handler<R: ItemRepository + 'static>(
    State(state): State<Arc<ServerState<R>>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateItemParams>, JsonRejection>,
) -> Result<Json<ItemEnvelope>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let item = state
        .handler
        .update_item(UpdateItemParams::from_body(id, body))
        .await?;
    Ok(Json(ItemEnvelope {
        item: into_item_response(&item),
    }))
}

async fn health_handler<R: ItemRepository + 'static>(
    State(state): State<Arc<ServerState<R>>>,
) -> Result<Json<HealthStatus>, ApiError> {
    Ok(Json(state.handler.health_check().await?))
}
