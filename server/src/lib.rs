//! REST service for todo items.
//!
//! # Overview
//! `POST/GET /todos` and `GET/PUT/DELETE /todos/{id}` over a document store.
//! Requests flow route → `TodoService` → `TodoStore`; a store returning no
//! record becomes a 404 and any error becomes a 500 with its message.
//!
//! # Design
//! - The store handle is passed in explicitly; there is no global connection.
//! - `MemoryStore` is always available. `MongoStore` needs the `mongodb`
//!   feature and is selected by `config::Config`.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ApiError, TodoError};
pub use model::{NewTodo, Todo, TodoPatch};
pub use service::TodoService;
pub use store::{MemoryStore, TodoStore, UpdateOptions};

pub fn app(store: Arc<dyn TodoStore>) -> Router {
    routes::router(TodoService::new(store)).layer(TraceLayer::new_for_http())
}

/// `app` over a fresh `MemoryStore`.
pub fn memory_app() -> Router {
    app(Arc::new(MemoryStore::new()))
}

pub async fn run(listener: TcpListener, store: Arc<dyn TodoStore>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
