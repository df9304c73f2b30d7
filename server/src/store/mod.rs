//! Document store primitives behind the todo service.
//!
//! # Design
//! `TodoStore` mirrors the five primitives of a document collection. By-id
//! primitives return `Ok(None)` when the id is well formed but absent, and
//! `Err(TodoError::InvalidId)` when it cannot be an id at all. Backends
//! validate input with the shared checks in `crate::model`.

mod memory;
#[cfg(feature = "mongodb")]
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::TodoError;
use crate::model::{NewTodo, Todo, TodoPatch};

pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

/// Options for `find_by_id_and_update`. The service always uses
/// `UpdateOptions::default()`; there is no way to pass others over HTTP.
/// Fields present in the patch are always validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Return the record after the update instead of before it.
    pub return_updated: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            return_updated: true,
        }
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, draft: NewTodo) -> Result<Todo, TodoError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<Todo>, TodoError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, TodoError>;

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: TodoPatch,
        options: UpdateOptions,
    ) -> Result<Option<Todo>, TodoError>;

    /// Removes the record and returns its last state.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>, TodoError>;
}

/// Failures opening the store at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("database configured but the server was built without the `mongodb` feature")]
    MongoDisabled,

    #[error("could not connect to the database: {0}")]
    Store(#[from] TodoError),
}

/// Open the store selected by `config`.
pub async fn connect(config: &Config) -> Result<Arc<dyn TodoStore>, ConnectError> {
    match &config.database {
        None => {
            tracing::warn!("no database configured, todos are kept in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "mongodb")]
        Some(database) => {
            let store = MongoStore::connect(&database.connection_string()).await?;
            tracing::info!(cluster = %database.cluster, "connected to mongodb");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb"))]
        Some(_) => Err(ConnectError::MongoDisabled),
    }
}
