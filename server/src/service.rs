//! The five todo operations.
//!
//! Each operation is a single store call. By-id operations return
//! `Ok(None)` when the record does not exist; the caller decides what that
//! means on the wire.

use std::sync::Arc;

use crate::error::TodoError;
use crate::model::{NewTodo, Todo, TodoPatch};
use crate::store::{TodoStore, UpdateOptions};

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, draft: NewTodo) -> Result<Todo, TodoError> {
        let todo = self.store.create(draft).await?;
        tracing::debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    #[tracing::instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        self.store.find_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        self.store.find_by_id(id).await
    }

    /// Applies `patch` with the fixed `UpdateOptions::default()`.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Option<Todo>, TodoError> {
        self.store
            .find_by_id_and_update(id, patch, UpdateOptions::default())
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let removed = self.store.find_by_id_and_delete(id).await?;
        if removed.is_some() {
            tracing::debug!("todo deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::store::MemoryStore;

    /// Fails every call and records the options it was given.
    #[derive(Default)]
    struct FailingStore {
        seen_options: Mutex<Vec<UpdateOptions>>,
    }

    fn unavailable() -> TodoError {
        TodoError::Store("Respond doesn't return any document.".to_string())
    }

    #[async_trait]
    impl TodoStore for FailingStore {
        async fn create(&self, _draft: NewTodo) -> Result<Todo, TodoError> {
            Err(unavailable())
        }

        async fn find_all(&self) -> Result<Vec<Todo>, TodoError> {
            Err(unavailable())
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Todo>, TodoError> {
            Err(unavailable())
        }

        async fn find_by_id_and_update(
            &self,
            _id: &str,
            _patch: TodoPatch,
            options: UpdateOptions,
        ) -> Result<Option<Todo>, TodoError> {
            self.seen_options.lock().unwrap().push(options);
            Err(unavailable())
        }

        async fn find_by_id_and_delete(&self, _id: &str) -> Result<Option<Todo>, TodoError> {
            Err(unavailable())
        }
    }

    fn memory_service() -> TodoService {
        TodoService::new(Arc::new(MemoryStore::new()))
    }

    fn draft(title: &str, done: bool) -> NewTodo {
        NewTodo {
            title: Some(title.to_string()),
            done: Some(done),
        }
    }

    #[tokio::test]
    async fn store_errors_are_returned_unchanged() {
        let service = TodoService::new(Arc::new(FailingStore::default()));
        let id = "00000000-0000-0000-0000-000000000000";
        let expected = unavailable().to_string();

        assert_eq!(service.create(draft("x", false)).await.unwrap_err().to_string(), expected);
        assert_eq!(service.list().await.unwrap_err().to_string(), expected);
        assert_eq!(service.get(id).await.unwrap_err().to_string(), expected);
        assert_eq!(
            service.update(id, TodoPatch::default()).await.unwrap_err().to_string(),
            expected
        );
        assert_eq!(service.delete(id).await.unwrap_err().to_string(), expected);
    }

    #[tokio::test]
    async fn update_always_uses_default_options() {
        let store = Arc::new(FailingStore::default());
        let service = TodoService::new(store.clone());
        let _ = service
            .update("00000000-0000-0000-0000-000000000000", TodoPatch::default())
            .await;
        assert_eq!(*store.seen_options.lock().unwrap(), [UpdateOptions::default()]);
    }

    #[tokio::test]
    async fn created_ids_round_trip_through_get() {
        let service = memory_service();
        for (title, done) in [("a", true), ("b", false), ("c", true)] {
            let created = service.create(draft(title, done)).await.unwrap();
            let fetched = service.get(&created.id).await.unwrap();
            assert_eq!(fetched, Some(created));
        }
    }

    #[tokio::test]
    async fn update_overwrites_provided_fields() {
        let service = memory_service();
        let created = service.create(draft("Walk dog", false)).await.unwrap();
        let updated = service
            .update(
                &created.id,
                TodoPatch {
                    title: Some("Walk cat".to_string()),
                    done: Some(true),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Walk cat");
        assert!(updated.done);
    }

    #[tokio::test]
    async fn delete_is_idempotent_at_record_level() {
        let service = memory_service();
        let created = service.create(draft("once", false)).await.unwrap();
        assert_eq!(service.delete(&created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(service.delete(&created.id).await.unwrap(), None);
    }
}
