use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TodoStore, UpdateOptions};
use crate::error::TodoError;
use crate::model::{NewTodo, Todo, TodoPatch};

/// In-process collection. Ids are v4 UUIDs; records stay in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Canonical form of `id`, so differently cased input finds the same record.
fn parse_id(id: &str) -> Result<String, TodoError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| TodoError::invalid_id(id))
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create(&self, draft: NewTodo) -> Result<Todo, TodoError> {
        let valid = draft.validate()?;
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: valid.title,
            done: valid.done,
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let id = parse_id(id)?;
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|todo| todo.id == id).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: TodoPatch,
        options: UpdateOptions,
    ) -> Result<Option<Todo>, TodoError> {
        let id = parse_id(id)?;
        patch.validate()?;
        let mut todos = self.todos.write().await;
        let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(None);
        };
        let before = todo.clone();
        patch.apply(todo);
        Ok(Some(if options.return_updated {
            todo.clone()
        } else {
            before
        }))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let id = parse_id(id)?;
        let mut todos = self.todos.write().await;
        let index = todos.iter().position(|todo| todo.id == id);
        Ok(index.map(|index| todos.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, done: bool) -> NewTodo {
        NewTodo {
            title: Some(title.to_string()),
            done: Some(done),
        }
    }

    const ABSENT: &str = "00000000-0000-0000-0000-000000000000";

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.create(draft("a", false)).await.unwrap();
        let b = store.create(draft("b", true)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_without_persisting() {
        let store = MemoryStore::new();
        let err = store
            .create(NewTodo {
                title: Some("no done".to_string()),
                done: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store.create(draft(title, false)).await.unwrap();
        }
        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|todo| todo.title)
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn find_by_id_accepts_uppercase_id() {
        let store = MemoryStore::new();
        let created = store.create(draft("x", true)).await.unwrap();
        let found = store
            .find_by_id(&created.id.to_uppercase())
            .await
            .unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn malformed_id_is_a_cast_error() {
        let store = MemoryStore::new();
        let err = store.find_by_id("not-an-id").await.unwrap_err();
        assert!(matches!(err, TodoError::InvalidId { ref value } if value == "not-an-id"));
        let err = store
            .find_by_id_and_update("not-an-id", TodoPatch::default(), UpdateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::InvalidId { ref value } if value == "not-an-id"));
        assert!(store.find_by_id_and_delete("42").await.is_err());
    }

    #[tokio::test]
    async fn absent_id_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.find_by_id(ABSENT).await.unwrap(), None);
        let updated = store
            .find_by_id_and_update(ABSENT, TodoPatch::default(), UpdateOptions::default())
            .await
            .unwrap();
        assert_eq!(updated, None);
        assert_eq!(store.find_by_id_and_delete(ABSENT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_returns_record_before_or_after() {
        let store = MemoryStore::new();
        let created = store.create(draft("old", false)).await.unwrap();
        let patch = || TodoPatch {
            title: Some("new".to_string()),
            done: None,
        };

        let before = store
            .find_by_id_and_update(
                &created.id,
                patch(),
                UpdateOptions {
                    return_updated: false,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before.title, "old");

        let after = store
            .find_by_id_and_update(&created.id, patch(), UpdateOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.title, "new");
        assert!(!after.done);
    }

    #[tokio::test]
    async fn update_never_persists_empty_title() {
        let store = MemoryStore::new();
        let created = store.create(draft("old", false)).await.unwrap();
        let empty_title = TodoPatch {
            title: Some(String::new()),
            done: Some(true),
        };

        let err = store
            .find_by_id_and_update(&created.id, empty_title, UpdateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn delete_returns_last_state_once() {
        let store = MemoryStore::new();
        let created = store.create(draft("gone", true)).await.unwrap();
        let removed = store.find_by_id_and_delete(&created.id).await.unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert_eq!(store.find_by_id_and_delete(&created.id).await.unwrap(), None);
        assert_eq!(store.find_by_id(&created.id).await.unwrap(), None);
    }
}
