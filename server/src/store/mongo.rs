use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::{TodoStore, UpdateOptions};
use crate::error::TodoError;
use crate::model::{NewTodo, Todo, TodoPatch};

const COLLECTION: &str = "todos";
const DEFAULT_DATABASE: &str = "test";

/// Stored shape of a todo; `_id` is a native ObjectId.
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    done: bool,
}

impl From<TodoDocument> for Todo {
    fn from(document: TodoDocument) -> Self {
        Todo {
            id: document.id.to_hex(),
            title: document.title,
            done: document.done,
        }
    }
}

/// The `todos` collection of a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<TodoDocument>,
}

impl MongoStore {
    /// Connects and pings the server. The database named in the connection
    /// string is used, or `test` when it names none.
    pub async fn connect(uri: &str) -> Result<Self, TodoError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        database.run_command(doc! { "ping": 1 }).await?;
        Ok(Self {
            collection: database.collection(COLLECTION),
        })
    }
}

fn parse_id(id: &str) -> Result<ObjectId, TodoError> {
    ObjectId::parse_str(id).map_err(|_| TodoError::invalid_id(id))
}

fn set_document(patch: TodoPatch) -> Document {
    let mut set = Document::new();
    if let Some(title) = patch.title {
        set.insert("title", title);
    }
    if let Some(done) = patch.done {
        set.insert("done", done);
    }
    set
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn create(&self, draft: NewTodo) -> Result<Todo, TodoError> {
        let valid = draft.validate()?;
        let document = TodoDocument {
            id: ObjectId::new(),
            title: valid.title,
            done: valid.done,
        };
        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, TodoError> {
        let documents: Vec<TodoDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let id = parse_id(id)?;
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Todo::from))
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: TodoPatch,
        options: UpdateOptions,
    ) -> Result<Option<Todo>, TodoError> {
        let id = parse_id(id)?;
        patch.validate()?;
        if patch.is_empty() {
            return Ok(self
                .collection
                .find_one(doc! { "_id": id })
                .await?
                .map(Todo::from));
        }
        let return_document = if options.return_updated {
            ReturnDocument::After
        } else {
            ReturnDocument::Before
        };
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(patch) })
            .return_document(return_document)
            .await?;
        Ok(document.map(Todo::from))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Todo>, TodoError> {
        let id = parse_id(id)?;
        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;
        Ok(document.map(Todo::from))
    }
}
