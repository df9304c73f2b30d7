//! Request builder and response parser for the todo API.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorBody, NewTodo, Todo, TodoPatch};

const CREATED: u16 = 201;
const OK: u16 = 200;
const NOT_FOUND: u16 = 404;

/// Stateless client; holds only the base URL.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Post,
            self.collection_url(),
            to_json(input)?,
        ))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_update_todo(&self, id: &str, patch: &TodoPatch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.item_url(id),
            to_json(patch)?,
        ))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_body(response, CREATED)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_body(response, OK)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_body(response, OK)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_body(response, OK)
    }

    /// Returns the removed record.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_body(response, OK)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_body<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response.status, &response.body, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(status: u16, body: &str, expected: u16) -> Result<(), ApiError> {
    if status == expected {
        return Ok(());
    }
    if status == NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => Err(ApiError::Server {
            status,
            message: error.message,
        }),
        Err(_) => Err(ApiError::Http {
            status,
            body: body.to_string(),
        }),
    }
}
