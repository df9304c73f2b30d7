//! Todo record and the request payloads that create or modify it.
//!
//! # Design
//! `NewTodo` and `TodoPatch` keep every field optional so that a missing
//! `done` is reported by validation with a readable message instead of being
//! rejected by the JSON decoder. Validation lives here rather than in each
//! store backend so both backends reject exactly the same input.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name reported in validation and cast messages.
pub const MODEL_NAME: &str = "Todo";

/// A persisted todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub done: bool,
}

/// Candidate record for `POST /todos`. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTodo {
    pub title: Option<String>,
    pub done: Option<bool>,
}

/// Partial overwrite for `PUT /todos/{id}`. Only present fields are applied;
/// `_id` is not a field here, so it can never be changed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub done: Option<bool>,
}

/// A `NewTodo` that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidTodo {
    pub title: String,
    pub done: bool,
}

impl NewTodo {
    pub fn validate(self) -> Result<ValidTodo, ValidationError> {
        let mut errors = ValidationError::default();
        let title = match self.title {
            Some(title) if !title.is_empty() => Some(title),
            _ => {
                errors.required("title");
                None
            }
        };
        if self.done.is_none() {
            errors.required("done");
        }
        match (title, self.done) {
            (Some(title), Some(done)) => Ok(ValidTodo { title, done }),
            _ => Err(errors),
        }
    }
}

impl TodoPatch {
    /// Check the fields that are present. Absent fields are never required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.title.as_deref() == Some("") {
            errors.required("title");
        }
        errors.into_result()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.done.is_none()
    }

    pub fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(done) = self.done {
            todo.done = done;
        }
    }
}

/// One failed field check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub path: &'static str,
    pub message: String,
}

/// Every field check that failed, in schema order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    fn required(&mut self, path: &'static str) {
        self.fields.push(FieldError {
            path,
            message: format!("Path `{path}` is required."),
        });
    }

    fn into_result(self) -> Result<(), Self> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MODEL_NAME} validation failed: ")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.path, field.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
