//! Typed client for the todo REST service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network. The caller executes the round-trip with
//! whatever HTTP stack it has, which keeps this crate free of I/O and lets
//! tests feed it canned responses.
//!
//! Each operation comes as a `build_*` / `parse_*` pair. Status handling
//! follows the server: 201 for create, 200 for everything else, 404 for a
//! missing record and 500 with a `{ "message": ... }` body for failures.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{NewTodo, Todo, TodoPatch};
