//! Errors returned by `TodoClient` build and parse methods.

/// A 404 is its own variant: by-id operations use it to report a missing
/// record, which callers usually handle differently from a failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    /// The server reported a failure with its `{ "message": ... }` body.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Unexpected status without a recognizable error body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
