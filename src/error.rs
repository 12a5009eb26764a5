//! Error types for payload extraction and handler execution.

use thiserror::Error;

/// Errors produced while extracting a request payload or running a handler.
///
/// The dispatcher maps each variant onto a structured JSON error response;
/// nothing here escapes as an unformatted failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not valid JSON.
    #[error("malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// The request body parsed, but was not a JSON object.
    #[error("request body must be a JSON object")]
    NonObjectBody,

    /// A handler failed while producing its reply.
    #[error("{0}")]
    Handler(String),
}

impl ApiError {
    /// Shorthand for a handler-side failure with a message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}
