//! Error taxonomy for the user admin client.
//!
//! # Design
//! The split that matters to callers is transport versus application:
//! `Transport` and `Timeout` mean no usable HTTP response ever arrived, so
//! the UI can say "backend unreachable" instead of blaming the request.
//! Everything else describes a response the server actually sent.
//! `NotFound` and `Validation` get dedicated variants because callers
//! branch on them; remaining non-2xx statuses land in `Server` with the raw
//! status and message for debugging.

use thiserror::Error;

use crate::types::FieldError;

/// Errors produced by the client, a transport, or the controller's
/// operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was received — connection refused, DNS failure,
    /// or a broken socket.
    #[error("backend unreachable: {0}")]
    Transport(String),

    /// The bounded request timeout elapsed before a response arrived.
    #[error("request timed out")]
    Timeout,

    /// The server returned 404 — the requested user does not exist.
    #[error("user not found")]
    NotFound,

    /// The server rejected the payload (400/422). `fields` carries
    /// field-level messages when the server provided them.
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Any other non-success status, 5xx included.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// True when no HTTP response reached the client at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout)
    }
}
