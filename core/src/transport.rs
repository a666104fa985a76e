//! The seam between the deterministic core and real network I/O.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes HTTP round-trips on behalf of the core.
///
/// Implementations fail only with the transport-side classifications
/// ([`ApiError::Transport`], [`ApiError::Timeout`]). A response received
/// with *any* status code — 4xx and 5xx included — is `Ok`; status
/// interpretation belongs to `UserClient::parse_*`.
///
/// The cli crate provides a ureq-backed implementation; tests use scripted
/// fakes.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}
