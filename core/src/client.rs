//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A [`crate::transport::Transport`] executes the actual
//! round-trip in between, keeping this module deterministic and free of
//! I/O dependencies.
//!
//! Status classification: 404 maps to `NotFound`, 400/422 to `Validation`
//! with whatever message and field detail the error body carries, and any
//! other unexpected status to `Server`. Error bodies are parsed leniently —
//! an absent or malformed body degrades to a generic message.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateUserRequest, ErrorBody, PaginatedResponse, UpdateUserRequest, User};

/// Default page requested when the caller does not care.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size requested when the caller does not care.
pub const DEFAULT_LIMIT: u32 = 10;

/// Synchronous, stateless client for the user API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Paginated read. `page` and `limit` pass through unmodified; the
    /// server is trusted to handle out-of-range values.
    pub fn build_list_users(&self, page: u32, limit: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/users?page={page}&limit={limit}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/users/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_user(&self, input: &CreateUserRequest) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/users", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_user(
        &self,
        id: &str,
        input: &UpdateUserRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/users/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_user(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/users/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_users(
        &self,
        response: HttpResponse,
    ) -> Result<PaginatedResponse<User>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }
}

/// Map non-expected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(classify_failure(response))
}

fn classify_failure(response: &HttpResponse) -> ApiError {
    // Lenient: a missing or malformed error body must not turn an
    // application failure into a parse failure.
    let body: Option<ErrorBody> = serde_json::from_str(&response.body).ok();
    match response.status {
        404 => ApiError::NotFound,
        400 | 422 => match body {
            Some(body) => ApiError::Validation {
                message: body.message,
                fields: body.errors,
            },
            None => ApiError::Validation {
                message: "the server rejected the request".to_string(),
                fields: Vec::new(),
            },
        },
        status => ApiError::Server {
            status,
            message: body
                .map(|b| b.message)
                .unwrap_or_else(|| "unexpected server error".to_string()),
        },
    }
}
