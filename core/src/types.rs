//! Domain DTOs for the user admin API.
//!
//! # Design
//! These types mirror the backend's wire schema but are defined
//! independently; integration tests against the mock server catch any
//! drift. Wire names are camelCase (`totalPages`, `createdAt`) to match
//! the service, and the record id is an opaque `String` — identifiers are
//! assigned by the server and never minted on the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a new user. No id or timestamps — the
/// server assigns both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Request payload for updating an existing user. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Paginated list envelope returned by `GET /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Pagination bookkeeping held by the controller. `page` is 1-based.
///
/// `total_pages == ceil(total / limit)` holds for every well-formed server
/// response; the controller trusts the server's figures verbatim and never
/// recomputes or clamps them locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationState {
    pub fn from_response<T>(response: &PaginatedResponse<T>) -> Self {
        Self {
            page: response.page,
            limit: response.limit,
            total: response.total,
            total_pages: response.total_pages,
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: crate::client::DEFAULT_PAGE,
            limit: crate::client::DEFAULT_LIMIT,
            total: 0,
            total_pages: 0,
        }
    }
}

/// Structured error payload carried by non-2xx responses.
///
/// `errors` holds field-level validation detail when the server provides
/// it. Both fields are parsed leniently — a missing or malformed body
/// degrades to a generic message, never a hard failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// One field-level validation message inside an [`ErrorBody`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_roundtrips_with_camel_case_wire_names() {
        let json = r#"{
            "id": "u-1",
            "name": "Ada",
            "email": "ada@example.com",
            "age": 31,
            "createdAt": "2026-01-05T10:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.age, Some(31));
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["createdAt"], "2026-01-05T10:00:00Z");
        assert!(back.get("updatedAt").is_none());
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let input = UpdateUserRequest {
            age: Some(31),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["age"], 31);
        assert!(json.get("name").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn paginated_response_reads_total_pages() {
        let json = r#"{"data":[],"total":25,"page":3,"limit":10,"totalPages":3}"#;
        let page: PaginatedResponse<User> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.data.is_empty());
    }

    #[test]
    fn error_body_defaults_to_no_field_errors() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert_eq!(body.message, "nope");
        assert!(body.errors.is_empty());
    }

    #[test]
    fn pagination_state_tracks_response() {
        let page = PaginatedResponse::<User> {
            data: Vec::new(),
            total: 25,
            page: 2,
            limit: 10,
            total_pages: 3,
        };
        let state = PaginationState::from_response(&page);
        assert_eq!(state.page, 2);
        assert_eq!(state.total, 25);
        assert_eq!(state.total_pages, 3);
    }
}
