//! Client core for a user-administration front end.
//!
//! # Overview
//! Wraps a remote user API (paginated list, get, create, partial update,
//! delete) and owns the list/pagination/request-lifecycle state a front end
//! renders from. The crate performs no I/O itself: `UserClient` builds
//! `HttpRequest` values and parses `HttpResponse` values, and a
//! [`Transport`] implementation supplied by the host executes the actual
//! round-trip.
//!
//! # Design
//! - `UserClient` is stateless — it holds only `base_url` — and classifies
//!   application failures (404, 400/422, 5xx) from response data.
//! - `Transport` implementations surface only transport-side failures
//!   (unreachable backend, timeout), keeping the two failure classes
//!   distinguishable all the way to the UI.
//! - `UserListController` is the single source of truth for the displayed
//!   list: it reloads the current page after every mutation and guards
//!   against stale responses with per-fetch tokens.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{UserClient, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use controller::{ErrorNotice, ErrorOrigin, FetchToken, UserListController};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{
    CreateUserRequest, ErrorBody, FieldError, PaginatedResponse, PaginationState,
    UpdateUserRequest, User,
};
