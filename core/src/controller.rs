//! List/mutation state controller — the single source of truth for the
//! displayed user list.
//!
//! # Design
//! `UserListController` owns `users`, `pagination`, the loading flag, and
//! the current error notice, and is the only component that invokes the
//! HTTP client. Every mutation re-synchronizes by reloading the *current*
//! page; the server, not local state, is the authority on existence and
//! totals.
//!
//! Fetching is split into `begin_load` / `finish_load` around the transport
//! call. `begin_load` issues a monotonically increasing [`FetchToken`];
//! `finish_load` discards any response whose token is not the latest
//! issued, so a superseded fetch can never overwrite the state written by
//! a newer one. The `load` convenience method runs both halves around a
//! synchronous transport call.
//!
//! A failed load retains the previously displayed list; only a successful
//! response replaces `users` and `pagination`, and it replaces them
//! together.

use tracing::{debug, warn};

use crate::client::UserClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateUserRequest, PaginationState, UpdateUserRequest, User};

/// Identifies one issued fetch. Obtained from `begin_load`; redeemed by
/// `finish_load`, which ignores any token that has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Which kind of operation produced the active error notice. Lets the view
/// layer render load failures as a banner and mutation failures inline,
/// while the controller still exposes a single active message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    Load,
    Mutation,
}

/// The single active user-facing error. Overwritten by each operation's
/// outcome; never accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub message: String,
    pub origin: ErrorOrigin,
}

pub struct UserListController<T> {
    client: UserClient,
    transport: T,
    users: Vec<User>,
    pagination: PaginationState,
    loading: bool,
    error: Option<ErrorNotice>,
    fetch_seq: u64,
}

impl<T: Transport> UserListController<T> {
    pub fn new(client: UserClient, transport: T) -> Self {
        Self {
            client,
            transport,
            users: Vec::new(),
            pagination: PaginationState::default(),
            loading: false,
            error: None,
            fetch_seq: 0,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|notice| notice.message.as_str())
    }

    /// Start a fetch: bump the sequence, flag loading, clear the previous
    /// error, and hand back the token plus the request to execute. The
    /// current list stays visible until a response lands.
    pub fn begin_load(&mut self, page: u32, limit: u32) -> (FetchToken, HttpRequest) {
        self.fetch_seq += 1;
        self.loading = true;
        self.error = None;
        debug!(page, limit, token = self.fetch_seq, "fetching users");
        (FetchToken(self.fetch_seq), self.client.build_list_users(page, limit))
    }

    /// Apply the outcome of a fetch. Returns `true` when the state was
    /// updated from a successful response.
    ///
    /// A stale token (superseded by a later `begin_load`) is discarded
    /// without touching anything, the loading flag included — the newer
    /// fetch is still the one in charge.
    pub fn finish_load(
        &mut self,
        token: FetchToken,
        result: Result<HttpResponse, ApiError>,
    ) -> bool {
        if token.0 != self.fetch_seq {
            debug!(token = token.0, latest = self.fetch_seq, "discarding stale response");
            return false;
        }
        self.loading = false;
        let parsed = result.and_then(|response| self.client.parse_list_users(response));
        match parsed {
            Ok(page) => {
                // users and pagination update together or not at all.
                self.pagination = PaginationState::from_response(&page);
                self.users = page.data;
                self.error = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to load users");
                self.error = Some(ErrorNotice {
                    message: describe(&err, "Failed to fetch users"),
                    origin: ErrorOrigin::Load,
                });
                false
            }
        }
    }

    /// Fetch a page and replace the displayed list on success. Idempotent
    /// for identical arguments when no mutation intervenes.
    pub fn load(&mut self, page: u32, limit: u32) -> bool {
        let (token, request) = self.begin_load(page, limit);
        let result = self.transport.execute(&request);
        self.finish_load(token, result)
    }

    /// Reload whatever page and limit are currently displayed.
    pub fn refresh(&mut self) -> bool {
        self.load(self.pagination.page, self.pagination.limit)
    }

    /// Jump to `page` at the current limit. Out-of-range pages are sent to
    /// the server as-is and its answer is trusted verbatim.
    pub fn change_page(&mut self, page: u32) -> bool {
        self.load(page, self.pagination.limit)
    }

    /// Switch page size, restarting from page 1.
    pub fn change_limit(&mut self, limit: u32) -> bool {
        self.load(1, limit)
    }

    /// Create a user, then reload the current page. The new record may land
    /// on a different page and not be immediately visible; that trade-off
    /// is accepted. On failure the displayed list and page are untouched.
    pub fn create(&mut self, input: &CreateUserRequest) -> Option<User> {
        self.error = None;
        let outcome = self
            .client
            .build_create_user(input)
            .and_then(|request| self.transport.execute(&request))
            .and_then(|response| self.client.parse_create_user(response));
        match outcome {
            Ok(user) => {
                self.refresh();
                Some(user)
            }
            Err(err) => {
                self.mutation_failed(err, "Failed to create user");
                None
            }
        }
    }

    /// Update a user, then reload the current page. Proceeds even when `id`
    /// is not in the local list — the server decides existence.
    pub fn update(&mut self, id: &str, input: &UpdateUserRequest) -> Option<User> {
        self.error = None;
        let outcome = self
            .client
            .build_update_user(id, input)
            .and_then(|request| self.transport.execute(&request))
            .and_then(|response| self.client.parse_update_user(response));
        match outcome {
            Ok(user) => {
                self.refresh();
                Some(user)
            }
            Err(err) => {
                self.mutation_failed(err, "Failed to update user");
                None
            }
        }
    }

    /// Delete a user, gated by a caller-supplied confirmation. Declining
    /// performs no request and changes no state. On success the current
    /// page is reloaded; if the deleted record was the last item on a page
    /// beyond 1 the page legitimately comes back empty — no automatic
    /// navigation to a previous page happens.
    pub fn delete(&mut self, id: &str, confirm: impl FnOnce() -> bool) -> bool {
        if !confirm() {
            debug!(id, "delete not confirmed");
            return false;
        }
        self.error = None;
        let request = self.client.build_delete_user(id);
        let outcome = self
            .transport
            .execute(&request)
            .and_then(|response| self.client.parse_delete_user(response));
        match outcome {
            Ok(()) => {
                self.refresh();
                true
            }
            Err(err) => {
                self.mutation_failed(err, "Failed to delete user");
                false
            }
        }
    }

    fn mutation_failed(&mut self, err: ApiError, fallback: &str) {
        warn!(error = %err, "{fallback}");
        self.error = Some(ErrorNotice {
            message: describe(&err, fallback),
            origin: ErrorOrigin::Mutation,
        });
    }
}

/// Map a failure classification to the single display string shown to the
/// user. Transport-class failures get wording that points at the backend
/// rather than the request; application failures prefer the server's own
/// message, falling back to a per-operation default.
fn describe(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Transport(_) => {
            "Unable to connect to the backend server. Please make sure your backend is running."
                .to_string()
        }
        ApiError::Timeout => "The backend server took too long to respond.".to_string(),
        ApiError::NotFound => format!("{fallback}: user not found"),
        ApiError::Validation { message, .. } => message.clone(),
        ApiError::Server { message, .. } => message.clone(),
        ApiError::Serialization(_) | ApiError::Deserialization(_) => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transport for paths that must never reach the network.
    struct NoTransport;

    impl Transport for NoTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            panic!("transport must not be used");
        }
    }

    fn controller() -> UserListController<NoTransport> {
        UserListController::new(UserClient::new("http://localhost:3000"), NoTransport)
    }

    fn list_response(body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    const ONE_USER: &str = r#"{
        "data": [{"id":"u-1","name":"Ada","email":"ada@example.com"}],
        "total": 1, "page": 1, "limit": 10, "totalPages": 1
    }"#;

    const TWO_USERS: &str = r#"{
        "data": [
            {"id":"u-1","name":"Ada","email":"ada@example.com"},
            {"id":"u-2","name":"Grace","email":"grace@example.com"}
        ],
        "total": 2, "page": 1, "limit": 10, "totalPages": 1
    }"#;

    #[test]
    fn begin_load_flags_loading_and_clears_error() {
        let mut c = controller();
        let (token, request) = c.begin_load(2, 10);
        assert!(c.is_loading());
        assert!(c.error().is_none());
        assert_eq!(request.url, "http://localhost:3000/users?page=2&limit=10");

        assert!(c.finish_load(token, list_response(ONE_USER)));
        assert!(!c.is_loading());
        assert_eq!(c.users().len(), 1);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_state() {
        let mut c = controller();
        let (token_a, _) = c.begin_load(1, 10);
        let (token_b, _) = c.begin_load(2, 10);

        // B's response lands first and wins.
        assert!(c.finish_load(token_b, list_response(TWO_USERS)));
        assert_eq!(c.users().len(), 2);

        // A's response arrives late and must be discarded.
        assert!(!c.finish_load(token_a, list_response(ONE_USER)));
        assert_eq!(c.users().len(), 2);
        assert_eq!(c.users()[1].id, "u-2");
    }

    #[test]
    fn stale_response_leaves_loading_flag_alone() {
        let mut c = controller();
        let (token_a, _) = c.begin_load(1, 10);
        let (_token_b, _) = c.begin_load(2, 10);

        // A is stale; B is still in flight, so the UI must keep spinning.
        assert!(!c.finish_load(token_a, list_response(ONE_USER)));
        assert!(c.is_loading());
    }

    #[test]
    fn failed_load_retains_previous_list() {
        let mut c = controller();
        let (token, _) = c.begin_load(1, 10);
        assert!(c.finish_load(token, list_response(TWO_USERS)));

        let (token, _) = c.begin_load(2, 10);
        assert!(!c.finish_load(token, Err(ApiError::Transport("connection refused".into()))));

        assert_eq!(c.users().len(), 2, "failed load must not clear the list");
        let notice = c.error().expect("error notice");
        assert_eq!(notice.origin, ErrorOrigin::Load);
        assert!(notice.message.contains("Unable to connect"));
    }

    #[test]
    fn declined_confirmation_performs_no_request() {
        let mut c = controller();
        // NoTransport panics on use, so this passing proves no I/O happened.
        assert!(!c.delete("u-1", || false));
        assert!(c.error().is_none());
        assert!(!c.is_loading());
    }

    #[test]
    fn describe_distinguishes_transport_from_validation() {
        let transport = describe(
            &ApiError::Transport("refused".into()),
            "Failed to create user",
        );
        let validation = describe(
            &ApiError::Validation {
                message: "email must be a valid email address".into(),
                fields: Vec::new(),
            },
            "Failed to create user",
        );
        assert!(transport.contains("backend"));
        assert_eq!(validation, "email must be a valid email address");
        assert_ne!(transport, validation);
    }

    #[test]
    fn describe_falls_back_per_operation() {
        let msg = describe(&ApiError::NotFound, "Failed to update user");
        assert_eq!(msg, "Failed to update user: user not found");
    }
}
