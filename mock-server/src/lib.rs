//! In-memory user API used by integration tests and local development.
//!
//! Serves the same wire contract as the real backend: a paginated list
//! envelope, camelCase field names, 422 validation failures with
//! field-level detail, and structured error bodies on 404.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope {
    pub data: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// Insertion-ordered store so page contents are stable across requests.
pub type Db = Arc<RwLock<Vec<User>>>;

type ApiFailure = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> ApiFailure {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "User not found".to_string(),
            errors: Vec::new(),
        }),
    )
}

/// Check whichever fields the request supplied. `None` means "not part of
/// this request" and is skipped, matching partial-update semantics.
fn validate(name: Option<&str>, email: Option<&str>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(name) = name {
        if name.trim().is_empty() {
            errors.push(FieldError {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
    }
    if let Some(email) = email {
        if !email.contains('@') {
            errors.push(FieldError {
                field: "email".to_string(),
                message: "must be a valid email address".to_string(),
            });
        }
    }
    errors
}

fn validation_failure(errors: Vec<FieldError>) -> ApiFailure {
    let message = errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody { message, errors }),
    )
}

async fn list_users(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<PageEnvelope> {
    let users = db.read().await;
    let limit = query.limit.max(1);
    let total = users.len() as u64;
    let total_pages = total.div_ceil(u64::from(limit)) as u32;
    let start = query.page.saturating_sub(1) as usize * limit as usize;
    let data = users.iter().skip(start).take(limit as usize).cloned().collect();
    Json(PageEnvelope {
        data,
        total,
        page: query.page,
        limit,
        total_pages,
    })
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiFailure> {
    let errors = validate(Some(&input.name), Some(&input.email));
    if !errors.is_empty() {
        return Err(validation_failure(errors));
    }
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        age: input.age,
        created_at: Utc::now(),
        updated_at: None,
    };
    db.write().await.push(user.clone());
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiFailure> {
    let users = db.read().await;
    users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, ApiFailure> {
    let errors = validate(input.name.as_deref(), input.email.as_deref());
    if !errors.is_empty() {
        return Err(validation_failure(errors));
    }
    let mut users = db.write().await;
    let user = users.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(age) = input.age {
        user.age = Some(age);
    }
    user.updated_at = Some(Utc::now());
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiFailure> {
    let mut users = db.write().await;
    match users.iter().position(|u| u.id == id) {
        Some(index) => {
            users.remove(index);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(not_found()),
    }
}
