use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, PageEnvelope, User};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app().oneshot(get_request("/users")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: PageEnvelope = body_json(resp).await;
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn list_users_defaults_page_and_limit() {
    let resp = app().oneshot(get_request("/users?page=4")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: PageEnvelope = body_json(resp).await;
    assert_eq!(page.page, 4);
    assert_eq!(page.limit, 10);
}

// --- create ---

#[tokio::test]
async fn create_user_returns_201_with_server_fields() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Ada","email":"ada@example.com","age":31}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = body_json(resp).await;
    assert!(!user.id.is_empty());
    assert_eq!(user.name, "Ada");
    assert_eq!(user.age, Some(31));
    assert!(user.updated_at.is_none());
}

#[tokio::test]
async fn create_user_rejects_bad_email_with_field_errors() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"Ada","email":"not-an-email"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(resp).await;
    assert!(body.message.contains("email"));
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].field, "email");
}

#[tokio::test]
async fn create_user_rejects_empty_name() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/users",
            r#"{"name":"   ","email":"ada@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.errors[0].field, "name");
}

// --- get ---

#[tokio::test]
async fn get_user_not_found_has_structured_body() {
    let resp = app().oneshot(get_request("/users/nope")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = body_json(resp).await;
    assert_eq!(body.message, "User not found");
}

// --- update ---

#[tokio::test]
async fn update_user_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/users/nope", r#"{"age":31}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_user_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- pagination ---

#[tokio::test]
async fn pagination_splits_pages_and_reports_totals() {
    use tower::Service;

    let mut app = app().into_service();

    for i in 0..5 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                "/users",
                &format!(r#"{{"name":"User {i}","email":"user{i}@example.com"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // Page 1 of 2 at limit 2.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/users?page=1&limit=2"))
        .await
        .unwrap();
    let page: PageEnvelope = body_json(resp).await;
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data[0].name, "User 0");

    // Last page holds the remainder.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/users?page=3&limit=2"))
        .await
        .unwrap();
    let page: PageEnvelope = body_json(resp).await;
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "User 4");

    // Out-of-range pages come back empty, not as an error.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/users?page=9&limit=2"))
        .await
        .unwrap();
    let page: PageEnvelope = body_json(resp).await;
    assert!(page.data.is_empty());
    assert_eq!(page.total, 5);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/users",
            r#"{"name":"Ada","email":"ada@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: User = body_json(resp).await;
    let id = created.id.clone();

    // list — one user, total 1
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/users"))
        .await
        .unwrap();
    let page: PageEnvelope = body_json(resp).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, id);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: User = body_json(resp).await;
    assert_eq!(fetched.name, "Ada");

    // update — partial: only age; name and email unchanged, updatedAt set
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/users/{id}"),
            r#"{"age":36}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: User = body_json(resp).await;
    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.age, Some(36));
    assert!(updated.updated_at.is_some());

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(format!("/users/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/users/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/users"))
        .await
        .unwrap();
    let page: PageEnvelope = body_json(resp).await;
    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);
}
