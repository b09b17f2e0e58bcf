use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use estate_backend::config::UploadConfig;
use estate_backend::models::{NewProperty, PropertyChanges, User, UserRole};
use estate_backend::{api, AppConfig, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const BOUNDARY: &str = "estate-test-boundary";

fn build_app(pool: PgPool, upload_dir: &Path) -> (Router, Arc<AppState>) {
    let config = AppConfig {
        uploads: UploadConfig {
            dir: upload_dir.to_path_buf(),
            max_bytes: 1024 * 1024,
        },
        ..AppConfig::default()
    };
    let state = Arc::new(AppState::new(pool, config));
    (api::router(state.clone()), state)
}

/// Router over a pool that never connects; any handler that reaches the
/// database would fail with a 500
fn offline_app() -> (Router, Arc<AppState>) {
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgresql://nobody@127.0.0.1:1/offline")
        .expect("lazy pool");
    build_app(pool, &std::env::temp_dir().join("estate-offline-uploads"))
}

fn token_for(state: &AppState, role: UserRole) -> (Uuid, String) {
    let user = User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", role.as_str()),
        name: "Token Holder".to_string(),
        password_hash: String::new(),
        role: role.as_str().to_string(),
        phone: None,
        created_at: chrono::Utc::now().naive_utc(),
    };
    let token = state.jwt.issue(&user).expect("issue token");
    (user.id, token)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn multipart_request(
    method: Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &[u8])],
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for (name, file_name, data) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

// ============================================================================
// Requests rejected before any database work
// ============================================================================

#[tokio::test]
async fn test_contact_missing_field_is_rejected_without_database() {
    let (app, _) = offline_app();

    let request = json_request(
        Method::POST,
        "/api/contacts",
        None,
        json!({ "email": "jane@example.com", "message": "Is it available?" }),
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_contact_invalid_fields_are_rejected_without_database() {
    let (app, _) = offline_app();

    for payload in [
        json!({ "name": "Jane", "email": "not-an-email", "message": "Hello" }),
        json!({ "name": "   ", "email": "jane@example.com", "message": "Hello" }),
        json!({ "name": "Jane", "email": "jane@example.com", "message": "" }),
    ] {
        let (status, body) =
            send(&app, json_request(Method::POST, "/api/contacts", None, payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (app, _) = offline_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/auth/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, empty_request(Method::GET, "/api/favorites", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        empty_request(Method::GET, "/api/users", Some("not.a.jwt")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_is_forbidden_on_admin_routes() {
    let (app, state) = offline_app();
    let (_, token) = token_for(&state, UserRole::User);

    let (status, _) = send(&app, empty_request(Method::GET, "/api/users", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/categories",
            Some(&token),
            json!({ "name": "Condos" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/admin/properties",
            &token,
            &[("title", "Nope")],
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_id_gets_json_error() {
    let (app, state) = offline_app();
    let (_, token) = token_for(&state, UserRole::User);

    let (status, body) =
        send(&app, empty_request(Method::GET, "/api/properties/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));

    let (status, body) = send(
        &app,
        empty_request(Method::POST, "/api/favorites/42", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_listing_query_is_rejected() {
    let (app, _) = offline_app();

    for uri in [
        "/api/properties?page=0",
        "/api/properties?page_size=500",
        "/api/properties?sort=cheapest",
        "/api/properties?min_price=500&max_price=100",
        "/api/properties?min_price=abc",
        "/api/properties?status=foreclosed",
    ] {
        let (status, body) = send(&app, empty_request(Method::GET, uri, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_content_key_is_rejected() {
    let (app, _) = offline_app();

    let (status, _) = send(&app, empty_request(Method::GET, "/api/content/About_Us", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Full flows against Postgres
// ============================================================================

#[sqlx::test]
async fn test_admin_access_follows_stored_account(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (app, state) = build_app(pool, uploads.path());

    let admin = state
        .user_repo
        .create("boss@example.com", "Boss", "hash", UserRole::Admin, None)
        .await
        .unwrap();
    let other = state
        .user_repo
        .create("deputy@example.com", "Deputy", "hash", UserRole::Admin, None)
        .await
        .unwrap();
    let admin_token = state.jwt.issue(&admin).unwrap();
    let other_token = state.jwt.issue(&other).unwrap();

    let (status, body) = send(
        &app,
        empty_request(Method::DELETE, &format!("/api/users/{}", admin.id), Some(&admin_token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("own account"));

    let (status, _) = send(&app, empty_request(Method::GET, "/api/users", Some(&other_token))).await;
    assert_eq!(status, StatusCode::OK);

    // Demotion takes effect while the old token is still valid
    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            &format!("/api/users/{}", other.id),
            Some(&admin_token),
            json!({ "role": "user" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, empty_request(Method::GET, "/api/users", Some(&other_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        empty_request(Method::DELETE, &format!("/api/users/{}", other.id), Some(&admin_token)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, empty_request(Method::GET, "/api/users", Some(&other_token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_register_login_and_me(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (app, _) = build_app(pool, uploads.path());

    let register = json!({
        "email": "Buyer@Example.com",
        "name": "Buyer",
        "password": "correct-horse"
    });
    let (status, body) =
        send(&app, json_request(Method::POST, "/api/auth/register", None, register.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "buyer@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());

    let (status, _) =
        send(&app, json_request(Method::POST, "/api/auth/register", None, register)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": "buyer@example.com", "password": "wrong-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({ "email": "buyer@example.com", "password": "correct-horse" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Buyer");
}

#[sqlx::test]
async fn test_admin_property_lifecycle(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (app, state) = build_app(pool, uploads.path());
    let admin = state
        .user_repo
        .create("admin@example.com", "Admin", "hash", UserRole::Admin, None)
        .await
        .unwrap();
    let token = state.jwt.issue(&admin).unwrap();

    let (status, category) = send(
        &app,
        json_request(
            Method::POST,
            "/api/categories",
            Some(&token),
            json!({ "name": "Condos" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/categories",
            Some(&token),
            json!({ "name": "Condos" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, detail) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/admin/properties",
            &token,
            &[
                ("title", "Harbor View Condo"),
                ("price", "450,000"),
                ("address", "9 Pier Rd"),
                ("city", "Seattle"),
                ("bedrooms", "2"),
                ("property_type", "condo"),
                ("featured", "true"),
                ("category_id", &category_id),
            ],
            &[("images", "front.jpg", b"fake-jpeg-bytes")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", detail);
    let property_id = detail["id"].as_str().unwrap().to_string();
    let image_url = detail["image_url"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("/uploads/properties/"));
    assert_eq!(detail["images"].as_array().unwrap().len(), 1);
    assert_eq!(detail["category"]["name"], "Condos");

    // Stored file is served statically
    let (status, _) = send(&app, empty_request(Method::GET, &image_url, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        multipart_request(
            Method::POST,
            "/api/admin/properties",
            &token,
            &[("title", "Missing City"), ("price", "1"), ("address", "x")],
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, page) = send(
        &app,
        empty_request(Method::GET, "/api/properties?city=seattle&min_bedrooms=2", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_items"], 1);
    assert_eq!(page["page_size"], 9);

    let (status, featured) =
        send(&app, empty_request(Method::GET, "/api/properties/featured", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(featured.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        multipart_request(
            Method::PUT,
            &format!("/api/admin/properties/{}", property_id),
            &token,
            &[("status", "pending")],
            &[],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "pending");
    assert_eq!(updated["title"], "Harbor View Condo");

    let (status, _) = send(
        &app,
        empty_request(
            Method::DELETE,
            &format!("/api/admin/properties/{}", property_id),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        empty_request(Method::GET, &format!("/api/properties/{}", property_id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn test_favorites_and_contacts(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let (app, state) = build_app(pool, uploads.path());

    let user = state
        .user_repo
        .create("fan@example.com", "Fan", "hash", UserRole::User, None)
        .await
        .unwrap();
    let token = state.jwt.issue(&user).unwrap();

    let mut new = PropertyChanges::default();
    new.title = Some("Cottage".to_string());
    new.price = Some(rust_decimal::Decimal::new(250_000, 0));
    new.address = Some("3 Lane".to_string());
    new.city = Some("Austin".to_string());
    let property = state
        .property_repo
        .create(&NewProperty::from_changes(&new, None).unwrap())
        .await
        .unwrap();
    let uri = format!("/api/favorites/{}", property.id);

    let (status, _) = send(&app, empty_request(Method::POST, &uri, Some(&token))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, empty_request(Method::POST, &uri, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, favorites) =
        send(&app, empty_request(Method::GET, "/api/favorites", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(favorites.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, empty_request(Method::DELETE, &uri, Some(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, empty_request(Method::DELETE, &uri, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/contacts",
            None,
            json!({
                "name": "Jane",
                "email": "jane@example.com",
                "message": "Tour please",
                "property_id": Uuid::new_v4(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, contact) = send(
        &app,
        json_request(
            Method::POST,
            "/api/contacts",
            None,
            json!({
                "name": "Jane",
                "email": "Jane@Example.com",
                "message": "Tour please",
                "property_id": property.id,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contact["status"], "new");
    assert_eq!(contact["email"], "jane@example.com");
}
