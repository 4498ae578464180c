#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use freelearn::freelearn_config::JwtConfig;
use freelearn::router::init_router;
use freelearn::state::AppState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "testpass123";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::with_secret(TEST_SECRET)
}

/// Full router over a fresh in-memory store.
pub fn setup_test_app() -> Router {
    init_router(AppState::in_memory(jwt_config()))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Sends a request and returns the status with the parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

pub async fn register(app: &Router, email: &str, password: &str, professor: bool) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({ "email": email, "password": password, "professor": professor })),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// Registers a fresh user and logs them in.
pub async fn create_test_user(app: &Router, professor: bool) -> TestUser {
    let email = generate_unique_email();

    let (status, _) = register(app, &email, TEST_PASSWORD, professor).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = login(app, &email, TEST_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);

    TestUser {
        id: body["user_id"].as_str().unwrap().to_string(),
        email,
        token: body["token"].as_str().unwrap().to_string(),
    }
}

pub fn course_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("Learn {name} from scratch"),
        "image": "https://example.com/cover.png",
        "link": "https://example.com/course",
        "modules": [
            {
                "name": "Getting started",
                "lessons": [
                    { "name": "Setup", "link": "https://example.com/setup" },
                    { "name": "Hello world", "link": "https://example.com/hello" }
                ]
            }
        ]
    })
}

/// Publishes a course as `professor` and returns its id.
pub async fn create_test_course(app: &Router, professor: &TestUser, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/courses/post",
        Some(&professor.bearer()),
        Some(course_body(name)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["id"].as_str().unwrap().to_string()
}
