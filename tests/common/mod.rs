use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use journal::router::init_router;
use journal::state::AppState;
use journal_core::{DisciplineId, Role, UserId};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-do-not-use";

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub token: String,
}

pub fn setup_test_app(pool: SqlitePool) -> Router {
    init_router(AppState::new(pool, SECRET))
}

pub fn token_for(email: &str) -> String {
    journal_auth::create_token(email, Duration::from_secs(3600), SECRET).unwrap()
}

/// Inserts a user with a generated name and mints a token for them.
pub async fn create_test_user(pool: &SqlitePool, email: &str, role: Role) -> TestUser {
    let id: UserId = sqlx::query_scalar(
        r#"INSERT INTO users (last_name, first_name, patronymic, email, role)
           VALUES (?, ?, NULL, ?, ?)
           RETURNING id"#,
    )
    .bind(format!("{}-last", role))
    .bind(format!("{}-first", role))
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        role,
        token: token_for(email),
    }
}

#[allow(dead_code)]
pub async fn create_test_discipline(pool: &SqlitePool, name: &str) -> DisciplineId {
    sqlx::query_scalar("INSERT INTO disciplines (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Sends one request through a fresh clone of `app`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    into_test_response(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn into_test_response(response: axum::response::Response) -> TestResponse {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// The `role=<value>` pair from a response's `Set-Cookie`, if any.
#[allow(dead_code)]
pub fn role_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("role="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}
