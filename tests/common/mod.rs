#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;
use uuid::Uuid;

use schoolhub::router::app;
use schoolhub::state::AppState;
use schoolhub_auth::create_access_token;
use schoolhub_config::{CorsConfig, JwtConfig};
use schoolhub_core::hash_password;
use schoolhub_models::{StudentId, TeacherId, UserId, UserRole};

pub type TestApp = NormalizePath<Router>;

pub const TEST_PASSWORD: &str = "testpass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

pub fn setup_test_app(pool: PgPool) -> TestApp {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };
    app(state)
}

pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub token: String,
}

/// Inserts an account directly, bypassing registration so any role can be used.
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("{}-{}", role, &suffix[..12]);
    let email = format!("{}@test.com", username);
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id: UserId = sqlx::query_scalar(
        "INSERT INTO users (username, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(id, &username, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        username,
        email,
        password: TEST_PASSWORD.to_string(),
        role,
        token,
    }
}

pub fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

pub fn teacher_payload(first_name: &str, last_name: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": format!("{}@school.test", unique(&first_name.to_lowercase())),
        "phone_number": "5550100",
        "subject_specialization": "Mathematics",
        "employee_id": unique("T"),
        "date_of_joining": "2024-08-01"
    })
}

pub fn student_payload(first_name: &str, last_name: &str, teacher: Option<TeacherId>) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": format!("{}@school.test", unique(&first_name.to_lowercase())),
        "phone_number": "5550101",
        "roll_number": unique("R"),
        "class_grade": "10",
        "date_of_birth": "2010-04-12",
        "admission_date": "2024-09-01",
        "assigned_teacher": teacher
    })
}

/// Inserts a teacher with SQL for tests that only need one to exist.
pub async fn insert_teacher(pool: &PgPool, first_name: &str, last_name: &str) -> TeacherId {
    sqlx::query_scalar(
        "INSERT INTO teachers (first_name, last_name, email, phone_number, subject_specialization,
                               employee_id, date_of_joining)
         VALUES ($1, $2, $3, '5550100', 'Mathematics', $4, '2024-08-01')
         RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!("{}@school.test", unique("t")))
    .bind(unique("T"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_student(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    teacher: Option<TeacherId>,
) -> StudentId {
    sqlx::query_scalar(
        "INSERT INTO students (first_name, last_name, email, phone_number, roll_number,
                               class_grade, date_of_birth, admission_date, assigned_teacher_id)
         VALUES ($1, $2, $3, '5550101', $4, '10', '2010-04-12', '2024-09-01', $5)
         RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!("{}@school.test", unique("s")))
    .bind(unique("R"))
    .bind(teacher)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send_raw(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> RawResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    RawResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Sends a request and parses the response body as JSON (`Null` when empty).
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let response = send_raw(app, method, uri, token, body).await;
    let json = if response.body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&response.body).unwrap()
    };
    (response.status, json)
}
