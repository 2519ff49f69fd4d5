use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use schoolhub::middleware::auth::AuthUser;
use schoolhub::middleware::role::{RequireAdmin, RequireStaff, ensure_role};
use schoolhub::schoolhub_auth::{Claims, create_access_token};
use schoolhub::schoolhub_config::{CorsConfig, JwtConfig};
use schoolhub::schoolhub_models::{UserId, UserRole};
use schoolhub::state::AppState;

fn create_test_auth_user(role: UserRole) -> AuthUser {
    AuthUser(Claims {
        sub: "00000000-0000-0000-0000-000000000000".to_string(),
        username: "jdoe".to_string(),
        role,
        exp: 9999999999,
        iat: 1234567890,
    })
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "role-middleware-secret".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

// The extractors never query the database, so a pool that never connects is enough.
fn guarded_app() -> Router {
    let state = AppState {
        db: PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap(),
        jwt_config: jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec![],
        },
    };

    Router::new()
        .route("/admin", get(|RequireAdmin(user): RequireAdmin| async move {
            user.username().to_string()
        }))
        .route("/staff", get(|RequireStaff(user): RequireStaff| async move {
            user.role().to_string()
        }))
        .with_state(state)
}

async fn status_for(uri: &str, role: Option<UserRole>) -> StatusCode {
    let mut builder = Request::builder().uri(uri);
    if let Some(role) = role {
        let token = create_access_token(UserId::new(), "jdoe", role, &jwt_config()).unwrap();
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    guarded_app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[test]
fn test_ensure_role_exact_match() {
    for role in [UserRole::Admin, UserRole::Teacher, UserRole::Student] {
        assert!(ensure_role(&create_test_auth_user(role), &[role]).is_ok());
    }
}

#[test]
fn test_ensure_role_no_match() {
    let student = create_test_auth_user(UserRole::Student);
    assert!(ensure_role(&student, &[UserRole::Admin]).is_err());
    assert!(ensure_role(&student, &[UserRole::Admin, UserRole::Teacher]).is_err());

    let teacher = create_test_auth_user(UserRole::Teacher);
    assert!(ensure_role(&teacher, &[UserRole::Admin]).is_err());
}

#[test]
fn test_ensure_role_error_lists_allowed_roles() {
    let err = ensure_role(
        &create_test_auth_user(UserRole::Student),
        &[UserRole::Admin, UserRole::Teacher],
    )
    .unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(
        err.error.to_string(),
        "Access denied. Required role: admin, teacher"
    );
}

#[tokio::test]
async fn test_require_admin() {
    assert_eq!(status_for("/admin", Some(UserRole::Admin)).await, StatusCode::OK);
    assert_eq!(
        status_for("/admin", Some(UserRole::Teacher)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        status_for("/admin", Some(UserRole::Student)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(status_for("/admin", None).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_require_staff() {
    assert_eq!(status_for("/staff", Some(UserRole::Admin)).await, StatusCode::OK);
    assert_eq!(status_for("/staff", Some(UserRole::Teacher)).await, StatusCode::OK);
    assert_eq!(
        status_for("/staff", Some(UserRole::Student)).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(status_for("/staff", None).await, StatusCode::UNAUTHORIZED);
}
