use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use utoipa::ToSchema;

use schoolhub_core::AppError;

use super::model::{
    AccessTokenResponse, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse, User,
};
use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Invalid credentials")]
    pub error: String,
}

/// Register a new account and receive a token pair
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Validation error, or admin role requested", body = ErrorResponse),
        (status = 409, description = "Username or email already in use", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register_user(&state.db, dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated account", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AuthService::find_user(&state.db, auth_user.user_id()?)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;
    Ok(Json(user))
}

/// Exchange credentials for an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenPairResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn obtain_token_pair(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair = AuthService::obtain_token_pair(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(pair))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/token/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let response = AuthService::refresh_access_token(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
