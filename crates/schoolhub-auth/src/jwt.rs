//! Token creation and verification.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use uuid::Uuid;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;
use schoolhub_models::{UserId, UserRole};

use crate::claims::{Claims, RefreshTokenClaims};

fn sign<T: Serialize>(claims: &T, jwt_config: &JwtConfig, kind: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create {}: {}", kind, e)))
}

/// Creates a short-lived access token for `user_id`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: UserId,
    username: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp,
        iat: now,
    };

    sign(&claims, jwt_config, "token")
}

/// Verifies an access token's signature and expiry and returns its claims.
///
/// # Errors
///
/// Returns 401 for a bad signature, an expired or malformed token, or a
/// refresh token presented in place of an access token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

/// Creates a long-lived refresh token for `user_id`.
pub fn create_refresh_token(
    user_id: UserId,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.refresh_token_expiry as usize;

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    sign(&claims, jwt_config, "refresh token")
}

/// Verifies a refresh token and returns its claims.
///
/// # Errors
///
/// Returns 401 if the token is invalid, expired, or is an access token.
pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))
}
