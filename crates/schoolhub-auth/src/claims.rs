//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use schoolhub_core::AppError;
use schoolhub_models::{UserId, UserRole};

/// Access token claims.
///
/// Carries everything role checks need, so authorizing a request does not
/// touch the database.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        parse_subject(&self.sub)
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

/// Refresh token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
    /// Unique token id, so two refresh tokens minted in the same second differ
    pub jti: String,
}

impl RefreshTokenClaims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        parse_subject(&self.sub)
    }
}

fn parse_subject(sub: &str) -> Result<UserId, AppError> {
    sub.parse()
        .map_err(|_| AppError::unauthorized("Invalid token subject"))
}
