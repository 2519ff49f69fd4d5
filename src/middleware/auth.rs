use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use schoolhub_auth::{Claims, verify_token};
use schoolhub_core::AppError;
use schoolhub_models::{UserId, UserRole};

use crate::state::AppState;

/// Extractor that validates the bearer token and yields its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0.user_id()
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub(crate) fn bearer_token(header_value: &str) -> Result<&str, AppError> {
    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::unauthorized(
            "Invalid authorization header format",
        ));
    }

    Ok(token.trim())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = bearer_token(auth_header)?;
        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extracts_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token("bearer abc").unwrap(), "abc");
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert!(bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(bearer_token("Bearer").is_err());
        assert!(bearer_token("Bearer   ").is_err());
        assert!(bearer_token("abc.def.ghi").is_err());
    }
}
