//! Role-gated extractors.
//!
//! Each extractor authenticates like [`AuthUser`] and then requires the
//! token's role to be one of a fixed set, answering 403 otherwise.

use schoolhub_core::AppError;
use schoolhub_models::UserRole;

use crate::middleware::auth::AuthUser;

/// Checks `auth_user` against `allowed`.
pub fn ensure_role(auth_user: &AuthUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if auth_user.0.has_any_role(allowed) {
        return Ok(());
    }

    let allowed = allowed
        .iter()
        .map(UserRole::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    Err(AppError::forbidden(format!(
        "Access denied. Required role: {}",
        allowed
    )))
}

/// Defines an extractor wrapping [`AuthUser`] that only admits the listed roles.
#[macro_export]
macro_rules! require_roles {
    ($(#[$meta:meta])* $name:ident, [$($role:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = schoolhub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;
                $crate::middleware::role::ensure_role(&auth_user, &[$($role),+])?;
                Ok($name(auth_user))
            }
        }
    };
}

require_roles!(
    /// Admins only. Guards teacher writes.
    RequireAdmin,
    [UserRole::Admin]
);

require_roles!(
    /// Admins and teachers. Guards student writes.
    RequireStaff,
    [UserRole::Admin, UserRole::Teacher]
);
