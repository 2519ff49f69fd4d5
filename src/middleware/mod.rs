//! Authentication and authorization extractors.
//!
//! 1. The client sends `Authorization: Bearer <access token>`
//! 2. [`auth::AuthUser`] verifies the token and exposes its claims
//! 3. Role extractors from [`role`] reject valid tokens lacking a required role (403)
//!
//! ```ignore
//! // Any authenticated account
//! async fn list_teachers(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Admins only
//! async fn create_teacher(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
pub mod role;
