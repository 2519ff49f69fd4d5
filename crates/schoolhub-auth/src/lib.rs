//! # SchoolHub Auth
//!
//! JWT claim types and token issuance/verification.
//!
//! Two token kinds are issued, both HS256-signed with the configured secret:
//!
//! - **Access token** ([`Claims`]): short-lived bearer credential carrying the
//!   account's role
//! - **Refresh token** ([`RefreshTokenClaims`]): long-lived, only exchangeable
//!   for a new access token
//!
//! The claim shapes differ (`role` vs `jti`), so neither verifies as the other.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::{create_access_token, verify_token};
//! use schoolhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user.id, &user.username, user.role, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims};
pub use jwt::{create_access_token, create_refresh_token, verify_refresh_token, verify_token};
