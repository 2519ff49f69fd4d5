//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: JWT signing secret and token lifetimes
//! - [`cors`]: allowed CORS origins
//! - [`server`]: bind address and startup behaviour
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//!
//! let database = DatabaseConfig::from_env()?;
//! let jwt = JwtConfig::from_env();
//! let cors = CorsConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

use std::{env, str::FromStr};

/// Reads `key` from the environment, falling back to `default` when it is
/// unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses boolean flags the way operators write them (`true`, `1`, `yes`, `on`).
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" on "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
