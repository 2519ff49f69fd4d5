use std::net::SocketAddr;

use anyhow::Context;

use crate::{env_flag, env_or};

/// HTTP listener settings.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Apply pending migrations before accepting traffic.
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            run_migrations: env_flag("RUN_MIGRATIONS", true),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            run_migrations: false,
        };
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_socket_addr_rejects_hostname_garbage() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 8080,
            run_migrations: false,
        };
        assert!(config.socket_addr().is_err());
    }
}
