//! # SchoolHub DB
//!
//! PostgreSQL pool construction, the embedded migration set, and helpers for
//! classifying constraint violations raised by the database.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::DatabaseConfig;
//! use schoolhub_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! ```

use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use schoolhub_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Migrations under the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a connection pool to the configured database.
///
/// # Errors
///
/// Fails when the URL is malformed or the first connection cannot be made.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("Failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations applied");
    Ok(())
}

/// Returns the violated constraint's name when `err` is a unique violation.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Returns true when `err` is a foreign key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_violations() {
        let err = sqlx::Error::RowNotFound;
        assert!(unique_violation(&err).is_none());
        assert!(!is_foreign_key_violation(&err));
    }

    #[test]
    fn test_migrations_are_embedded() {
        assert!(MIGRATOR.iter().count() >= 3);
    }
}
