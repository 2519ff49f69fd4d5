use sqlx::PgPool;

use schoolhub_config::{CorsConfig, DatabaseConfig, JwtConfig};
use schoolhub_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database = DatabaseConfig::from_env()?;

    Ok(AppState {
        db: init_db_pool(&database).await?,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    })
}
